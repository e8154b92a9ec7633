pub use kurbo::{Line, Point, Rect, Size, Vec2};

/// Latest known viewport measurements plus the document scroll position.
///
/// Owned by whoever dispatches viewport events; renderers only ever see copies, so both inputs of
/// one redraw always come from the same snapshot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportState {
    /// Viewport width in CSS pixels.
    pub width: f64,
    /// Viewport height in CSS pixels.
    pub height: f64,
    /// Pixels scrolled from the top of the document.
    pub scroll_offset: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::unmeasured()
    }
}

impl ViewportState {
    /// State before the first layout measurement.
    pub const fn unmeasured() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scroll_offset: 0.0,
        }
    }

    /// Create a state with sanitized dimensions and scroll offset.
    pub fn new(width: f64, height: f64, scroll_offset: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            scroll_offset: sanitize_offset(scroll_offset),
        }
    }

    /// Return `true` once both dimensions are known and non-zero.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Copy of `self` with a new scroll offset.
    pub fn with_scroll(self, scroll_offset: f64) -> Self {
        Self {
            scroll_offset: sanitize_offset(scroll_offset),
            ..self
        }
    }

    /// Copy of `self` with new dimensions; the scroll offset is kept.
    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            ..self
        }
    }

    /// Viewport center in viewport-local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Visible area in document coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_offset,
            self.width,
            self.scroll_offset + self.height,
        )
    }

    /// Canvas size in whole pixels covering the viewport.
    pub fn pixel_size(&self) -> (u32, u32) {
        if !self.is_measured() {
            return (0, 0);
        }
        (
            self.width.ceil().min(f64::from(u32::MAX)) as u32,
            self.height.ceil().min(f64::from(u32::MAX)) as u32,
        )
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn sanitize_offset(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Straight (non-premultiplied) RGBA color with a floating-point alpha.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);

    /// Create a color; alpha is not clamped here, see [`Rgba::alpha_u8`].
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Alpha quantized to 8 bits.
    pub fn alpha_u8(self) -> u8 {
        crate::foundation::math::unit_to_u8(self.a)
    }

    /// Straight RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.alpha_u8()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
