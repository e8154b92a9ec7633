use crate::foundation::core::{Line, Rgba};
use crate::foundation::error::RetrospectResult;

/// A rendered canvas as RGBA8 pixels.
///
/// Frames read back from [`crate::CpuSurface`] are **premultiplied alpha**; the `premultiplied`
/// flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, e.g. before PNG encoding.
    pub fn to_straight(&self) -> Self {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// Paint parameters for one stroked segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f64,
    /// Stroke color (straight alpha).
    pub color: Rgba,
}

/// A 2D drawing target sized to the viewport.
///
/// This is the seam between the backdrop renderer and a concrete display surface. A redraw is
/// always `clear`, any number of `stroke_line`, then `present`.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the drawing target; existing contents are discarded.
    fn resize(&mut self, width: u32, height: u32) -> RetrospectResult<()>;

    /// Drop everything drawn so far.
    fn clear(&mut self);

    /// Stroke a straight segment in surface coordinates.
    fn stroke_line(&mut self, line: Line, style: StrokeStyle);

    /// Commit the strokes issued since the last `clear`.
    fn present(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn resize(&mut self, width: u32, height: u32) -> RetrospectResult<()> {
        (**self).resize(width, height)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn stroke_line(&mut self, line: Line, style: StrokeStyle) {
        (**self).stroke_line(line, style)
    }

    fn present(&mut self) {
        (**self).present()
    }
}
