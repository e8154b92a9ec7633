use crate::field::geometry::layout_spokes;
use crate::foundation::core::{Rgba, ViewportState};
use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::render::backend::{StrokeStyle, Surface};

/// Paint settings for the radial backdrop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    /// Stroke width in pixels for every segment.
    pub stroke_width: f64,
    /// Stroke color; its alpha is replaced by `spoke_alpha` / `accent_alpha`.
    pub color: Rgba,
    /// Alpha of regular spoke bodies.
    pub spoke_alpha: f32,
    /// Alpha of accent ticks; must exceed `spoke_alpha`.
    pub accent_alpha: f32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            color: Rgba::WHITE,
            spoke_alpha: 0.3,
            accent_alpha: 0.5,
        }
    }
}

impl FieldStyle {
    /// Check that the style draws something visible with accents layered above spokes.
    pub fn validate(&self) -> RetrospectResult<()> {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(RetrospectError::validation(
                "field stroke_width must be finite and > 0",
            ));
        }
        for (name, a) in [
            ("spoke_alpha", self.spoke_alpha),
            ("accent_alpha", self.accent_alpha),
        ] {
            if !(0.0..=1.0).contains(&a) {
                return Err(RetrospectError::validation(format!(
                    "field {name} must be in [0, 1], got {a}"
                )));
            }
        }
        if self.accent_alpha <= self.spoke_alpha {
            return Err(RetrospectError::validation(
                "field accent_alpha must be greater than spoke_alpha",
            ));
        }
        Ok(())
    }

    fn spoke(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.stroke_width,
            color: self.color.with_alpha(self.spoke_alpha),
        }
    }

    fn accent(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.stroke_width,
            color: self.color.with_alpha(self.accent_alpha),
        }
    }
}

/// What a single redraw did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawOutcome {
    /// The viewport was not measured yet; the surface was left untouched.
    Skipped,
    /// The surface was cleared and the full field drawn.
    Drawn {
        /// Spoke bodies stroked.
        spokes: usize,
        /// Accent ticks stroked.
        accents: usize,
    },
}

impl RedrawOutcome {
    /// Total number of `stroke_line` calls issued.
    pub fn stroke_count(self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Drawn { spokes, accents } => spokes + accents,
        }
    }
}

/// Draws the scroll-reactive spoke field.
#[derive(Clone, Debug, Default)]
pub struct RadialFieldRenderer {
    style: FieldStyle,
}

impl RadialFieldRenderer {
    /// Create a renderer after validating `style`.
    pub fn new(style: FieldStyle) -> RetrospectResult<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    /// Active paint settings.
    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    /// Clear `surface` and draw the whole field for `state`.
    ///
    /// Unmeasured viewports are skipped without touching the surface.
    pub fn redraw<S: Surface + ?Sized>(
        &self,
        state: &ViewportState,
        surface: &mut S,
    ) -> RedrawOutcome {
        let Some(spokes) = layout_spokes(state) else {
            tracing::debug!(?state, "redraw skipped: viewport not measured");
            return RedrawOutcome::Skipped;
        };

        let spoke_style = self.style.spoke();
        let accent_style = self.style.accent();

        surface.clear();
        let mut accents = 0;
        for spoke in &spokes {
            surface.stroke_line(spoke.body, spoke_style);
            if let Some(tick) = spoke.accent {
                surface.stroke_line(tick, accent_style);
                accents += 1;
            }
        }
        surface.present();

        RedrawOutcome::Drawn {
            spokes: spokes.len(),
            accents,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/renderer.rs"]
mod tests;
