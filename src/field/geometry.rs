//! Pure spoke geometry for the radial backdrop.
//!
//! Every quantity here is a function of one [`ViewportState`] snapshot; nothing is cached between
//! redraws.

use std::f64::consts::{PI, TAU};

use crate::foundation::core::{Line, Point, ViewportState, Vec2};

/// Number of spokes drawn per redraw.
pub const SPOKE_COUNT: usize = 60;
/// Every `ACCENT_INTERVAL`-th spoke carries an accent tick.
pub const ACCENT_INTERVAL: usize = 5;
/// Ellipse semi-axes as a fraction of the half viewport extents.
pub const ELLIPSE_SCALE: f64 = 0.95;
/// Spokes stop at this fraction of the ellipse radius.
pub const SPOKE_REACH: f64 = 0.95;
/// Accent ticks continue inward to this fraction of the ellipse radius.
pub const ACCENT_REACH: f64 = 0.85;

/// Angle of spoke `index` for a given scroll offset, in radians.
///
/// Spokes are evenly spaced; scrolling rotates the whole field by `scroll / (500π)`.
pub fn spoke_angle(index: usize, scroll_offset: f64) -> f64 {
    (index as f64) * TAU / (SPOKE_COUNT as f64) + scroll_offset / (500.0 * PI)
}

/// Return `true` when `index` carries an accent tick.
pub fn is_accent(index: usize) -> bool {
    index % ACCENT_INTERVAL == 0
}

/// Axis-aligned ellipse inscribed in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldEllipse {
    /// Ellipse center (viewport center).
    pub center: Point,
    /// Horizontal semi-axis.
    pub semi_x: f64,
    /// Vertical semi-axis.
    pub semi_y: f64,
}

impl FieldEllipse {
    /// Ellipse for `state`, or `None` until the viewport has been measured.
    pub fn inscribed(state: &ViewportState) -> Option<Self> {
        if !state.is_measured() {
            return None;
        }
        Some(Self {
            center: state.center(),
            semi_x: state.width / 2.0 * ELLIPSE_SCALE,
            semi_y: state.height / 2.0 * ELLIPSE_SCALE,
        })
    }

    /// Distance from the center to the boundary along `theta`.
    ///
    /// `r = a·b / sqrt(a²·sin²θ + b²·cos²θ)`
    pub fn radius_at(&self, theta: f64) -> f64 {
        polar_radius(self.semi_x, self.semi_y, theta)
    }

    /// Point at `distance` from the center along `theta`.
    pub fn point_at(&self, theta: f64, distance: f64) -> Point {
        self.center + Vec2::from_angle(theta) * distance
    }
}

/// Polar radius of an origin-centered ellipse with semi-axes `a` (x) and `b` (y).
pub fn polar_radius(a: f64, b: f64, theta: f64) -> f64 {
    let (sin, cos) = theta.sin_cos();
    (a * b) / (a * a * sin * sin + b * b * cos * cos).sqrt()
}

/// Geometry of one spoke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spoke {
    /// Spoke index in `0..SPOKE_COUNT`.
    pub index: usize,
    /// Spoke angle in radians.
    pub theta: f64,
    /// Ellipse radius along `theta`.
    pub radius: f64,
    /// Segment from far outside the viewport to `SPOKE_REACH · radius`.
    pub body: Line,
    /// Segment from `SPOKE_REACH · radius` to `ACCENT_REACH · radius` on accented spokes.
    pub accent: Option<Line>,
}

/// Lay out all spokes for `state`, or `None` until the viewport has been measured.
pub fn layout_spokes(state: &ViewportState) -> Option<Vec<Spoke>> {
    let ellipse = FieldEllipse::inscribed(state)?;
    let far = state.width + state.height;

    let spokes = (0..SPOKE_COUNT)
        .map(|index| {
            let theta = spoke_angle(index, state.scroll_offset);
            let radius = ellipse.radius_at(theta);
            let inner = ellipse.point_at(theta, radius * SPOKE_REACH);
            let body = Line::new(ellipse.point_at(theta, far), inner);
            let accent = is_accent(index)
                .then(|| Line::new(inner, ellipse.point_at(theta, radius * ACCENT_REACH)));
            Spoke {
                index,
                theta,
                radius,
                body,
                accent,
            }
        })
        .collect();
    Some(spokes)
}

#[cfg(test)]
#[path = "../../tests/unit/field/geometry.rs"]
mod tests;
