use crate::foundation::core::Line;
use crate::foundation::error::RetrospectResult;
use crate::render::backend::{StrokeStyle, Surface};

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// `resize(width, height)`.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// `clear()`.
    Clear,
    /// `stroke_line(line, style)`.
    Stroke {
        /// Segment in surface coordinates.
        line: Line,
        /// Paint used for the segment.
        style: StrokeStyle,
    },
    /// `present()`.
    Present,
}

/// Surface that records calls instead of rasterizing them.
///
/// Used for deterministic tests of renderers and dispatchers without a display.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Create an empty recorder with the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All calls recorded so far, in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of `stroke_line` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke { .. }))
            .count()
    }

    /// Strokes issued after the most recent `clear`, i.e. what is currently on screen.
    pub fn visible_strokes(&self) -> Vec<(Line, StrokeStyle)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map_or(0, |i| i + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke { line, style } => Some((*line, *style)),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls; the size is kept.
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> RetrospectResult<()> {
        self.width = width;
        self.height = height;
        self.ops.push(SurfaceOp::Resize { width, height });
        Ok(())
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn stroke_line(&mut self, line: Line, style: StrokeStyle) {
        self.ops.push(SurfaceOp::Stroke { line, style });
    }

    fn present(&mut self) {
        self.ops.push(SurfaceOp::Present);
    }
}
