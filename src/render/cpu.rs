use crate::foundation::core::{Line, Rgba};
use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::foundation::math::premul_rgba8;
use crate::render::backend::{FrameRGBA, StrokeStyle, Surface};

/// Options for [`CpuSurface`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuSurfaceOpts {
    /// If set, every `clear` fills the canvas with this color instead of transparency.
    pub background: Option<Rgba>,
}

impl CpuSurfaceOpts {
    /// Return options with a configured background color.
    pub fn with_background(mut self, background: Option<Rgba>) -> Self {
        self.background = background;
        self
    }
}

/// Raster surface backed by `vello_cpu`.
///
/// Strokes are recorded into a render context and rasterized into the pixmap on `present`.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    width: u16,
    height: u16,
    pixmap: Option<vello_cpu::Pixmap>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("opts", &self.opts)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Create a surface of `width x height` pixels.
    pub fn new(width: u32, height: u32, opts: CpuSurfaceOpts) -> RetrospectResult<Self> {
        let mut surface = Self {
            opts,
            width: 0,
            height: 0,
            pixmap: None,
            ctx: None,
        };
        surface.resize(width, height)?;
        Ok(surface)
    }

    /// Read back the last presented frame as premultiplied RGBA8.
    pub fn frame(&self) -> FrameRGBA {
        let data = self
            .pixmap
            .as_ref()
            .map(|pm| pm.data_as_u8_slice().to_vec())
            .unwrap_or_default();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }

    fn fresh_context(&self) -> Option<vello_cpu::RenderContext> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some(bg) = self.opts.background {
            let [r, g, b, a] = bg.to_rgba8();
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Some(ctx)
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn resize(&mut self, width: u32, height: u32) -> RetrospectResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| RetrospectError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| RetrospectError::render("surface height exceeds u16"))?;

        if self.pixmap.is_some() && self.width == width_u16 && self.height == height_u16 {
            return Ok(());
        }

        self.width = width_u16;
        self.height = height_u16;
        self.pixmap = (width_u16 > 0 && height_u16 > 0)
            .then(|| vello_cpu::Pixmap::new(width_u16, height_u16));
        self.clear();
        if let Some(pm) = self.pixmap.as_mut() {
            clear_pixmap(pm, self.opts.background);
        }
        tracing::debug!(width, height, "cpu surface resized");
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx = self.fresh_context();
    }

    fn stroke_line(&mut self, line: Line, style: StrokeStyle) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        let [r, g, b, a] = style.color.to_rgba8();
        if a == 0 || !(style.width > 0.0) {
            return;
        }
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(vello_cpu::kurbo::Point::new(line.p0.x, line.p0.y));
        path.line_to(vello_cpu::kurbo::Point::new(line.p1.x, line.p1.y));

        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(style.width).with_caps(vello_cpu::kurbo::Cap::Butt),
        );
        ctx.stroke_path(&path);
    }

    fn present(&mut self) {
        let (Some(ctx), Some(pixmap)) = (self.ctx.as_mut(), self.pixmap.as_mut()) else {
            return;
        };
        clear_pixmap(pixmap, None);
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
        if self.opts.background.is_some_and(|bg| bg.alpha_u8() == 255) {
            // u8 source-over can round coverage down to 254 on an opaque base.
            for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, background: Option<Rgba>) {
    let premul = background
        .map(|bg| premul_rgba8(bg.to_rgba8()))
        .unwrap_or([0, 0, 0, 0]);
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
