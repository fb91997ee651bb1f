mod axis;
mod draw;
mod frame;
mod null_renderer;
mod primitives;
mod surface;

pub use axis::{
    AxisLayout, AxisOrientation, AxisPlacement, Tick, TickDirection, TickStyle, compute_ticks,
    render_axis, render_time_axis,
};
pub use draw::{MAX_POINT_MARKERS, draw_points, draw_polyline, fill_rect};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, StrokeStyle,
    TextHAlign, TextPrimitive, TextStyle, TextVAlign,
};
pub use surface::{ChartSurface, SurfaceHandle, acquire_surface};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Contract implemented by any raster backend.
///
/// A backend owns at most one physical buffer at a time: `allocate`
/// replaces it, `release` frees it. Frames arrive fully materialized in
/// physical pixels so backends stay free of chart logic.
pub trait Renderer {
    fn allocate(&mut self, physical: Viewport) -> ChartResult<()>;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    fn release(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn allocate(&mut self, physical: Viewport) -> ChartResult<()> {
        (**self).allocate(physical)
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        (**self).render(frame)
    }

    fn release(&mut self) {
        (**self).release();
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
