use tracing::{debug, trace};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextPrimitive,
};

/// Paint target handed to drawing code for one repaint.
///
/// Callers draw in logical pixels; the drawing routines scale by
/// `device_pixel_ratio` before pushing physical-pixel primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHandle {
    logical: Viewport,
    device_pixel_ratio: f64,
    frame: RenderFrame,
}

impl SurfaceHandle {
    #[must_use]
    pub fn new(logical: Viewport, device_pixel_ratio: f64) -> Self {
        let device_pixel_ratio = sanitize_device_pixel_ratio(device_pixel_ratio);
        Self {
            logical,
            device_pixel_ratio,
            frame: RenderFrame::new(physical_size(logical, device_pixel_ratio)),
        }
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn logical_size(&self) -> Viewport {
        self.logical
    }

    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.logical.is_valid()
    }

    /// Logical length to physical pixels.
    #[must_use]
    pub fn scaled(&self, logical: f64) -> f64 {
        logical * self.device_pixel_ratio
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.frame.lines.push(line);
    }

    pub fn push_polyline(&mut self, polyline: PolylinePrimitive) {
        self.frame.polylines.push(polyline);
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.frame.circles.push(circle);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.frame.rects.push(rect);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.frame.texts.push(text);
    }
}

fn sanitize_device_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

fn physical_size(logical: Viewport, device_pixel_ratio: f64) -> Viewport {
    let scale = |length: u32| -> u32 {
        if length == 0 {
            0
        } else {
            ((f64::from(length) * device_pixel_ratio).round() as u32).max(1)
        }
    };
    Viewport::new(scale(logical.width), scale(logical.height))
}

/// Exclusive owner of one raster drawing resource.
///
/// The physical buffer is `logical * device_pixel_ratio` in each
/// dimension. It is released when the logical size drops to zero and when
/// the surface is dropped; resizes replace it in place.
#[derive(Debug)]
pub struct ChartSurface<R: Renderer> {
    renderer: R,
    logical: Viewport,
    device_pixel_ratio: f64,
    allocated: Option<Viewport>,
}

impl<R: Renderer> ChartSurface<R> {
    /// Takes ownership of `renderer` and allocates for `logical` if it has extent.
    pub fn acquire(renderer: R, logical: Viewport, device_pixel_ratio: f64) -> ChartResult<Self> {
        let mut surface = Self {
            renderer,
            logical,
            device_pixel_ratio: sanitize_device_pixel_ratio(device_pixel_ratio),
            allocated: None,
        };
        surface.reallocate()?;
        Ok(surface)
    }

    #[must_use]
    pub fn logical_size(&self) -> Viewport {
        self.logical
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn physical_size(&self) -> Option<Viewport> {
        self.allocated
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.allocated.is_some()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn resize(&mut self, logical: Viewport) -> ChartResult<()> {
        if logical == self.logical && self.allocated.is_some() {
            return Ok(());
        }
        self.logical = logical;
        self.reallocate()
    }

    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) -> ChartResult<()> {
        let device_pixel_ratio = sanitize_device_pixel_ratio(device_pixel_ratio);
        if device_pixel_ratio == self.device_pixel_ratio {
            return Ok(());
        }
        self.device_pixel_ratio = device_pixel_ratio;
        self.reallocate()
    }

    /// Runs a full repaint and presents it.
    ///
    /// Returns `Ok(false)` without calling `paint` while nothing is allocated.
    pub fn repaint<F>(&mut self, paint: F) -> ChartResult<bool>
    where
        F: FnOnce(&mut SurfaceHandle),
    {
        if self.allocated.is_none() {
            trace!("skipping repaint of unallocated surface");
            return Ok(false);
        }

        let mut handle = SurfaceHandle::new(self.logical, self.device_pixel_ratio);
        paint(&mut handle);
        self.renderer.render(handle.frame())?;
        Ok(true)
    }

    pub fn release(&mut self) {
        if let Some(physical) = self.allocated.take() {
            self.renderer.release();
            debug!(
                width = physical.width,
                height = physical.height,
                "released chart surface"
            );
        }
    }

    fn reallocate(&mut self) -> ChartResult<()> {
        if !self.logical.is_valid() {
            self.release();
            return Ok(());
        }

        let physical = physical_size(self.logical, self.device_pixel_ratio);
        if self.allocated == Some(physical) {
            return Ok(());
        }

        self.release();
        self.renderer.allocate(physical).map_err(|err| {
            if matches!(err, ChartError::SurfaceUnavailable(_)) {
                err
            } else {
                ChartError::SurfaceUnavailable(err.to_string())
            }
        })?;
        self.allocated = Some(physical);
        debug!(
            logical_width = self.logical.width,
            logical_height = self.logical.height,
            physical_width = physical.width,
            physical_height = physical.height,
            device_pixel_ratio = self.device_pixel_ratio,
            "allocated chart surface"
        );
        Ok(())
    }
}

impl<R: Renderer> Drop for ChartSurface<R> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Acquires a surface and immediately paints it once with `on_ready`.
///
/// Dropping the returned surface releases the resource.
pub fn acquire_surface<R, F>(
    renderer: R,
    logical: Viewport,
    device_pixel_ratio: f64,
    on_ready: F,
) -> ChartResult<ChartSurface<R>>
where
    R: Renderer,
    F: FnOnce(&mut SurfaceHandle),
{
    let mut surface = ChartSurface::acquire(renderer, logical, device_pixel_ratio)?;
    surface.repaint(on_ready)?;
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::{ChartSurface, SurfaceHandle, acquire_surface};
    use crate::core::Viewport;
    use crate::error::ChartError;
    use crate::render::NullRenderer;

    #[test]
    fn physical_size_tracks_device_pixel_ratio() {
        let surface =
            ChartSurface::acquire(NullRenderer::default(), Viewport::new(300, 150), 2.0)
                .expect("acquire");
        assert_eq!(surface.physical_size(), Some(Viewport::new(600, 300)));
        assert_eq!(
            surface.renderer().physical_size,
            Some(Viewport::new(600, 300))
        );
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        let handle = SurfaceHandle::new(Viewport::new(10, 10), f64::NAN);
        assert_eq!(handle.device_pixel_ratio(), 1.0);
        assert_eq!(handle.frame().viewport, Viewport::new(10, 10));
    }

    #[test]
    fn zero_size_defers_allocation_and_skips_paint() {
        let mut surface = ChartSurface::acquire(NullRenderer::default(), Viewport::new(0, 0), 1.0)
            .expect("acquire");
        assert!(!surface.is_allocated());

        let mut called = false;
        let painted = surface.repaint(|_| called = true).expect("repaint");
        assert!(!painted);
        assert!(!called);
    }

    #[test]
    fn on_ready_runs_once_with_handle() {
        let mut calls = 0;
        let surface = acquire_surface(NullRenderer::default(), Viewport::new(20, 10), 1.5, |handle| {
            calls += 1;
            assert_eq!(handle.device_pixel_ratio(), 1.5);
        })
        .expect("acquire");
        assert_eq!(calls, 1);
        assert_eq!(surface.renderer().frames_rendered, 1);
    }

    #[test]
    fn allocation_failure_is_typed() {
        let err = ChartSurface::acquire(NullRenderer::failing(), Viewport::new(10, 10), 1.0)
            .expect_err("must fail");
        assert!(matches!(err, ChartError::SurfaceUnavailable(_)));
    }
}
