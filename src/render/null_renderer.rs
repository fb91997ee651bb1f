use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

/// Headless renderer used by tests and hosts without a raster backend.
///
/// It validates every frame and records lifecycle counters so surface
/// leaks and draw-call counts can be asserted without a real device.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub allocations: usize,
    pub releases: usize,
    pub frames_rendered: usize,
    pub physical_size: Option<Viewport>,
    pub last_frame: Option<RenderFrame>,
    /// Makes the next allocations fail, to exercise acquisition errors.
    pub fail_allocation: bool,
}

impl NullRenderer {
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_allocation: true,
            ..Self::default()
        }
    }

    /// Allocations not yet matched by a release.
    #[must_use]
    pub fn live_allocations(&self) -> usize {
        self.allocations - self.releases
    }

    #[must_use]
    pub fn last_polyline_count(&self) -> usize {
        self.last_frame
            .as_ref()
            .map_or(0, |frame| frame.polylines.len())
    }

    #[must_use]
    pub fn last_circle_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.circles.len())
    }

    #[must_use]
    pub fn last_text_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.texts.len())
    }
}

impl Renderer for NullRenderer {
    fn allocate(&mut self, physical: Viewport) -> ChartResult<()> {
        if self.fail_allocation {
            return Err(ChartError::SurfaceUnavailable(
                "null renderer configured to fail".to_owned(),
            ));
        }
        if self.physical_size.is_some() {
            self.releases += 1;
        }
        self.allocations += 1;
        self.physical_size = Some(physical);
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn release(&mut self) {
        if self.physical_size.take().is_some() {
            self.releases += 1;
        }
    }
}
