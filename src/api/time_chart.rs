use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Domain, PixelPoint, Projector, ProjectorInput, Sample, Viewport, build_projector,
};
use crate::error::ChartResult;
use crate::interaction::{
    RangeSelector, SelectionOutcome, SelectorEvent, WindowHost, attach_range_selector,
};
use crate::render::{
    AxisLayout, AxisOrientation, AxisPlacement, ChartSurface, Renderer, SurfaceHandle,
    TickDirection, draw_points, draw_polyline, render_axis, render_time_axis,
};

use super::TimeChartConfig;

/// Lifecycle of a [`TimeChart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeChartState {
    /// No measured dimensions yet; nothing is painted.
    Uninitialized,
    /// Dimensions known and the projector rebuilt, not yet presented.
    Ready,
    /// Latest inputs have been presented.
    Painted,
}

/// Builds the projector a chart of `logical` size would draw with.
#[must_use]
pub fn chart_projector(
    samples: &[Sample],
    logical: Viewport,
    config: &TimeChartConfig,
) -> Option<Projector> {
    let (plot_width, plot_height) = config.plot_insets.plot_size(logical)?;
    build_projector(
        ProjectorInput::new(samples)
            .with_size(plot_width, plot_height)
            .with_origin_hint(PixelPoint::new(
                config.plot_insets.left,
                config.plot_insets.top,
            ))
            .with_extra_x_domain(config.epoch_range)
            .with_extra_y_domain(config.target_range),
    )
}

/// Paints a complete labelled chart for `projector`: value axis, time axis,
/// series line, then point markers (subject to the marker cap).
pub fn paint_time_chart(
    handle: &mut SurfaceHandle,
    projector: &Projector,
    config: &TimeChartConfig,
) {
    let style = &config.style;
    let offset = projector.offset();
    let origin = projector.origin();
    let sensor_type = config.sensor_type;
    let value_label = move |value: f64| sensor_type.format_value(value);

    render_axis(
        Some(projector.y_scale()),
        &AxisLayout {
            orientation: AxisOrientation::Y,
            placement: AxisPlacement::Left,
            direction: TickDirection::Outward,
            offset: offset.y,
            position: offset.x,
            tick_count: style.y_tick_count,
            tick_style: style.tick_style(),
            line_style: style.axis_line,
        },
        Some(&value_label),
        handle,
    );
    render_time_axis(
        Some(projector.x_scale()),
        &AxisLayout {
            orientation: AxisOrientation::X,
            placement: AxisPlacement::Below,
            direction: TickDirection::Outward,
            offset: offset.x,
            position: origin.y,
            tick_count: style.x_tick_count,
            tick_style: style.tick_style(),
            line_style: style.axis_line,
        },
        None,
        handle,
    );

    let points = projector.surface_points();
    draw_polyline(handle, &points, style.series_line);
    draw_points(handle, &points, style.point_radius, style.point_color);
}

/// One-shot render: builds a projector for the handle's size and paints it.
///
/// Returns the projector used, or `None` when there was nothing to draw.
pub fn render_time_chart(
    handle: &mut SurfaceHandle,
    samples: &[Sample],
    config: &TimeChartConfig,
) -> Option<Projector> {
    let projector = chart_projector(samples, handle.logical_size(), config)?;
    paint_time_chart(handle, &projector, config);
    Some(projector)
}

/// Range selector owned by a chart; the host is boxed so one chart type
/// serves any window integration.
pub type ChartRangeSelector = RangeSelector<Box<dyn WindowHost>>;

/// A labelled line chart of one sensor series on an exclusively owned surface.
///
/// Every dimension, sample or hint change rebuilds the projector from
/// scratch, rebinds the attached selector to it and repaints, so axes, line
/// and selector never see different scales within one frame.
pub struct TimeChart<R: Renderer> {
    config: TimeChartConfig,
    surface: ChartSurface<R>,
    samples: Vec<Sample>,
    projector: Option<Projector>,
    selector: Option<ChartRangeSelector>,
    state: TimeChartState,
}

impl<R: Renderer> TimeChart<R> {
    /// Creates an unmeasured chart; nothing is allocated until dimensions arrive.
    pub fn new(renderer: R, config: TimeChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let surface =
            ChartSurface::acquire(renderer, Viewport::new(0, 0), config.device_pixel_ratio)?;
        Ok(Self {
            config,
            surface,
            samples: Vec::new(),
            projector: None,
            selector: None,
            state: TimeChartState::Uninitialized,
        })
    }

    #[must_use]
    pub fn state(&self) -> TimeChartState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &TimeChartConfig {
        &self.config
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Projector of the latest frame, or `None` while unmeasured or empty.
    #[must_use]
    pub fn projector(&self) -> Option<&Projector> {
        self.projector.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &ChartSurface<R> {
        &self.surface
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        self.surface.renderer()
    }

    pub fn set_dimensions(&mut self, logical: Viewport) -> ChartResult<TimeChartState> {
        self.surface.resize(logical)?;
        self.refresh()
    }

    pub fn set_samples(&mut self, samples: Vec<Sample>) -> ChartResult<TimeChartState> {
        debug!(count = samples.len(), "set chart samples");
        self.samples = samples;
        self.refresh()
    }

    pub fn set_domain_hints(
        &mut self,
        epoch_range: Option<Domain>,
        target_range: Option<Domain>,
    ) -> ChartResult<TimeChartState> {
        self.config.epoch_range = epoch_range;
        self.config.target_range = target_range;
        self.refresh()
    }

    pub fn set_config(&mut self, config: TimeChartConfig) -> ChartResult<TimeChartState> {
        config.validate()?;
        self.surface
            .set_device_pixel_ratio(config.device_pixel_ratio)?;
        self.config = config;
        self.refresh()
    }

    /// Attached selector, bound to the latest projector.
    #[must_use]
    pub fn range_selector(&self) -> Option<&ChartRangeSelector> {
        self.selector.as_ref()
    }

    /// Attaches a range selector bound to the current projector, replacing
    /// any previous one.
    ///
    /// Returns `false` while there is no projector to select against. The
    /// chart rebinds the selector on every rebuild and paints its live
    /// selection over the time axis.
    pub fn attach_range_selector<H, F>(&mut self, host: H, on_select: F) -> bool
    where
        H: WindowHost + 'static,
        F: FnMut(Domain) + 'static,
    {
        let Some(projector) = self.projector.as_ref() else {
            return false;
        };
        let host: Box<dyn WindowHost> = Box::new(host);
        self.selector = Some(attach_range_selector(projector, host, on_select));
        true
    }

    /// Drops the attached selector, releasing its window listeners.
    pub fn detach_range_selector(&mut self) {
        self.selector = None;
    }

    /// Routes one input event to the attached selector and repaints when
    /// the selection overlay changed.
    pub fn handle_selector_event(
        &mut self,
        event: SelectorEvent,
    ) -> ChartResult<SelectionOutcome> {
        let Some(selector) = self.selector.as_mut() else {
            return Ok(SelectionOutcome::Ignored);
        };
        let outcome = selector.handle_event(event);
        if outcome != SelectionOutcome::Ignored {
            self.refresh()?;
        }
        Ok(outcome)
    }

    fn refresh(&mut self) -> ChartResult<TimeChartState> {
        let logical = self.surface.logical_size();
        if !self.surface.is_allocated() {
            self.projector = None;
            if let Some(selector) = self.selector.as_mut() {
                selector.reset();
            }
            self.transition(TimeChartState::Uninitialized);
            return Ok(self.state);
        }

        self.projector = chart_projector(&self.samples, logical, &self.config);
        if let Some(selector) = self.selector.as_mut() {
            match self.projector.as_ref() {
                Some(projector) => selector.set_projector(projector),
                None => selector.reset(),
            }
        }
        self.transition(TimeChartState::Ready);

        let projector = self.projector.as_ref();
        let selector = self.selector.as_ref();
        let config = &self.config;
        self.surface.repaint(|handle| {
            let Some(projector) = projector else {
                trace!("no projector; presenting empty chart");
                return;
            };
            paint_time_chart(handle, projector, config);
            if let Some(selector) = selector {
                selector.render_overlay(
                    handle,
                    projector.origin(),
                    config.plot_insets.bottom,
                    config.style.selection_fill,
                );
            }
        })?;

        self.transition(TimeChartState::Painted);
        Ok(self.state)
    }

    fn transition(&mut self, next: TimeChartState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "time chart state");
            self.state = next;
        }
    }
}
