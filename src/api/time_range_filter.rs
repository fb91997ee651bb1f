use tracing::debug;

use crate::core::{Domain, PixelRange, TimeScale, Viewport};
use crate::error::ChartResult;
use crate::render::{
    AxisLayout, AxisOrientation, AxisPlacement, ChartSurface, Renderer, SurfaceHandle,
    TickDirection, render_time_axis,
};

use super::ChartStyle;

/// Horizontal padding kept free at both ends so edge labels are not clipped.
pub const FILTER_AXIS_PADDING_PX: f64 = 12.0;

/// Builds the filter's scale over `full_domain`, or `None` with no width to span.
#[must_use]
pub fn filter_scale(full_domain: Domain, logical: Viewport) -> Option<TimeScale> {
    let usable = f64::from(logical.width) - 2.0 * FILTER_AXIS_PADDING_PX;
    if !logical.is_valid() || usable <= 0.0 {
        return None;
    }
    Some(TimeScale::new(full_domain, PixelRange::new(0.0, usable)))
}

/// Paints the backing time axis of a range filter: a ruled line along the
/// top of the strip with clock labels beneath. No data, no value axis.
pub fn render_time_range_filter(
    handle: &mut SurfaceHandle,
    full_domain: Domain,
    style: &ChartStyle,
) -> Option<TimeScale> {
    let scale = filter_scale(full_domain, handle.logical_size())?;
    render_time_axis(
        Some(&scale),
        &AxisLayout {
            orientation: AxisOrientation::X,
            placement: AxisPlacement::Below,
            direction: TickDirection::Outward,
            offset: FILTER_AXIS_PADDING_PX,
            position: style.axis_line.width,
            tick_count: style.x_tick_count,
            tick_style: style.tick_style(),
            line_style: style.axis_line,
        },
        None,
        handle,
    );
    Some(scale)
}

/// Mini time axis that backs a host-provided two-handle slider.
///
/// The filter paints the axis and keeps it in sync with the full domain and
/// its dimensions. The slider itself, and the selected sub-range, live in
/// the host; slider callbacks are only clamped and forwarded.
pub struct TimeRangeFilter<R: Renderer> {
    surface: ChartSurface<R>,
    full_domain: Domain,
    style: ChartStyle,
    on_change: Box<dyn FnMut(Domain)>,
    on_after_change: Box<dyn FnMut(Domain)>,
}

impl<R: Renderer> TimeRangeFilter<R> {
    pub fn new<C, A>(
        renderer: R,
        full_domain: Domain,
        logical: Viewport,
        device_pixel_ratio: f64,
        on_change: C,
        on_after_change: A,
    ) -> ChartResult<Self>
    where
        C: FnMut(Domain) + 'static,
        A: FnMut(Domain) + 'static,
    {
        let surface = ChartSurface::acquire(renderer, logical, device_pixel_ratio)?;
        let mut filter = Self {
            surface,
            full_domain,
            style: ChartStyle::default(),
            on_change: Box::new(on_change),
            on_after_change: Box::new(on_after_change),
        };
        filter.repaint()?;
        Ok(filter)
    }

    #[must_use]
    pub fn full_domain(&self) -> Domain {
        self.full_domain
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        self.surface.renderer()
    }

    /// Scale used by the last paint, for hosts that position slider handles.
    #[must_use]
    pub fn scale(&self) -> Option<TimeScale> {
        filter_scale(self.full_domain, self.surface.logical_size())
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        self.repaint()
    }

    pub fn set_full_domain(&mut self, full_domain: Domain) -> ChartResult<()> {
        if full_domain == self.full_domain {
            return Ok(());
        }
        debug!(
            min = full_domain.min,
            max = full_domain.max,
            "time range filter domain changed"
        );
        self.full_domain = full_domain;
        self.repaint()
    }

    pub fn set_dimensions(&mut self, logical: Viewport) -> ChartResult<()> {
        self.surface.resize(logical)?;
        self.repaint()
    }

    /// Clamps a sub-range into the full domain, as the slider should display it.
    #[must_use]
    pub fn clamp_sub_range(&self, sub_range: Domain) -> Domain {
        Domain::new(
            self.full_domain.clamp(sub_range.min),
            self.full_domain.clamp(sub_range.max),
        )
    }

    /// Forwards a live slider movement to `on_change`.
    pub fn slider_changed(&mut self, sub_range: Domain) -> Domain {
        let clamped = self.clamp_sub_range(sub_range);
        (self.on_change)(clamped);
        clamped
    }

    /// Forwards the final slider value to `on_after_change`.
    pub fn slider_released(&mut self, sub_range: Domain) -> Domain {
        let clamped = self.clamp_sub_range(sub_range);
        (self.on_after_change)(clamped);
        clamped
    }

    fn repaint(&mut self) -> ChartResult<()> {
        let full_domain = self.full_domain;
        let style = &self.style;
        self.surface.repaint(|handle| {
            render_time_range_filter(handle, full_domain, style);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FILTER_AXIS_PADDING_PX, filter_scale};
    use crate::core::{Domain, Scale, Viewport};

    #[test]
    fn scale_spans_width_inside_padding() {
        let scale = filter_scale(Domain::new(0.0, 1_000.0), Viewport::new(224, 40)).expect("scale");
        assert_eq!(scale.length(), 224.0 - 2.0 * FILTER_AXIS_PADDING_PX);
        assert_eq!(scale.project(1_000.0), 200.0);
    }

    #[test]
    fn narrow_strip_has_no_scale() {
        assert!(filter_scale(Domain::new(0.0, 1.0), Viewport::new(20, 40)).is_none());
        assert!(filter_scale(Domain::new(0.0, 1.0), Viewport::new(200, 0)).is_none());
    }
}
