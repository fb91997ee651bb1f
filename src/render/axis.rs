use serde::{Deserialize, Serialize};

use crate::core::{Scale, TimeScale, format_time_tick};
use crate::render::{
    LinePrimitive, StrokeStyle, SurfaceHandle, TextHAlign, TextPrimitive, TextStyle, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisOrientation {
    X,
    Y,
}

/// Side of the ruled line that labels are placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisPlacement {
    Above,
    Below,
    Left,
    Right,
}

impl AxisPlacement {
    /// Sign of the cross-axis offset from the line toward the labels.
    fn cross_sign(self) -> f64 {
        match self {
            Self::Below | Self::Right => 1.0,
            Self::Above | Self::Left => -1.0,
        }
    }
}

/// Whether tick marks point toward the labels or back across the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickDirection {
    Outward,
    Inward,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    pub mark: StrokeStyle,
    pub label: TextStyle,
    /// Mark length in logical pixels.
    pub size: f64,
    /// Gap between the mark end and its label.
    pub padding: f64,
}

/// Geometry of one axis in logical surface pixels.
///
/// `offset` is added to every scale pixel along the axis; `position` is the
/// cross-axis coordinate of the ruled line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub orientation: AxisOrientation,
    pub placement: AxisPlacement,
    pub direction: TickDirection,
    pub offset: f64,
    pub position: f64,
    pub tick_count: usize,
    pub tick_style: TickStyle,
    pub line_style: StrokeStyle,
}

/// One computed tick: pixel position along the axis and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pixel_position: f64,
    pub label: String,
}

/// Computes ticks for `scale`, labelling each through `label_for_tick`.
///
/// With no formatter the value is printed as-is.
pub fn compute_ticks<S>(
    scale: &S,
    layout: &AxisLayout,
    label_for_tick: Option<&dyn Fn(f64) -> String>,
) -> Vec<Tick>
where
    S: Scale + ?Sized,
{
    let ticks = scale.ticks(layout.tick_count);
    ticks
        .values
        .iter()
        .map(|value| Tick {
            value: *value,
            pixel_position: layout.offset + scale.project(*value),
            label: match label_for_tick {
                Some(format) => format(*value),
                None => format!("{value}"),
            },
        })
        .collect()
}

/// Draws a ruled axis with labelled ticks and returns the ticks drawn.
///
/// Renders nothing when `scale` is absent or the surface has no extent.
pub fn render_axis<S>(
    scale: Option<&S>,
    layout: &AxisLayout,
    label_for_tick: Option<&dyn Fn(f64) -> String>,
    handle: &mut SurfaceHandle,
) -> Vec<Tick>
where
    S: Scale + ?Sized,
{
    let Some(scale) = scale else {
        return Vec::new();
    };
    if !handle.has_extent() {
        return Vec::new();
    }

    let ticks = compute_ticks(scale, layout, label_for_tick);
    paint_axis(scale, layout, &ticks, handle);
    ticks
}

/// Time axis variant: clock-aligned ticks, labelled with a step-aware clock
/// format unless a formatter is injected.
pub fn render_time_axis(
    scale: Option<&TimeScale>,
    layout: &AxisLayout,
    label_for_tick: Option<&dyn Fn(f64) -> String>,
    handle: &mut SurfaceHandle,
) -> Vec<Tick> {
    let Some(scale) = scale else {
        return Vec::new();
    };
    if label_for_tick.is_some() {
        return render_axis(Some(scale), layout, label_for_tick, handle);
    }

    let step = scale.ticks(layout.tick_count).step;
    let clock_label = move |value: f64| format_time_tick(value, step);
    render_axis(Some(scale), layout, Some(&clock_label), handle)
}

fn paint_axis<S>(scale: &S, layout: &AxisLayout, ticks: &[Tick], handle: &mut SurfaceHandle)
where
    S: Scale + ?Sized,
{
    let ratio = handle.device_pixel_ratio();
    let range = scale.range();
    let along_start = layout.offset + range.lower();
    let along_end = layout.offset + range.upper();
    let cross = layout.position;

    let sign = layout.placement.cross_sign();
    let mark_sign = match layout.direction {
        TickDirection::Outward => sign,
        TickDirection::Inward => -sign,
    };
    let style = layout.tick_style;
    let outward_extent = if layout.direction == TickDirection::Outward {
        style.size
    } else {
        0.0
    };
    let label_cross = cross + sign * (outward_extent + style.padding);

    // Maps (along, cross) logical coordinates to physical (x, y).
    let to_xy = |along: f64, across: f64| -> (f64, f64) {
        match layout.orientation {
            AxisOrientation::X => (along * ratio, across * ratio),
            AxisOrientation::Y => (across * ratio, along * ratio),
        }
    };

    let (x1, y1) = to_xy(along_start, cross);
    let (x2, y2) = to_xy(along_end, cross);
    handle.push_line(LinePrimitive::new(
        x1,
        y1,
        x2,
        y2,
        layout.line_style.width * ratio,
        layout.line_style.color,
    ));

    let (h_align, v_align) = label_alignment(layout.orientation, layout.placement);
    for tick in ticks {
        let (mx1, my1) = to_xy(tick.pixel_position, cross);
        let (mx2, my2) = to_xy(tick.pixel_position, cross + mark_sign * style.size);
        handle.push_line(LinePrimitive::new(
            mx1,
            my1,
            mx2,
            my2,
            style.mark.width * ratio,
            style.mark.color,
        ));

        if tick.label.is_empty() {
            continue;
        }
        let (tx, ty) = to_xy(tick.pixel_position, label_cross);
        handle.push_text(TextPrimitive::new(
            tick.label.clone(),
            tx,
            ty,
            style.label.font_size_px * ratio,
            style.label.color,
            h_align,
            v_align,
        ));
    }
}

fn label_alignment(orientation: AxisOrientation, placement: AxisPlacement) -> (TextHAlign, TextVAlign) {
    match (orientation, placement) {
        (AxisOrientation::X, AxisPlacement::Below | AxisPlacement::Right) => {
            (TextHAlign::Center, TextVAlign::Top)
        }
        (AxisOrientation::X, AxisPlacement::Above | AxisPlacement::Left) => {
            (TextHAlign::Center, TextVAlign::Bottom)
        }
        (AxisOrientation::Y, AxisPlacement::Left | AxisPlacement::Above) => {
            (TextHAlign::Right, TextVAlign::Middle)
        }
        (AxisOrientation::Y, AxisPlacement::Right | AxisPlacement::Below) => {
            (TextHAlign::Left, TextVAlign::Middle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AxisLayout, AxisOrientation, AxisPlacement, TickDirection, TickStyle, render_axis,
        render_time_axis,
    };
    use crate::core::{Domain, LinearScale, PixelRange, TimeScale, Viewport};
    use crate::render::{Color, StrokeStyle, SurfaceHandle, TextHAlign, TextStyle, TextVAlign};

    fn layout(orientation: AxisOrientation, placement: AxisPlacement) -> AxisLayout {
        let black = Color::rgb(0.0, 0.0, 0.0);
        AxisLayout {
            orientation,
            placement,
            direction: TickDirection::Outward,
            offset: 10.0,
            position: 50.0,
            tick_count: 5,
            tick_style: TickStyle {
                mark: StrokeStyle::new(black, 1.0),
                label: TextStyle::new(black, 10.0),
                size: 4.0,
                padding: 2.0,
            },
            line_style: StrokeStyle::new(black, 1.0),
        }
    }

    #[test]
    fn x_axis_places_ticks_through_scale_with_offset() {
        let scale = LinearScale::new(Domain::new(0.0, 100.0), PixelRange::new(0.0, 200.0));
        let mut handle = SurfaceHandle::new(Viewport::new(300, 100), 1.0);
        let ticks = render_axis(
            Some(&scale),
            &layout(AxisOrientation::X, AxisPlacement::Below),
            None,
            &mut handle,
        );

        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[1].pixel_position, 50.0);
        assert_eq!(ticks[1].label, "20");

        let frame = handle.frame();
        assert_eq!(frame.lines.len(), 1 + ticks.len());
        assert_eq!(frame.lines[0].x1, 10.0);
        assert_eq!(frame.lines[0].x2, 210.0);
        assert_eq!(frame.lines[1].y2, 54.0);
        assert_eq!(frame.texts[0].y, 56.0);
        assert_eq!(frame.texts[0].v_align, TextVAlign::Top);
    }

    #[test]
    fn y_axis_left_labels_are_right_aligned() {
        let scale = LinearScale::new(Domain::new(0.0, 10.0), PixelRange::new(100.0, 0.0));
        let mut handle = SurfaceHandle::new(Viewport::new(300, 200), 1.0);
        let format = |value: f64| format!("{value:.2}");
        let ticks = render_axis(
            Some(&scale),
            &layout(AxisOrientation::Y, AxisPlacement::Left),
            Some(&format),
            &mut handle,
        );

        assert_eq!(ticks[0].label, "0.00");
        assert_eq!(ticks[0].pixel_position, 110.0);
        let text = &handle.frame().texts[0];
        assert_eq!(text.h_align, TextHAlign::Right);
        assert_eq!(text.x, 44.0);
    }

    #[test]
    fn missing_scale_or_extent_draws_nothing() {
        let mut handle = SurfaceHandle::new(Viewport::new(300, 100), 1.0);
        let ticks = render_axis::<LinearScale>(
            None,
            &layout(AxisOrientation::X, AxisPlacement::Below),
            None,
            &mut handle,
        );
        assert!(ticks.is_empty());
        assert!(handle.frame().is_empty());

        let scale = LinearScale::new(Domain::new(0.0, 1.0), PixelRange::new(0.0, 10.0));
        let mut empty = SurfaceHandle::new(Viewport::new(0, 100), 1.0);
        let ticks = render_axis(
            Some(&scale),
            &layout(AxisOrientation::X, AxisPlacement::Below),
            None,
            &mut empty,
        );
        assert!(ticks.is_empty());
        assert!(empty.frame().is_empty());
    }

    #[test]
    fn time_axis_uses_clock_labels_by_default() {
        let start = 1_709_294_400_000.0;
        let scale = TimeScale::new(
            Domain::new(start, start + 60_000.0),
            PixelRange::new(0.0, 300.0),
        );
        let mut handle = SurfaceHandle::new(Viewport::new(400, 100), 1.0);
        let ticks = render_time_axis(
            Some(&scale),
            &layout(AxisOrientation::X, AxisPlacement::Below),
            None,
            &mut handle,
        );
        assert_eq!(ticks[0].label, "12:00:00");
        assert_eq!(ticks[1].label, "12:00:15");
    }

    #[test]
    fn device_pixel_ratio_scales_axis_geometry() {
        let scale = LinearScale::new(Domain::new(0.0, 100.0), PixelRange::new(0.0, 200.0));
        let mut handle = SurfaceHandle::new(Viewport::new(300, 100), 2.0);
        render_axis(
            Some(&scale),
            &layout(AxisOrientation::X, AxisPlacement::Below),
            None,
            &mut handle,
        );
        let frame = handle.frame();
        assert_eq!(frame.lines[0].x2, 420.0);
        assert_eq!(frame.texts[0].font_size_px, 20.0);
    }
}
