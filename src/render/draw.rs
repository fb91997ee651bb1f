use tracing::trace;

use crate::core::PixelPoint;
use crate::render::{
    CirclePrimitive, Color, PolylinePrimitive, RectPrimitive, StrokeStyle, SurfaceHandle,
};

/// Point markers are skipped above this many points to bound per-frame cost.
pub const MAX_POINT_MARKERS: usize = 100;

/// Strokes one continuous path through `points` in the given order.
///
/// Points are in logical surface pixels. Returns `false` when fewer than two
/// points make a path.
pub fn draw_polyline(handle: &mut SurfaceHandle, points: &[PixelPoint], style: StrokeStyle) -> bool {
    if points.len() < 2 {
        return false;
    }

    let ratio = handle.device_pixel_ratio();
    let physical = points
        .iter()
        .map(|point| PixelPoint::new(point.x * ratio, point.y * ratio))
        .collect();
    handle.push_polyline(PolylinePrimitive::new(
        physical,
        style.width * ratio,
        style.color,
    ));
    true
}

/// Draws a filled marker at every point, unless there are more than
/// [`MAX_POINT_MARKERS`] of them.
///
/// Returns whether markers were drawn.
pub fn draw_points(
    handle: &mut SurfaceHandle,
    points: &[PixelPoint],
    radius: f64,
    color: Color,
) -> bool {
    if points.is_empty() || !radius.is_finite() || radius <= 0.0 {
        return false;
    }
    if points.len() > MAX_POINT_MARKERS {
        trace!(
            count = points.len(),
            cap = MAX_POINT_MARKERS,
            "skipping point markers"
        );
        return false;
    }

    let ratio = handle.device_pixel_ratio();
    for point in points {
        handle.push_circle(CirclePrimitive::new(
            point.x * ratio,
            point.y * ratio,
            radius * ratio,
            color,
        ));
    }
    true
}

/// Fills a rectangle given in logical pixels.
pub fn fill_rect(handle: &mut SurfaceHandle, x: f64, y: f64, width: f64, height: f64, color: Color) {
    let ratio = handle.device_pixel_ratio();
    handle.push_rect(RectPrimitive::new(
        x * ratio,
        y * ratio,
        width.max(0.0) * ratio,
        height.max(0.0) * ratio,
        color,
    ));
}

#[cfg(test)]
mod tests {
    use super::{MAX_POINT_MARKERS, draw_points, draw_polyline, fill_rect};
    use crate::core::{PixelPoint, Viewport};
    use crate::render::{Color, StrokeStyle, SurfaceHandle};

    fn points(count: usize) -> Vec<PixelPoint> {
        (0..count)
            .map(|index| PixelPoint::new(index as f64, (index % 7) as f64))
            .collect()
    }

    #[test]
    fn polyline_is_one_path_in_supplied_order() {
        let mut handle = SurfaceHandle::new(Viewport::new(100, 100), 1.0);
        let unordered = vec![
            PixelPoint::new(30.0, 1.0),
            PixelPoint::new(10.0, 2.0),
            PixelPoint::new(20.0, 3.0),
        ];
        assert!(draw_polyline(
            &mut handle,
            &unordered,
            StrokeStyle::new(Color::rgb(0.0, 0.0, 0.0), 1.0)
        ));
        let frame = handle.frame();
        assert_eq!(frame.polylines.len(), 1);
        assert_eq!(frame.polylines[0].points, unordered);
    }

    #[test]
    fn polyline_needs_two_points() {
        let mut handle = SurfaceHandle::new(Viewport::new(100, 100), 1.0);
        let style = StrokeStyle::new(Color::rgb(0.0, 0.0, 0.0), 1.0);
        assert!(!draw_polyline(&mut handle, &points(1), style));
        assert!(handle.frame().is_empty());
    }

    #[test]
    fn markers_stop_above_cap() {
        let color = Color::rgb(1.0, 0.0, 0.0);

        let mut handle = SurfaceHandle::new(Viewport::new(200, 100), 1.0);
        assert!(draw_points(&mut handle, &points(MAX_POINT_MARKERS), 2.0, color));
        assert_eq!(handle.frame().circles.len(), MAX_POINT_MARKERS);

        let mut handle = SurfaceHandle::new(Viewport::new(200, 100), 1.0);
        assert!(!draw_points(&mut handle, &points(MAX_POINT_MARKERS + 1), 2.0, color));
        assert!(handle.frame().circles.is_empty());
    }

    #[test]
    fn coordinates_are_scaled_by_device_pixel_ratio() {
        let mut handle = SurfaceHandle::new(Viewport::new(100, 100), 2.0);
        let color = Color::rgb(0.0, 0.0, 1.0);
        draw_polyline(
            &mut handle,
            &[PixelPoint::new(1.0, 2.0), PixelPoint::new(3.0, 4.0)],
            StrokeStyle::new(color, 1.5),
        );
        draw_points(&mut handle, &[PixelPoint::new(5.0, 6.0)], 2.0, color);
        fill_rect(&mut handle, 1.0, 1.0, 10.0, 4.0, color);

        let frame = handle.frame();
        assert_eq!(frame.polylines[0].points[1], PixelPoint::new(6.0, 8.0));
        assert_eq!(frame.polylines[0].stroke_width, 3.0);
        assert_eq!(frame.circles[0].x, 10.0);
        assert_eq!(frame.circles[0].radius, 4.0);
        assert_eq!(frame.rects[0].width, 20.0);
    }
}
