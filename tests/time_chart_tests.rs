use diagnostics_chart::api::{
    SensorType, TimeChart, TimeChartConfig, TimeChartState, chart_projector, render_time_chart,
};
use diagnostics_chart::core::{Domain, PixelPoint, Sample, Scale, Viewport, samples_from_json};
use diagnostics_chart::render::{MAX_POINT_MARKERS, NullRenderer, SurfaceHandle};

// Default insets leave a 400x200 plot inside this viewport.
const VIEWPORT: Viewport = Viewport {
    width: 472,
    height: 236,
};

fn series(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample::new(i as f64 * 1_000.0, (i % 7) as f64))
        .collect()
}

fn circles_for(count: usize) -> usize {
    let mut handle = SurfaceHandle::new(VIEWPORT, 1.0);
    render_time_chart(&mut handle, &series(count), &TimeChartConfig::default())
        .expect("projector");
    handle.frame().circles.len()
}

#[test]
fn point_markers_are_capped() {
    assert_eq!(circles_for(99), 99);
    assert_eq!(circles_for(MAX_POINT_MARKERS), MAX_POINT_MARKERS);
    assert_eq!(circles_for(101), 0);
}

#[test]
fn line_is_drawn_regardless_of_marker_cap() {
    let mut handle = SurfaceHandle::new(VIEWPORT, 1.0);
    render_time_chart(&mut handle, &series(500), &TimeChartConfig::default()).expect("projector");

    let frame = handle.frame();
    assert_eq!(frame.polylines.len(), 1);
    assert_eq!(frame.polylines[0].points.len(), 500);
    assert!(frame.circles.is_empty());
}

#[test]
fn epoch_range_widens_time_domain() {
    let samples = vec![Sample::new(0.0, 1.0), Sample::new(10_000.0, 2.0)];
    let config = TimeChartConfig::default().with_epoch_range(Domain::new(-5_000.0, 15_000.0));

    let projector = chart_projector(&samples, VIEWPORT, &config).expect("projector");

    assert_eq!(projector.x_scale().domain(), Domain::new(-5_000.0, 15_000.0));
    assert_eq!(projector.points()[0].x, 100.0);
    assert_eq!(projector.points()[1].x, 300.0);
}

#[test]
fn target_range_widens_value_domain() {
    let samples = vec![Sample::new(0.0, 36.9), Sample::new(1_000.0, 37.1)];
    let config = TimeChartConfig::new(SensorType::Temperature)
        .with_target_range(Domain::new(36.0, 38.0));

    let projector = chart_projector(&samples, VIEWPORT, &config).expect("projector");

    assert_eq!(projector.y_scale().domain(), Domain::new(36.0, 38.0));
}

#[test]
fn flat_series_projects_to_finite_points() {
    let samples = vec![Sample::new(5_000.0, 3.0); 4];
    let projector =
        chart_projector(&samples, VIEWPORT, &TimeChartConfig::default()).expect("projector");

    for point in projector.points() {
        assert!(point.x.is_finite() && point.y.is_finite());
    }
}

#[test]
fn points_are_offset_by_plot_insets() {
    let samples = series(2);
    let projector =
        chart_projector(&samples, VIEWPORT, &TimeChartConfig::default()).expect("projector");

    assert_eq!(projector.offset(), PixelPoint::new(56.0, 8.0));
    assert_eq!(projector.origin(), PixelPoint::new(56.0, 208.0));
    assert_eq!(projector.surface_points()[0], PixelPoint::new(56.0, 208.0));
}

#[test]
fn value_axis_uses_sensor_formatter() {
    let mut handle = SurfaceHandle::new(VIEWPORT, 1.0);
    let samples = vec![Sample::new(0.0, 1.0), Sample::new(1_000.0, 2.0)];
    render_time_chart(
        &mut handle,
        &samples,
        &TimeChartConfig::new(SensorType::GForce),
    )
    .expect("projector");

    let labels: Vec<&str> = handle
        .frame()
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(labels.contains(&"1.0"));
    assert!(labels.contains(&"2.0"));
}

#[test]
fn chart_lifecycle_moves_through_states() {
    let mut chart =
        TimeChart::new(NullRenderer::default(), TimeChartConfig::default()).expect("chart");
    assert_eq!(chart.state(), TimeChartState::Uninitialized);

    assert_eq!(
        chart.set_dimensions(VIEWPORT).expect("resize"),
        TimeChartState::Painted
    );
    assert!(chart.projector().is_none());
    assert!(
        chart
            .renderer()
            .last_frame
            .as_ref()
            .is_some_and(|frame| frame.is_empty())
    );

    chart.set_samples(series(3)).expect("samples");
    assert!(chart.projector().is_some());
    assert_eq!(chart.renderer().last_circle_count(), 3);
}

#[test]
fn resizing_never_leaks_surfaces() {
    let mut renderer = NullRenderer::default();
    {
        let mut chart = TimeChart::new(&mut renderer, TimeChartConfig::default()).expect("chart");
        chart.set_samples(series(10)).expect("samples");
        chart.set_dimensions(VIEWPORT).expect("resize");
        chart.set_dimensions(Viewport::new(640, 320)).expect("resize");
        chart.set_dimensions(Viewport::new(640, 320)).expect("resize");
        assert_eq!(chart.renderer().live_allocations(), 1);

        chart.set_dimensions(Viewport::new(640, 0)).expect("resize");
        assert_eq!(chart.renderer().live_allocations(), 0);
        assert_eq!(chart.state(), TimeChartState::Uninitialized);

        chart.set_dimensions(VIEWPORT).expect("resize");
        assert_eq!(chart.renderer().live_allocations(), 1);
    }

    assert_eq!(renderer.allocations, 3);
    assert_eq!(renderer.releases, 3);
    assert_eq!(renderer.live_allocations(), 0);
}

#[test]
fn device_pixel_ratio_scales_physical_output() {
    let config = TimeChartConfig::default().with_device_pixel_ratio(2.0);
    let mut chart = TimeChart::new(NullRenderer::default(), config).expect("chart");
    chart.set_samples(series(2)).expect("samples");
    chart.set_dimensions(VIEWPORT).expect("resize");

    assert_eq!(
        chart.renderer().physical_size,
        Some(Viewport::new(944, 472))
    );
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.polylines[0].points[0], PixelPoint::new(112.0, 416.0));
}

#[test]
fn decoded_samples_feed_the_chart() {
    let samples = samples_from_json(
        r#"[
            {"time": "2024-03-01T12:00:00Z", "value": 1.0},
            {"time": "2024-03-01T12:01:00Z", "value": 3.0}
        ]"#,
    )
    .expect("samples");
    let projector =
        chart_projector(&samples, VIEWPORT, &TimeChartConfig::default()).expect("projector");

    assert_eq!(projector.x_scale().domain().span(), 60_000.0);
    assert_eq!(projector.points()[1], PixelPoint::new(400.0, 0.0));
}

#[test]
fn subnormal_value_span_still_paints() {
    let mut chart =
        TimeChart::new(NullRenderer::default(), TimeChartConfig::default()).expect("chart");
    chart.set_dimensions(VIEWPORT).expect("resize");
    let state = chart
        .set_samples(vec![Sample::new(0.0, 0.0), Sample::new(1_000.0, 1e-310)])
        .expect("samples");

    assert_eq!(state, TimeChartState::Painted);
    assert_eq!(chart.renderer().last_polyline_count(), 1);
    let projector = chart.projector().expect("projector");
    assert!(
        projector
            .points()
            .iter()
            .all(|point| point.y.is_finite())
    );
}
