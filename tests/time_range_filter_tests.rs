use std::cell::RefCell;
use std::rc::Rc;

use diagnostics_chart::api::{
    ChartStyle, FILTER_AXIS_PADDING_PX, TimeRangeFilter, render_time_range_filter,
};
use diagnostics_chart::core::{Domain, Scale, Viewport};
use diagnostics_chart::render::{NullRenderer, SurfaceHandle};

const HOUR_MS: f64 = 3_600_000.0;

#[test]
fn filter_draws_only_a_time_axis() {
    let mut handle = SurfaceHandle::new(Viewport::new(624, 40), 1.0);
    let scale = render_time_range_filter(&mut handle, Domain::new(0.0, HOUR_MS), &ChartStyle::default())
        .expect("scale");

    let frame = handle.frame();
    assert!(frame.polylines.is_empty());
    assert!(frame.circles.is_empty());
    assert!(frame.rects.is_empty());
    assert!(!frame.lines.is_empty());
    assert!(frame.texts.iter().all(|text| text.text.contains(':')));
    assert_eq!(scale.length(), 600.0);
    assert_eq!(frame.lines[0].x1, FILTER_AXIS_PADDING_PX);
}

#[test]
fn slider_callbacks_receive_clamped_ranges() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let releases = Rc::new(RefCell::new(Vec::new()));
    let change_sink = Rc::clone(&changes);
    let release_sink = Rc::clone(&releases);

    let mut filter = TimeRangeFilter::new(
        NullRenderer::default(),
        Domain::new(0.0, HOUR_MS),
        Viewport::new(624, 40),
        1.0,
        move |range| change_sink.borrow_mut().push(range),
        move |range| release_sink.borrow_mut().push(range),
    )
    .expect("filter");

    filter.slider_changed(Domain::new(-10_000.0, 0.5 * HOUR_MS));
    filter.slider_changed(Domain::new(0.25 * HOUR_MS, 2.0 * HOUR_MS));
    filter.slider_released(Domain::new(0.25 * HOUR_MS, 0.75 * HOUR_MS));

    assert_eq!(
        changes.borrow().as_slice(),
        &[
            Domain::new(0.0, 0.5 * HOUR_MS),
            Domain::new(0.25 * HOUR_MS, HOUR_MS)
        ]
    );
    assert_eq!(
        releases.borrow().as_slice(),
        &[Domain::new(0.25 * HOUR_MS, 0.75 * HOUR_MS)]
    );
}

#[test]
fn domain_and_size_changes_repaint() {
    let mut renderer = NullRenderer::default();
    {
        let mut filter = TimeRangeFilter::new(
            &mut renderer,
            Domain::new(0.0, HOUR_MS),
            Viewport::new(624, 40),
            2.0,
            |_| {},
            |_| {},
        )
        .expect("filter");
        assert_eq!(filter.renderer().frames_rendered, 1);

        filter
            .set_full_domain(Domain::new(0.0, 2.0 * HOUR_MS))
            .expect("domain");
        filter
            .set_full_domain(Domain::new(0.0, 2.0 * HOUR_MS))
            .expect("domain");
        assert_eq!(filter.renderer().frames_rendered, 2);

        filter.set_dimensions(Viewport::new(324, 40)).expect("resize");
        assert_eq!(filter.renderer().frames_rendered, 3);
        assert_eq!(
            filter.renderer().physical_size,
            Some(Viewport::new(648, 80))
        );
        assert_eq!(filter.scale().expect("scale").length(), 300.0);
    }

    assert_eq!(renderer.live_allocations(), 0);
}
