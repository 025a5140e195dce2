use std::rc::Rc;

use timeline_rs::api::{FixedClock, TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{MILLIS_PER_DAY, TimeRange, TimelineRow, TimelineSegment, Viewport};
use timeline_rs::interaction::{HeadlessNativeZoomHost, TouchPoint, WheelInput, WheelOutcome};
use timeline_rs::render::NullRenderer;

// 2024-01-01T00:00:00Z
const T0: i64 = 1_704_067_200_000;
const DAY: i64 = MILLIS_PER_DAY;

/// 100 days of data, 30-day default window, "now" at the data end.
fn hundred_day_engine() -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::default().with_default_window_millis(30 * DAY);
    let mut engine = TimelineEngine::new(NullRenderer::default(), Viewport::new(1200, 700), config)
        .expect("engine init")
        .with_clock(FixedClock(T0 + 100 * DAY));
    engine.set_rows(vec![
        TimelineRow::new("t1", "phd", "PhD")
            .with_segment(TimelineSegment::new(T0, T0 + 100 * DAY, "primary")),
    ]);
    engine
}

fn two_fingers(distance: f64) -> [TouchPoint; 2] {
    [TouchPoint::new(10.0, 50.0), TouchPoint::new(10.0 + distance, 50.0)]
}

#[test]
fn pinch_spread_halves_the_window_around_its_midpoint() {
    let mut engine = hundred_day_engine();
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0 + 70 * DAY, T0 + 100 * DAY))
    );

    engine.on_touch_start(&two_fingers(100.0));
    assert!(engine.pinch_session().is_active());

    let zoomed = engine.on_touch_move(&two_fingers(200.0)).expect("zoomed");
    assert_eq!(zoomed.duration(), 15 * DAY);
    assert_eq!(zoomed, TimeRange::new(T0 + 70 * DAY + 15 * DAY / 2, T0 + 85 * DAY + 15 * DAY / 2));
    assert_eq!(engine.visible_range(), Some(zoomed));
}

#[test]
fn pinch_ends_when_fewer_than_two_touches_remain() {
    let mut engine = hundred_day_engine();
    engine.on_touch_start(&two_fingers(100.0));
    engine.on_touch_end(&[TouchPoint::new(10.0, 50.0)]);
    assert!(!engine.pinch_session().is_active());

    // A lone finger never zooms.
    assert!(engine.on_touch_move(&[TouchPoint::new(40.0, 50.0)]).is_none());
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0 + 70 * DAY, T0 + 100 * DAY))
    );
}

#[test]
fn pinch_pinching_out_widens_but_stays_within_data() {
    let mut engine = hundred_day_engine();
    engine.on_touch_start(&two_fingers(400.0));
    for distance in [300.0, 200.0, 100.0, 50.0, 10.0] {
        let range = engine.on_touch_move(&two_fingers(distance)).expect("zoomed");
        assert!(range.is_within(TimeRange::new(T0, T0 + 100 * DAY)));
    }
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0, T0 + 100 * DAY))
    );
}

#[test]
fn wheel_with_modifier_zooms_and_cancels_native_zoom() {
    let mut engine = hundred_day_engine();
    let before = engine.visible_range().expect("range");

    let outcome = engine.on_wheel(WheelInput::new(-120.0, true));
    assert_eq!(
        outcome,
        WheelOutcome {
            handled: true,
            prevent_default: true,
        }
    );
    let after_in = engine.visible_range().expect("range");
    assert!(after_in.duration() < before.duration());
    assert!((after_in.center() - before.center()).abs() <= 1.0);

    let outcome = engine.on_wheel(WheelInput::new(120.0, true));
    assert!(outcome.handled);
    let after_out = engine.visible_range().expect("range");
    assert!(after_out.duration() > after_in.duration());
}

#[test]
fn wheel_without_modifier_is_left_to_the_page() {
    let mut engine = hundred_day_engine();
    let before = engine.visible_range();

    let outcome = engine.on_wheel(WheelInput::new(-120.0, false));
    assert_eq!(outcome, WheelOutcome::default());
    assert!(!outcome.prevent_default);
    assert_eq!(engine.visible_range(), before);
}

#[test]
fn wheel_zoom_out_saturates_at_total_range() {
    let mut engine = hundred_day_engine();
    for _ in 0..200 {
        engine.on_wheel(WheelInput::new(240.0, true));
    }
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0, T0 + 100 * DAY))
    );
}

#[test]
fn slider_is_bound_to_total_and_visible_ranges() {
    let engine = hundred_day_engine();
    let slider = engine.slider().expect("slider");
    assert_eq!(slider.min, T0);
    assert_eq!(slider.max, T0 + 100 * DAY);
    assert_eq!(slider.step, DAY);
    assert_eq!(slider.value, TimeRange::new(T0 + 70 * DAY, T0 + 100 * DAY));
}

#[test]
fn slider_change_snaps_to_whole_days() {
    let mut engine = hundred_day_engine();
    let applied = engine
        .on_slider_change(T0 + 10 * DAY + 3 * 3_600_000, T0 + 20 * DAY - 2 * 3_600_000)
        .expect("applied");
    assert_eq!(applied, TimeRange::new(T0 + 10 * DAY, T0 + 20 * DAY));
    assert_eq!(engine.visible_range(), Some(applied));

    let swapped = engine
        .on_slider_change(T0 + 40 * DAY, T0 + 30 * DAY)
        .expect("applied");
    assert_eq!(swapped, TimeRange::new(T0 + 30 * DAY, T0 + 40 * DAY));
}

#[test]
fn slider_change_past_data_bounds_is_clamped() {
    let mut engine = hundred_day_engine();
    let applied = engine
        .on_slider_change(T0 + 95 * DAY, T0 + 400 * DAY)
        .expect("applied");
    assert_eq!(applied, TimeRange::new(T0 + 95 * DAY, T0 + 100 * DAY));
}

#[test]
fn slider_handles_on_the_same_day_keep_one_day_selected() {
    let mut engine = hundred_day_engine();
    let before_data = engine
        .on_slider_change(T0 - 50 * DAY, T0 - 50 * DAY + 1_000)
        .expect("applied");
    assert_eq!(before_data, TimeRange::new(T0, T0 + DAY));

    let mid = engine
        .on_slider_change(T0 + 50 * DAY + 3_600_000, T0 + 50 * DAY + 2 * 3_600_000)
        .expect("applied");
    assert_eq!(mid, TimeRange::new(T0 + 50 * DAY, T0 + 51 * DAY));

    let at_end = engine
        .on_slider_change(T0 + 100 * DAY, T0 + 100 * DAY)
        .expect("applied");
    assert_eq!(at_end, TimeRange::new(T0 + 99 * DAY, T0 + 100 * DAY));
    assert_eq!(engine.visible_range(), Some(at_end));
}

#[test]
fn pan_stops_at_data_bounds() {
    let mut engine = hundred_day_engine();
    let moved = engine.pan(30 * DAY).expect("panned");
    assert_eq!(moved, TimeRange::new(T0 + 70 * DAY, T0 + 100 * DAY));

    let moved = engine.pan(-500 * DAY).expect("panned");
    assert_eq!(moved, TimeRange::new(T0, T0 + 30 * DAY));
}

#[test]
fn mount_suppresses_native_zoom_until_unmount() {
    let host = Rc::new(HeadlessNativeZoomHost::default());
    let mut engine = hundred_day_engine();
    engine.toggle_group("phd");

    engine.mount(host.clone());
    assert!(engine.is_mounted());
    assert!(host.is_suppressing());

    engine.mount(host.clone());
    assert_eq!(host.active_count(), 1);
    assert_eq!(host.removed_count(), 1);

    engine.unmount();
    assert!(!engine.is_mounted());
    assert!(!host.is_suppressing());
    assert_eq!(host.removed_count(), 2);
    assert!(!engine.is_group_collapsed("phd"));
}

#[test]
fn dropping_a_mounted_engine_releases_the_listener() {
    let host = Rc::new(HeadlessNativeZoomHost::default());
    {
        let mut engine = hundred_day_engine();
        engine.mount(host.clone());
        assert!(host.is_suppressing());
    }
    assert!(!host.is_suppressing());
    assert_eq!(host.removed_count(), 1);
}
