use timeline_rs::api::{FixedClock, TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{
    MILLIS_PER_DAY, TimeRange, TimelineEvent, TimelineRow, TimelineSegment, Viewport,
};
use timeline_rs::render::NullRenderer;
use timeline_rs::{TimelineError, telemetry};

// 2024-01-01T00:00:00Z
const T0: i64 = 1_704_067_200_000;

fn engine_at(now: i64) -> TimelineEngine<NullRenderer> {
    TimelineEngine::new(
        NullRenderer::default(),
        Viewport::new(1000, 600),
        TimelineEngineConfig::default(),
    )
    .expect("engine init")
    .with_clock(FixedClock(now))
}

fn thesis_rows() -> Vec<TimelineRow> {
    vec![
        TimelineRow::new("t1", "phd", "PhD")
            .with_column("Ada Lovelace")
            .with_segment(TimelineSegment::new(T0, T0 + 60 * MILLIS_PER_DAY, "primary"))
            .with_segment(TimelineSegment::new(
                T0 + 60 * MILLIS_PER_DAY,
                T0 + 120 * MILLIS_PER_DAY,
                "success",
            ))
            .with_event(TimelineEvent::new(T0 + 100 * MILLIS_PER_DAY, "flag")),
        TimelineRow::new("t2", "msc", "Master")
            .with_column("Alan Turing")
            .with_segment(TimelineSegment::new(
                T0 + 30 * MILLIS_PER_DAY,
                T0 + 90 * MILLIS_PER_DAY,
                "#aa3300",
            )),
    ]
}

#[test]
fn engine_smoke_flow() {
    let now = T0 + 110 * MILLIS_PER_DAY;
    let mut engine = engine_at(now);
    engine.set_rows(thesis_rows());

    assert_eq!(
        engine.total_range(),
        Some(TimeRange::new(T0, T0 + 120 * MILLIS_PER_DAY))
    );
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0 + 20 * MILLIS_PER_DAY, now))
    );

    let view = engine.view().expect("view");
    assert_eq!(view.now, now);
    assert_eq!(view.projection.groups.len(), 2);
    assert_eq!(view.projection.groups[0].group_id, "phd");
    assert!(!view.ticks.is_empty());
    assert!(view.ticks.len() <= engine.config().max_ticks);
    assert!(view.ticks.windows(2).all(|pair| pair[0].value <= pair[1].value));
    assert_eq!(view.slider_labels.0, "01/21/2024");

    engine.render().expect("render should succeed");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert!(engine.renderer().last_rect_count > 0);
    assert!(engine.renderer().last_text_count > 0);
}

#[test]
fn empty_rows_render_nothing() {
    let mut engine = engine_at(T0);
    engine.set_rows(Vec::new());

    assert!(engine.view().is_none());
    assert!(engine.total_range().is_none());
    assert!(engine.zoom(0.5).is_none());
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.is_empty());
    assert!(frame.hit_regions.is_empty());

    engine.render().expect("render should succeed");
    assert_eq!(engine.renderer().last_rect_count, 0);
}

#[test]
fn rows_without_time_data_render_nothing() {
    let mut engine = engine_at(T0);
    engine.set_rows(vec![TimelineRow::new("t1", "phd", "PhD").with_column("Ada")]);

    assert!(engine.view().is_none());
    assert!(engine.build_render_frame().expect("frame").is_empty());
}

#[test]
fn single_instant_data_is_padded_to_a_usable_window() {
    let mut engine = engine_at(T0 + MILLIS_PER_DAY);
    engine.set_rows(vec![
        TimelineRow::new("t1", "phd", "PhD").with_event(TimelineEvent::new(T0, "flag")),
    ]);

    let total = engine.total_range().expect("total");
    assert!(total.duration() > 0);
    assert!(total.contains(T0));

    let view = engine.view().expect("view");
    assert!(view.visible_range.duration() > 0);
    let event = &view.projection.groups[0].rows[0].events[0];
    assert!(event.left_pct.is_finite());
    assert!((0.0..=100.0).contains(&event.left_pct));

    engine.render().expect("render should succeed");
}

#[test]
fn zero_length_segment_renders_with_minimum_width() {
    let mut engine = engine_at(T0 + 10 * MILLIS_PER_DAY);
    engine.set_rows(vec![
        TimelineRow::new("t1", "phd", "PhD")
            .with_segment(TimelineSegment::new(T0, T0 + 10 * MILLIS_PER_DAY, "primary"))
            .with_segment(TimelineSegment::new(
                T0 + 5 * MILLIS_PER_DAY,
                T0 + 5 * MILLIS_PER_DAY,
                "warning",
            )),
    ]);

    let frame = engine.build_render_frame().expect("frame");
    frame.validate().expect("valid frame");
    let min_width = engine.render_style().min_segment_width_px;
    assert!(frame.rects.iter().any(|rect| rect.width == min_width));
}

#[test]
fn malformed_segment_is_clamped_at_render_time() {
    let mut engine = engine_at(T0 + 10 * MILLIS_PER_DAY);
    engine.set_rows(vec![
        TimelineRow::new("t1", "phd", "PhD")
            .with_segment(TimelineSegment::new(T0, T0 + 10 * MILLIS_PER_DAY, "primary"))
            .with_segment(TimelineSegment::new(
                T0 + 6 * MILLIS_PER_DAY,
                T0 + 4 * MILLIS_PER_DAY,
                "error",
            )),
    ]);

    let view = engine.view().expect("view");
    let malformed = &view.projection.groups[0].rows[0].segments[1];
    assert!(malformed.width_pct < 0.0);

    engine.render().expect("negative widths never reach the renderer");
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = TimelineEngine::new(
        NullRenderer::default(),
        Viewport::new(0, 600),
        TimelineEngineConfig::default(),
    )
    .err()
    .expect("must fail");
    assert!(matches!(
        err,
        TimelineError::InvalidViewport {
            width: 0,
            height: 600
        }
    ));
}

#[test]
fn label_column_wider_than_viewport_is_reported() {
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        Viewport::new(200, 600),
        TimelineEngineConfig::default(),
    )
    .expect("engine init")
    .with_clock(FixedClock(T0 + 110 * MILLIS_PER_DAY));
    engine.set_rows(thesis_rows());

    let err = engine.render().expect_err("no chart area");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn data_refresh_keeps_explicit_range_clamped() {
    let mut engine = engine_at(T0 + 110 * MILLIS_PER_DAY);
    engine.set_rows(thesis_rows());
    engine
        .set_visible_range(TimeRange::new(T0 + 10 * MILLIS_PER_DAY, T0 + 50 * MILLIS_PER_DAY))
        .expect("range set");

    engine.set_rows(vec![
        TimelineRow::new("t3", "phd", "PhD").with_segment(TimelineSegment::new(
            T0 + 20 * MILLIS_PER_DAY,
            T0 + 40 * MILLIS_PER_DAY,
            "primary",
        )),
    ]);
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0 + 20 * MILLIS_PER_DAY, T0 + 40 * MILLIS_PER_DAY))
    );

    engine.reset_visible_range();
    assert_eq!(
        engine.visible_range(),
        Some(TimeRange::new(T0 + 20 * MILLIS_PER_DAY, T0 + 40 * MILLIS_PER_DAY))
    );
}

#[test]
fn timestamps_near_the_i64_floor_stay_total() {
    let now = T0 + 5 * MILLIS_PER_DAY;
    let mut engine = engine_at(now);
    engine.set_rows(vec![
        TimelineRow::new("t1", "phd", "PhD")
            .with_event(TimelineEvent::new(i64::MIN + 5, "flag"))
            .with_event(TimelineEvent::new(now, "flag")),
    ]);

    let total = engine.total_range().expect("total");
    assert_eq!(total, TimeRange::new(i64::MIN + 5, now));
    let visible = engine.visible_range().expect("visible");
    assert_eq!(visible.end, now);
    assert!(visible.is_within(total));
    engine.render().expect("render");

    assert_eq!(engine.zoom(1.0e9), Some(total));
    assert_eq!(engine.pan(MILLIS_PER_DAY), Some(total));
    let view = engine.view().expect("view");
    assert!(view.ticks.iter().all(|tick| total.contains(tick.value)));
    engine.build_render_frame().expect("frame").validate().expect("valid frame");
    assert!(engine.on_slider_change(i64::MIN, i64::MAX).is_some());
}

#[test]
fn default_tracing_without_feature_is_a_no_op() {
    if cfg!(feature = "telemetry") {
        return;
    }
    assert!(!telemetry::init_default_tracing());
}
