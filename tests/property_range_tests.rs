use proptest::prelude::*;
use timeline_rs::api::{TimeAxisLabelConfig, generate_ticks};
use timeline_rs::core::{
    GroupCollapseState, MILLIS_PER_DAY, RangeController, TimeRange, TimelineRow, TimelineSegment,
    clamp, project_rows, scale_around_center, shift_within,
};

// 2000-01-01T00:00:00Z .. 2040-01-01T00:00:00Z
const MIN_MILLIS: i64 = 946_684_800_000;
const MAX_MILLIS: i64 = 2_208_988_800_000;

fn arb_bounds() -> impl Strategy<Value = TimeRange> {
    (MIN_MILLIS..MAX_MILLIS, MILLIS_PER_DAY..5_000 * MILLIS_PER_DAY)
        .prop_map(|(start, span)| TimeRange::new(start, start + span))
}

fn arb_range_within() -> impl Strategy<Value = (TimeRange, TimeRange)> {
    arb_bounds().prop_flat_map(|bounds| {
        (bounds.start..bounds.end, 0.0f64..1.0).prop_map(move |(start, fraction)| {
            let end = start + ((bounds.end - start) as f64 * fraction) as i64;
            (bounds, TimeRange::new(start, end.max(start + 1).min(bounds.end)))
        })
    })
}

proptest! {
    #[test]
    fn scale_around_center_stays_within_bounds(
        (bounds, range) in arb_range_within(),
        factor in 0.01f64..20.0
    ) {
        let scaled = scale_around_center(range, factor, bounds);
        prop_assert!(scaled.start <= scaled.end);
        prop_assert!(scaled.is_within(bounds));
    }

    #[test]
    fn zoom_in_preserves_center(
        (bounds, range) in arb_range_within(),
        factor in 0.05f64..1.0
    ) {
        let scaled = scale_around_center(range, factor, bounds);
        prop_assert!((scaled.center() - range.center()).abs() <= 1.0);
        prop_assert!(scaled.duration() <= range.duration());
    }

    #[test]
    fn clamp_and_shift_never_escape_bounds(
        (bounds, range) in arb_range_within(),
        outside_start in -1_000_000_000_000i64..1_000_000_000_000,
        delta in -10_000 * MILLIS_PER_DAY..10_000 * MILLIS_PER_DAY
    ) {
        let requested = TimeRange::new(
            range.start + outside_start,
            range.end + outside_start.abs(),
        );
        prop_assert!(clamp(requested, bounds).is_within(bounds));

        let shifted = shift_within(range, delta, bounds);
        prop_assert!(shifted.is_within(bounds));
        prop_assert_eq!(shifted.duration(), range.duration());
    }

    #[test]
    fn controller_ranges_always_fit_the_data(
        bounds in arb_bounds(),
        now_offset in -1_000 * MILLIS_PER_DAY..10_000 * MILLIS_PER_DAY,
        factors in proptest::collection::vec(0.1f64..5.0, 1..12),
        pans in proptest::collection::vec(-400 * MILLIS_PER_DAY..400 * MILLIS_PER_DAY, 1..12)
    ) {
        let now = bounds.start + now_offset;
        let mut controller = RangeController::new(bounds, 90 * MILLIS_PER_DAY, 60_000);
        prop_assert!(controller.effective_range(now).is_within(bounds));

        for (factor, delta) in factors.iter().zip(pans.iter()) {
            let zoomed = controller.zoom(*factor, now);
            prop_assert!(zoomed.is_within(bounds));
            prop_assert!(zoomed.duration() >= 60_000);

            let panned = controller.pan(*delta, now);
            prop_assert!(panned.is_within(bounds));
        }
    }

    #[test]
    fn ticks_are_idempotent_sorted_and_within_budget(
        bounds in arb_bounds(),
        max_ticks in 1usize..16,
        now_offset in -500 * MILLIS_PER_DAY..6_000 * MILLIS_PER_DAY
    ) {
        let now = bounds.start + now_offset;
        let config = TimeAxisLabelConfig::default();
        let first = generate_ticks(bounds, max_ticks, now, config);
        let second = generate_ticks(bounds, max_ticks, now, config);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= max_ticks);
        prop_assert!(first.windows(2).all(|pair| pair[0].value <= pair[1].value));
        prop_assert!(first.iter().all(|tick| bounds.contains(tick.value)));
    }

    #[test]
    fn projected_layout_stays_in_percent_space(
        (bounds, visible) in arb_range_within(),
        segments in proptest::collection::vec(
            (-2_000 * MILLIS_PER_DAY..7_000 * MILLIS_PER_DAY, 0..900 * MILLIS_PER_DAY),
            1..20
        )
    ) {
        let row = segments.iter().fold(TimelineRow::new("t", "g", "G"), |row, &(offset, span)| {
            row.with_segment(TimelineSegment::new(
                bounds.start + offset,
                bounds.start + offset + span,
                "primary",
            ))
        });
        let projection = project_rows(&[row], visible, &GroupCollapseState::default());

        for segment in projection.rows().flat_map(|row| row.segments.iter()) {
            prop_assert!((0.0..=100.0).contains(&segment.left_pct));
            prop_assert!(segment.width_pct >= 0.0);
            prop_assert!(segment.left_pct + segment.width_pct <= 100.0 + 1e-9);
        }
    }
}
