use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Closed time interval in epoch milliseconds.
///
/// Visible and total ranges keep `start < end`; intermediate results produced by
/// [`clamp`] may collapse to a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }

    #[must_use]
    pub fn contains(self, time: i64) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn is_within(self, bounds: TimeRange) -> bool {
        self.start >= bounds.start && self.end <= bounds.end
    }

    /// Clips a single instant into the range.
    #[must_use]
    pub fn clip(self, time: i64) -> i64 {
        time.max(self.start).min(self.end)
    }
}

/// Returns `true` when both closed intervals share at least one instant.
#[must_use]
pub fn intersects(a: TimeRange, b: TimeRange) -> bool {
    a.end >= b.start && a.start <= b.end
}

/// Clips both endpoints of `range` into `bounds`.
///
/// An inverted result collapses to a single point at the bound nearest to the
/// requested range.
#[must_use]
pub fn clamp(range: TimeRange, bounds: TimeRange) -> TimeRange {
    let start = bounds.clip(range.start);
    let end = bounds.clip(range.end);
    if start <= end {
        return TimeRange::new(start, end);
    }

    let point = if range.center() <= bounds.center() {
        bounds.start
    } else {
        bounds.end
    };
    TimeRange::new(point, point)
}

/// Scales `range` around its midpoint and clamps the result into `bounds`.
///
/// `factor < 1.0` zooms in, `factor > 1.0` zooms out. Non-finite or
/// non-positive factors leave the (clamped) range unchanged.
#[must_use]
pub fn scale_around_center(range: TimeRange, factor: f64, bounds: TimeRange) -> TimeRange {
    if !factor.is_finite() || factor <= 0.0 {
        return clamp(range, bounds);
    }

    let center = range.center();
    let new_start = center - (center - range.start as f64) * factor;
    let new_end = center + (range.end as f64 - center) * factor;
    clamp(
        TimeRange::new(round_millis(new_start), round_millis(new_end)),
        bounds,
    )
}

/// Moves `range` by `delta` milliseconds, keeping its span and stopping at `bounds`.
#[must_use]
pub fn shift_within(range: TimeRange, delta: i64, bounds: TimeRange) -> TimeRange {
    let span = range.duration();
    if span >= bounds.duration() {
        return bounds;
    }

    let start = range
        .start
        .saturating_add(delta)
        .max(bounds.start)
        .min(bounds.end.saturating_sub(span));
    TimeRange::new(start, start.saturating_add(span))
}

/// Widens `range` around its midpoint to at least `min_span`, then slides it
/// back inside `bounds`.
#[must_use]
pub fn ensure_min_span(range: TimeRange, min_span: i64, bounds: TimeRange) -> TimeRange {
    if range.duration() >= min_span {
        return range;
    }

    let span = min_span.min(bounds.duration());
    let start = round_millis(range.center() - span as f64 / 2.0)
        .max(bounds.start)
        .min(bounds.end.saturating_sub(span));
    TimeRange::new(start, start.saturating_add(span))
}

/// Builds a non-degenerate range from raw data bounds.
///
/// A single instant is padded symmetrically so the result spans `min_span`.
#[must_use]
pub fn pad_degenerate(start: i64, end: i64, min_span: i64) -> TimeRange {
    if end > start {
        return TimeRange::new(start, end);
    }

    let half = (min_span / 2).max(1);
    TimeRange::new(start.saturating_sub(half), start.saturating_add(half))
}

fn round_millis(value: f64) -> i64 {
    // `as` saturates at the i64 bounds.
    value.round() as i64
}
