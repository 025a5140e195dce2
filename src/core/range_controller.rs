use serde::{Deserialize, Serialize};

use crate::core::TimelineRow;
use crate::core::range::{
    TimeRange, clamp, ensure_min_span, pad_degenerate, scale_around_center, shift_within,
};

/// Owns the visible window over a row set.
///
/// `total` tracks the fitted data bounds.
/// `explicit` holds the user-driven override; when absent the visible window is
/// derived from the default span ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeController {
    total: TimeRange,
    explicit: Option<TimeRange>,
    default_window_millis: i64,
    min_span_millis: i64,
}

impl RangeController {
    /// Creates a controller over an already known total range.
    ///
    /// A degenerate `total` is padded to `min_span_millis`.
    #[must_use]
    pub fn new(total: TimeRange, default_window_millis: i64, min_span_millis: i64) -> Self {
        let min_span_millis = min_span_millis.max(1);
        Self {
            total: pad_degenerate(total.start, total.end, min_span_millis),
            explicit: None,
            default_window_millis: default_window_millis.max(min_span_millis),
            min_span_millis,
        }
    }

    /// Fits a controller to the min/max of all segment and event times.
    ///
    /// Returns `None` for a row set without any time data.
    #[must_use]
    pub fn from_rows(
        rows: &[TimelineRow],
        default_window_millis: i64,
        min_span_millis: i64,
    ) -> Option<Self> {
        let total = total_range(rows, min_span_millis)?;
        Some(Self::new(total, default_window_millis, min_span_millis))
    }

    #[must_use]
    pub fn total_range(&self) -> TimeRange {
        self.total
    }

    #[must_use]
    pub fn explicit_range(&self) -> Option<TimeRange> {
        self.explicit
    }

    #[must_use]
    pub fn default_window_millis(&self) -> i64 {
        self.default_window_millis
    }

    /// Visible window: the explicit override, else the most recent default-span
    /// window ending at `now` (or at the data end, whichever is earlier).
    #[must_use]
    pub fn effective_range(&self, now: i64) -> TimeRange {
        if let Some(explicit) = self.explicit {
            return explicit;
        }

        let total = self.total;
        let reference_end = now.min(total.end);
        let window = if reference_end.saturating_sub(total.start) < self.min_span_millis {
            // All data lies in the future: show its first window instead.
            TimeRange::new(
                total.start,
                total
                    .start
                    .saturating_add(self.default_window_millis)
                    .min(total.end),
            )
        } else {
            TimeRange::new(
                reference_end
                    .saturating_sub(self.default_window_millis)
                    .max(total.start),
                reference_end,
            )
        };
        ensure_min_span(window, self.min_span_millis, total)
    }

    /// Stores `range` clamped into the total range as the explicit override.
    pub fn set_range(&mut self, range: TimeRange) -> TimeRange {
        let clamped = ensure_min_span(clamp(range, self.total), self.min_span_millis, self.total);
        self.explicit = Some(clamped);
        clamped
    }

    /// Scales the current window around its midpoint.
    pub fn zoom(&mut self, factor: f64, now: i64) -> TimeRange {
        let current = self.effective_range(now);
        self.set_range(scale_around_center(current, factor, self.total))
    }

    /// Moves the current window by `delta_millis` without changing its span.
    pub fn pan(&mut self, delta_millis: i64, now: i64) -> TimeRange {
        let current = self.effective_range(now);
        self.set_range(shift_within(current, delta_millis, self.total))
    }

    /// Drops the explicit override and returns to the default window.
    pub fn reset(&mut self) {
        self.explicit = None;
    }

    /// Re-derives the total range after a data refresh, keeping any explicit
    /// override clamped into the new bounds.
    ///
    /// Returns `false` when the new row set has no time data.
    pub fn refit(&mut self, rows: &[TimelineRow]) -> bool {
        let Some(total) = total_range(rows, self.min_span_millis) else {
            return false;
        };
        self.total = total;
        if let Some(explicit) = self.explicit {
            self.set_range(explicit);
        }
        true
    }
}

/// Min/max over every segment boundary and event time, padded when degenerate.
#[must_use]
pub fn total_range(rows: &[TimelineRow], min_span_millis: i64) -> Option<TimeRange> {
    let (start, end) = rows
        .iter()
        .filter_map(TimelineRow::time_bounds)
        .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))?;
    Some(pad_degenerate(start, end, min_span_millis.max(1)))
}
