use serde::{Deserialize, Serialize};

use crate::core::TimeRange;

pub mod native_zoom;

pub use native_zoom::{HeadlessNativeZoomHost, ListenerId, NativeZoomGuard, NativeZoomHost};

/// One wheel event as delivered by the host toolkit.
///
/// `modifier` is the ctrl/cmd state; without it the wheel scrolls the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_y: f64,
    pub modifier: bool,
}

impl WheelInput {
    #[must_use]
    pub fn new(delta_y: f64, modifier: bool) -> Self {
        Self { delta_y, modifier }
    }
}

/// What the host should do with a wheel event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WheelOutcome {
    /// The engine changed (or tried to change) the visible range.
    pub handled: bool,
    /// The host must cancel the native page zoom for this event.
    pub prevent_default: bool,
}

/// Maps a wheel event to a zoom factor.
///
/// Scrolling away (`delta_y < 0`) zooms in, scrolling toward zooms out.
/// Returns `None` without the modifier or for a zero/non-finite delta.
#[must_use]
pub fn resolve_wheel_zoom_factor(
    input: WheelInput,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
) -> Option<f64> {
    if !input.modifier || !input.delta_y.is_finite() || input.delta_y == 0.0 {
        return None;
    }
    if input.delta_y < 0.0 {
        Some(zoom_in_factor)
    } else {
        Some(zoom_out_factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Distance between the first two touch points, if it is usable as a baseline.
#[must_use]
pub fn touch_distance(points: &[TouchPoint]) -> Option<f64> {
    let [first, second, ..] = points else {
        return None;
    };
    let distance = (second.x - first.x).hypot(second.y - first.y);
    (distance.is_finite() && distance > 0.0).then_some(distance)
}

/// Short-lived two-finger pinch state.
///
/// The baseline distance lives only while at least two touches are down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PinchSession {
    initial_distance: Option<f64>,
}

impl PinchSession {
    #[must_use]
    pub fn is_active(self) -> bool {
        self.initial_distance.is_some()
    }

    #[must_use]
    pub fn initial_distance(self) -> Option<f64> {
        self.initial_distance
    }

    pub fn on_touch_start(&mut self, points: &[TouchPoint]) {
        self.initial_distance = if points.len() >= 2 {
            touch_distance(points)
        } else {
            None
        };
    }

    /// Returns the zoom factor `initial / current` for a two-finger move.
    ///
    /// Spreading fingers yields a factor below one (zoom in).
    pub fn on_touch_move(&mut self, points: &[TouchPoint]) -> Option<f64> {
        if points.len() < 2 {
            self.reset();
            return None;
        }
        let current = touch_distance(points)?;
        let Some(initial) = self.initial_distance else {
            // Second finger landed without a fresh touch-start.
            self.initial_distance = Some(current);
            return None;
        };

        let factor = initial / current;
        if !factor.is_finite() || (factor - 1.0).abs() <= f64::EPSILON {
            return None;
        }
        Some(factor)
    }

    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) {
        if remaining.len() < 2 {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.initial_distance = None;
    }
}

/// Controlled two-handle slider bound to the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSliderModel {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub value: TimeRange,
}

impl RangeSliderModel {
    #[must_use]
    pub fn new(total: TimeRange, visible: TimeRange, step: i64) -> Self {
        Self {
            min: total.start,
            max: total.end,
            step: step.max(1),
            value: visible,
        }
    }

    /// Snaps `value` to the step grid anchored at `min`, clamped to `[min, max]`.
    #[must_use]
    pub fn snap(&self, value: i64) -> i64 {
        let offset = value.saturating_sub(self.min) as f64;
        let steps = (offset / self.step as f64).round() as i64;
        self.min
            .saturating_add(steps.saturating_mul(self.step))
            .max(self.min)
            .min(self.max)
    }

    /// Resolves raw handle positions into the absolute range to apply.
    #[must_use]
    pub fn resolve_change(&self, first: i64, second: i64) -> TimeRange {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        let (low, high) = (self.snap(low), self.snap(high));
        if high > low {
            return TimeRange::new(low, high);
        }

        // Both handles on the same grid point: keep one full step selected.
        let end = low.saturating_add(self.step).min(self.max);
        let start = end.saturating_sub(self.step).max(self.min);
        TimeRange::new(start, end)
    }
}
