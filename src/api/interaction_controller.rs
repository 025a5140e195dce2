use tracing::{trace, warn};

use crate::core::TimeRange;
use crate::interaction::{
    PinchSession, RangeSliderModel, TouchPoint, WheelInput, WheelOutcome,
    resolve_wheel_zoom_factor,
};
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Handles one wheel event.
    ///
    /// Conventions:
    /// - without the modifier the event is left to the page (`handled == false`)
    /// - with the modifier the host must cancel native zoom (`prevent_default`)
    /// - `delta_y < 0` zooms in, `delta_y > 0` zooms out
    pub fn on_wheel(&mut self, input: WheelInput) -> WheelOutcome {
        if !input.modifier {
            return WheelOutcome::default();
        }

        let factor = resolve_wheel_zoom_factor(
            input,
            self.config.wheel_zoom_in_factor,
            self.config.wheel_zoom_out_factor,
        );
        let handled = match factor {
            Some(factor) => {
                trace!(delta_y = input.delta_y, factor, "wheel zoom");
                self.zoom(factor).is_some()
            }
            None => false,
        };
        WheelOutcome {
            handled,
            prevent_default: true,
        }
    }

    /// Starts a pinch baseline when two or more fingers are down.
    pub fn on_touch_start(&mut self, points: &[TouchPoint]) {
        self.pinch.on_touch_start(points);
        if points.len() >= 2 && !self.pinch.is_active() {
            warn!("ignoring pinch start with coincident touch points");
        }
    }

    /// Applies `zoom(initial / current)` for a two-finger move.
    ///
    /// Returns the new visible range when the gesture zoomed.
    pub fn on_touch_move(&mut self, points: &[TouchPoint]) -> Option<TimeRange> {
        let factor = self.pinch.on_touch_move(points)?;
        trace!(factor, "pinch zoom");
        self.zoom(factor)
    }

    /// Ends the pinch session once fewer than two touches remain.
    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) {
        self.pinch.on_touch_end(remaining);
    }

    #[must_use]
    pub fn pinch_session(&self) -> PinchSession {
        self.pinch
    }

    /// Slider bound to the current visible range; `None` without data.
    #[must_use]
    pub fn slider(&self) -> Option<RangeSliderModel> {
        let now = self.now();
        self.range.map(|range| {
            RangeSliderModel::new(
                range.total_range(),
                range.effective_range(now),
                self.config.slider_step_millis,
            )
        })
    }

    /// Applies absolute handle positions from the range slider.
    ///
    /// Handles snap to the configured step; the zoom factor path is bypassed.
    pub fn on_slider_change(&mut self, first: i64, second: i64) -> Option<TimeRange> {
        let requested = self.slider()?.resolve_change(first, second);
        trace!(start = requested.start, end = requested.end, "slider change");
        self.set_visible_range(requested)
    }
}
