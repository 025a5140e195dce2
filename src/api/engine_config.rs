use serde::{Deserialize, Serialize};

use crate::core::MILLIS_PER_DAY;
use crate::error::{TimelineError, TimelineResult};

use super::TimeAxisLabelConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can load timeline setup alongside their
/// own page configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default = "default_window_millis")]
    pub default_window_millis: i64,
    #[serde(default = "default_min_span_millis")]
    pub min_span_millis: i64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
    #[serde(default = "default_wheel_zoom_in_factor")]
    pub wheel_zoom_in_factor: f64,
    #[serde(default = "default_wheel_zoom_out_factor")]
    pub wheel_zoom_out_factor: f64,
    #[serde(default = "default_slider_step_millis")]
    pub slider_step_millis: i64,
    #[serde(default)]
    pub time_axis_label_config: TimeAxisLabelConfig,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            default_window_millis: default_window_millis(),
            min_span_millis: default_min_span_millis(),
            max_ticks: default_max_ticks(),
            wheel_zoom_in_factor: default_wheel_zoom_in_factor(),
            wheel_zoom_out_factor: default_wheel_zoom_out_factor(),
            slider_step_millis: default_slider_step_millis(),
            time_axis_label_config: TimeAxisLabelConfig::default(),
        }
    }
}

impl TimelineEngineConfig {
    /// Sets the span of the window shown before any user interaction.
    #[must_use]
    pub fn with_default_window_millis(mut self, millis: i64) -> Self {
        self.default_window_millis = millis;
        self
    }

    /// Sets the smallest visible span zooming can reach.
    #[must_use]
    pub fn with_min_span_millis(mut self, millis: i64) -> Self {
        self.min_span_millis = millis;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.wheel_zoom_in_factor = zoom_in;
        self.wheel_zoom_out_factor = zoom_out;
        self
    }

    #[must_use]
    pub fn with_slider_step_millis(mut self, millis: i64) -> Self {
        self.slider_step_millis = millis;
        self
    }

    #[must_use]
    pub fn with_time_axis_label_config(mut self, config: TimeAxisLabelConfig) -> Self {
        self.time_axis_label_config = config;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if self.default_window_millis <= 0 {
            return Err(TimelineError::InvalidConfig(
                "default window must be > 0 ms".to_owned(),
            ));
        }
        if self.min_span_millis <= 0 {
            return Err(TimelineError::InvalidConfig(
                "min span must be > 0 ms".to_owned(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(TimelineError::InvalidConfig(
                "max ticks must be >= 1".to_owned(),
            ));
        }
        if !self.wheel_zoom_in_factor.is_finite()
            || self.wheel_zoom_in_factor <= 0.0
            || self.wheel_zoom_in_factor >= 1.0
        {
            return Err(TimelineError::InvalidConfig(
                "wheel zoom-in factor must be finite and in (0, 1)".to_owned(),
            ));
        }
        if !self.wheel_zoom_out_factor.is_finite() || self.wheel_zoom_out_factor <= 1.0 {
            return Err(TimelineError::InvalidConfig(
                "wheel zoom-out factor must be finite and > 1".to_owned(),
            ));
        }
        if self.slider_step_millis <= 0 {
            return Err(TimelineError::InvalidConfig(
                "slider step must be > 0 ms".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Parses and validates a JSON config; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidConfig(format!("failed to parse timeline config json: {e}"))
        })?;
        config.validate()
    }
}

fn default_window_millis() -> i64 {
    90 * MILLIS_PER_DAY
}

fn default_min_span_millis() -> i64 {
    60_000
}

fn default_max_ticks() -> usize {
    10
}

fn default_wheel_zoom_in_factor() -> f64 {
    0.95
}

fn default_wheel_zoom_out_factor() -> f64 {
    1.05
}

fn default_slider_step_millis() -> i64 {
    MILLIS_PER_DAY
}
