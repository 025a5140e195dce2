use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::range::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One colored interval on a row, e.g. a thesis lifecycle phase.
///
/// `start_date <= end_date` is expected from the data source but not enforced;
/// zero-length segments are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub start_date: i64,
    pub end_date: i64,
    #[serde(default)]
    pub color: String,
}

impl TimelineSegment {
    #[must_use]
    pub fn new(start_date: i64, end_date: i64, color: impl Into<String>) -> Self {
        Self {
            start_date,
            end_date,
            color: color.into(),
        }
    }

    #[must_use]
    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        color: impl Into<String>,
    ) -> Self {
        Self::new(start.timestamp_millis(), end.timestamp_millis(), color)
    }

    #[must_use]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_date, self.end_date)
    }
}

/// A single point in time on a row, e.g. a scheduled presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: i64,
    #[serde(default)]
    pub icon: String,
}

impl TimelineEvent {
    #[must_use]
    pub fn new(time: i64, icon: impl Into<String>) -> Self {
        Self {
            time,
            icon: icon.into(),
        }
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, icon: impl Into<String>) -> Self {
        Self::new(time.timestamp_millis(), icon)
    }

    #[must_use]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.time, self.time)
    }
}

/// Input row supplied by the data-fetching collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub id: String,
    pub group_id: String,
    #[serde(default)]
    pub group_label: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineSegment>,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl TimelineRow {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        group_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            group_label: group_label.into(),
            columns: Vec::new(),
            timeline: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, value: impl Into<String>) -> Self {
        self.columns.push(value.into());
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: TimelineSegment) -> Self {
        self.timeline.push(segment);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: TimelineEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Earliest and latest instant referenced by this row, if any.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(i64, i64)> {
        let segment_times = self
            .timeline
            .iter()
            .flat_map(|segment| [segment.start_date, segment.end_date]);
        let event_times = self.events.iter().map(|event| event.time);

        segment_times
            .chain(event_times)
            .fold(None, |acc, time| match acc {
                None => Some((time, time)),
                Some((min, max)) => Some((min.min(time), max.max(time))),
            })
    }
}
