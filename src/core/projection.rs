use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::grouping::{GroupCollapseState, RowGroup, group_rows};
use crate::core::range::{TimeRange, intersects};
use crate::core::{TimelineEvent, TimelineRow, TimelineSegment};

/// Horizontal placement as percentages of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentLayout {
    pub left_pct: f64,
    pub width_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSegment {
    pub segment_index: usize,
    pub left_pct: f64,
    /// Raw width; negative for segments whose end precedes their start.
    pub width_pct: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEvent {
    pub event_index: usize,
    pub left_pct: f64,
    /// Always `0.0`; events are instants.
    pub width_pct: f64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRow {
    pub row_index: usize,
    pub row_id: String,
    pub columns: Vec<String>,
    pub segments: SmallVec<[ProjectedSegment; 4]>,
    pub events: SmallVec<[ProjectedEvent; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedGroup {
    pub group_id: String,
    pub group_label: String,
    pub collapsed: bool,
    /// Number of input rows in the group, including hidden ones.
    pub row_count: usize,
    /// Empty while the group is collapsed.
    pub rows: Vec<ProjectedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjection {
    pub visible_range: TimeRange,
    pub groups: Vec<ProjectedGroup>,
}

impl TimelineProjection {
    /// Iterates every projected (expanded) row across all groups.
    pub fn rows(&self) -> impl Iterator<Item = &ProjectedRow> {
        self.groups.iter().flat_map(|group| group.rows.iter())
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.rows().map(|row| row.segments.len()).sum()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.rows().map(|row| row.events.len()).sum()
    }
}

/// Lays out `item` inside `visible`, or returns `None` when it is off-screen.
#[must_use]
pub fn percent_layout(item: TimeRange, visible: TimeRange) -> Option<PercentLayout> {
    if !intersects(item, visible) {
        return None;
    }
    let duration = visible.duration();
    if duration <= 0 {
        return None;
    }

    let duration = duration as f64;
    let start = visible.clip(item.start);
    let end = visible.clip(item.end);
    Some(PercentLayout {
        left_pct: (start.saturating_sub(visible.start) as f64 / duration).max(0.0) * 100.0,
        width_pct: end.saturating_sub(start) as f64 / duration * 100.0,
    })
}

/// Projects rows into percentage space, grouped and filtered by collapse state.
#[must_use]
pub fn project_rows(
    rows: &[TimelineRow],
    visible: TimeRange,
    collapse_state: &GroupCollapseState,
) -> TimelineProjection {
    let groups: Vec<RowGroup<'_>> = group_rows(rows).into_values().collect();

    #[cfg(feature = "parallel-projection")]
    let groups: Vec<ProjectedGroup> = {
        use rayon::prelude::*;
        groups
            .par_iter()
            .map(|group| project_group(rows, group, visible, collapse_state))
            .collect()
    };

    #[cfg(not(feature = "parallel-projection"))]
    let groups: Vec<ProjectedGroup> = groups
        .iter()
        .map(|group| project_group(rows, group, visible, collapse_state))
        .collect();

    TimelineProjection {
        visible_range: visible,
        groups,
    }
}

fn project_group(
    rows: &[TimelineRow],
    group: &RowGroup<'_>,
    visible: TimeRange,
    collapse_state: &GroupCollapseState,
) -> ProjectedGroup {
    let collapsed = collapse_state.is_collapsed(group.group_id);
    let projected_rows = if collapsed {
        Vec::new()
    } else {
        group
            .row_indices
            .iter()
            .map(|&row_index| project_row(row_index, &rows[row_index], visible))
            .collect()
    };

    ProjectedGroup {
        group_id: group.group_id.to_owned(),
        group_label: group.group_label.to_owned(),
        collapsed,
        row_count: group.row_indices.len(),
        rows: projected_rows,
    }
}

fn project_row(row_index: usize, row: &TimelineRow, visible: TimeRange) -> ProjectedRow {
    ProjectedRow {
        row_index,
        row_id: row.id.clone(),
        columns: row.columns.clone(),
        segments: row
            .timeline
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| project_segment(index, segment, visible))
            .collect(),
        events: row
            .events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| project_event(index, event, visible))
            .collect(),
    }
}

fn project_segment(
    segment_index: usize,
    segment: &TimelineSegment,
    visible: TimeRange,
) -> Option<ProjectedSegment> {
    let layout = percent_layout(segment.range(), visible)?;
    Some(ProjectedSegment {
        segment_index,
        left_pct: layout.left_pct,
        width_pct: layout.width_pct,
        color: segment.color.clone(),
    })
}

fn project_event(
    event_index: usize,
    event: &TimelineEvent,
    visible: TimeRange,
) -> Option<ProjectedEvent> {
    let layout = percent_layout(event.range(), visible)?;
    Some(ProjectedEvent {
        event_index,
        left_pct: layout.left_pct,
        width_pct: 0.0,
        icon: event.icon.clone(),
    })
}
