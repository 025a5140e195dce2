pub mod grouping;
pub mod projection;
pub mod range;
pub mod range_controller;
pub mod types;

pub use grouping::{GroupCollapseState, RowGroup, group_rows};
pub use projection::{
    PercentLayout, ProjectedEvent, ProjectedGroup, ProjectedRow, ProjectedSegment,
    TimelineProjection, percent_layout, project_rows,
};
pub use range::{
    MILLIS_PER_DAY, TimeRange, clamp, ensure_min_span, intersects, pad_degenerate,
    scale_around_center, shift_within,
};
pub use range_controller::{RangeController, total_range};
pub use types::{TimelineEvent, TimelineRow, TimelineSegment, Viewport};
