mod axis_config;
mod axis_label_format;
mod axis_ticks;
mod clock;
mod engine;
mod engine_config;
mod interaction_controller;
mod item_dispatch;
mod json_contract;
mod render_frame_builder;
mod render_style;

pub use axis_config::{AxisLabelLocale, TimeAxisLabelConfig, TimeAxisTimeZone};
pub use axis_label_format::{TickLabelFormatterFn, format_date_label};
pub use axis_ticks::{Tick, TickKind, generate_ticks, generate_ticks_with_formatter};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use engine::{TimelineEngine, TimelineInput, TimelineView, recompute};
pub use engine_config::TimelineEngineConfig;
pub use item_dispatch::{ClickedItem, ItemClick, ItemClickHandlerFn, ItemPopoverFn, ItemSelector};
pub use json_contract::{
    TIMELINE_VIEW_JSON_SCHEMA_V1, TimelineViewJsonContractV1, rows_from_json_str,
};
pub use render_style::TimelineRenderStyle;
