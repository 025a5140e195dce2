use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    GroupCollapseState, RangeController, TimeRange, TimelineProjection, TimelineRow, Viewport,
    project_rows,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{NativeZoomGuard, NativeZoomHost, PinchSession, RangeSliderModel};
use crate::render::Renderer;

use super::axis_label_format::format_date_label;
use super::render_style::validate_render_style;
use super::{
    Clock, ItemClickHandlerFn, ItemPopoverFn, SharedClock, SystemClock, Tick,
    TickLabelFormatterFn, TimelineEngineConfig, TimelineRenderStyle,
    generate_ticks_with_formatter,
};

/// Everything the timeline derives from its inputs for one update cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub total_range: TimeRange,
    pub visible_range: TimeRange,
    pub now: i64,
    pub ticks: Vec<Tick>,
    pub projection: TimelineProjection,
    pub slider: RangeSliderModel,
    pub slider_labels: (String, String),
}

/// Inputs of [`recompute`].
#[derive(Clone, Copy)]
pub struct TimelineInput<'a> {
    pub rows: &'a [TimelineRow],
    pub explicit_range: Option<TimeRange>,
    pub collapse_state: &'a GroupCollapseState,
    pub now: i64,
    pub config: TimelineEngineConfig,
    pub tick_label_formatter: Option<&'a TickLabelFormatterFn>,
}

/// Pure derivation of the visible window, ticks, projection and slider state.
///
/// Hosts call this (directly or through [`TimelineEngine::view`]) whenever rows,
/// range or collapse state change. Returns `None` when the rows carry no time
/// data, in which case nothing is rendered.
#[must_use]
pub fn recompute(input: &TimelineInput<'_>) -> Option<TimelineView> {
    let config = input.config;
    let mut controller = RangeController::from_rows(
        input.rows,
        config.default_window_millis,
        config.min_span_millis,
    )?;
    if let Some(explicit) = input.explicit_range {
        controller.set_range(explicit);
    }

    let total_range = controller.total_range();
    let visible_range = controller.effective_range(input.now);
    let ticks = generate_ticks_with_formatter(
        visible_range,
        config.max_ticks,
        input.now,
        config.time_axis_label_config,
        input.tick_label_formatter,
    );
    let projection = project_rows(input.rows, visible_range, input.collapse_state);
    let slider = RangeSliderModel::new(total_range, visible_range, config.slider_step_millis);
    let label_config = config.time_axis_label_config;

    Some(TimelineView {
        total_range,
        visible_range,
        now: input.now,
        ticks,
        projection,
        slider,
        slider_labels: (
            format_date_label(visible_range.start, label_config),
            format_date_label(visible_range.end, label_config),
        ),
    })
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` coordinates rows, the visible-range controller, group
/// collapse state, gesture sessions, callbacks and renderer calls.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineEngineConfig,
    pub(super) viewport: Viewport,
    pub(super) render_style: TimelineRenderStyle,
    pub(super) rows: Vec<TimelineRow>,
    pub(super) range: Option<RangeController>,
    pub(super) collapse_state: GroupCollapseState,
    pub(super) pinch: PinchSession,
    pub(super) clock: SharedClock,
    pub(super) tick_label_formatter: Option<TickLabelFormatterFn>,
    pub(super) item_click_handler: Option<ItemClickHandlerFn>,
    pub(super) item_popover: Option<ItemPopoverFn>,
    pub(super) native_zoom_guard: Option<NativeZoomGuard>,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn new(
        renderer: R,
        viewport: Viewport,
        config: TimelineEngineConfig,
    ) -> TimelineResult<Self> {
        validate_viewport(viewport)?;
        let config = config.validate()?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            max_ticks = config.max_ticks,
            "timeline engine created"
        );
        Ok(Self {
            renderer,
            config,
            viewport,
            render_style: TimelineRenderStyle::default(),
            rows: Vec::new(),
            range: None,
            collapse_state: GroupCollapseState::default(),
            pinch: PinchSession::default(),
            clock: Arc::new(SystemClock),
            tick_label_formatter: None,
            item_click_handler: None,
            item_popover: None,
            native_zoom_guard: None,
        })
    }

    /// Replaces the time source used for "now".
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn set_clock(&mut self, clock: SharedClock) {
        self.clock = clock;
    }

    #[must_use]
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    /// Applies a new configuration, keeping any explicit visible range.
    pub fn set_config(&mut self, config: TimelineEngineConfig) -> TimelineResult<()> {
        let config = config.validate()?;
        let explicit = self.range.and_then(|range| range.explicit_range());
        self.config = config;
        self.range = RangeController::from_rows(
            &self.rows,
            config.default_window_millis,
            config.min_span_millis,
        );
        if let (Some(range), Some(explicit)) = (self.range.as_mut(), explicit) {
            range.set_range(explicit);
        }
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<()> {
        validate_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn render_style(&self) -> TimelineRenderStyle {
        self.render_style
    }

    pub fn set_render_style(&mut self, style: TimelineRenderStyle) -> TimelineResult<()> {
        self.render_style = validate_render_style(style)?;
        Ok(())
    }

    pub fn set_tick_label_formatter(&mut self, formatter: TickLabelFormatterFn) {
        self.tick_label_formatter = Some(formatter);
    }

    pub fn clear_tick_label_formatter(&mut self) {
        self.tick_label_formatter = None;
    }

    /// Replaces the row set after a data refresh.
    ///
    /// The total range is re-derived; an explicit visible range survives,
    /// clamped into the new bounds.
    pub fn set_rows(&mut self, rows: Vec<TimelineRow>) {
        self.rows = rows;
        let refitted = self.range.as_mut().map(|range| range.refit(&self.rows));
        match refitted {
            Some(true) => {}
            Some(false) => self.range = None,
            None => {
                self.range = RangeController::from_rows(
                    &self.rows,
                    self.config.default_window_millis,
                    self.config.min_span_millis,
                );
            }
        }
        debug!(
            row_count = self.rows.len(),
            has_time_data = self.range.is_some(),
            "set timeline rows"
        );
    }

    #[must_use]
    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, row_id: &str) -> Option<&TimelineRow> {
        self.rows.iter().find(|row| row.id == row_id)
    }

    #[must_use]
    pub fn total_range(&self) -> Option<TimeRange> {
        self.range.map(|range| range.total_range())
    }

    #[must_use]
    pub fn visible_range(&self) -> Option<TimeRange> {
        let now = self.now();
        self.range.map(|range| range.effective_range(now))
    }

    /// Sets an absolute visible range, clamped into the data bounds.
    pub fn set_visible_range(&mut self, range: TimeRange) -> Option<TimeRange> {
        let applied = self.range.as_mut()?.set_range(range);
        debug!(start = applied.start, end = applied.end, "set visible range");
        Some(applied)
    }

    /// Scales the visible range around its midpoint (`factor < 1` zooms in).
    pub fn zoom(&mut self, factor: f64) -> Option<TimeRange> {
        let now = self.now();
        let applied = self.range.as_mut()?.zoom(factor, now);
        debug!(
            factor,
            start = applied.start,
            end = applied.end,
            "zoom visible range"
        );
        Some(applied)
    }

    /// Moves the visible range by `delta_millis`, stopping at the data bounds.
    pub fn pan(&mut self, delta_millis: i64) -> Option<TimeRange> {
        let now = self.now();
        let applied = self.range.as_mut()?.pan(delta_millis, now);
        debug!(
            delta_millis,
            start = applied.start,
            end = applied.end,
            "pan visible range"
        );
        Some(applied)
    }

    /// Returns to the default window ending at "now".
    pub fn reset_visible_range(&mut self) {
        if let Some(range) = self.range.as_mut() {
            range.reset();
        }
    }

    #[must_use]
    pub fn collapse_state(&self) -> &GroupCollapseState {
        &self.collapse_state
    }

    #[must_use]
    pub fn is_group_collapsed(&self, group_id: &str) -> bool {
        self.collapse_state.is_collapsed(group_id)
    }

    /// Flips a group and returns `true` when it is now collapsed.
    pub fn toggle_group(&mut self, group_id: &str) -> bool {
        let collapsed = self.collapse_state.toggle(group_id);
        debug!(group_id, collapsed, "toggle group");
        collapsed
    }

    pub fn collapse_group(&mut self, group_id: &str) {
        self.collapse_state.collapse(group_id);
    }

    pub fn expand_group(&mut self, group_id: &str) {
        self.collapse_state.expand(group_id);
    }

    /// Derives the current view; `None` when there is nothing to render.
    #[must_use]
    pub fn view(&self) -> Option<TimelineView> {
        recompute(&TimelineInput {
            rows: &self.rows,
            explicit_range: self.range.and_then(|range| range.explicit_range()),
            collapse_state: &self.collapse_state,
            now: self.now(),
            config: self.config,
            tick_label_formatter: self.tick_label_formatter.as_ref(),
        })
    }

    /// Installs the page-level native zoom suppression for this mounted instance.
    ///
    /// Mounting again replaces (and releases) the previous guard.
    pub fn mount(&mut self, host: Rc<dyn NativeZoomHost>) {
        self.native_zoom_guard = Some(NativeZoomGuard::acquire(host));
    }

    /// Releases the native zoom suppression and drops per-mount state.
    pub fn unmount(&mut self) {
        self.native_zoom_guard = None;
        self.collapse_state.clear();
        self.pinch.reset();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.native_zoom_guard.is_some()
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn validate_viewport(viewport: Viewport) -> TimelineResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(TimelineError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}
