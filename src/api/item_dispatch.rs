use std::sync::Arc;

use tracing::debug;

use crate::core::{TimelineEvent, TimelineRow, TimelineSegment};
use crate::error::TimelineResult;
use crate::render::{HitTarget, Renderer};

use super::TimelineEngine;

/// The part of a row the user interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickedItem<'a> {
    Row,
    Segment {
        index: usize,
        segment: &'a TimelineSegment,
    },
    Event {
        index: usize,
        event: &'a TimelineEvent,
    },
}

/// Payload handed to the host's click callback: the caller's own row plus the
/// specific item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemClick<'a> {
    pub row: &'a TimelineRow,
    pub item: ClickedItem<'a>,
}

/// Selects an item of a row by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelector {
    Row,
    Segment(usize),
    Event(usize),
}

pub type ItemClickHandlerFn = Arc<dyn Fn(ItemClick<'_>) + Send + Sync + 'static>;
pub type ItemPopoverFn = Arc<dyn Fn(&TimelineRow) -> String + Send + Sync + 'static>;

impl<R: Renderer> TimelineEngine<R> {
    pub fn set_item_click_handler(&mut self, handler: ItemClickHandlerFn) {
        self.item_click_handler = Some(handler);
    }

    pub fn clear_item_click_handler(&mut self) {
        self.item_click_handler = None;
    }

    pub fn set_item_popover(&mut self, popover: ItemPopoverFn) {
        self.item_popover = Some(popover);
    }

    pub fn clear_item_popover(&mut self) {
        self.item_popover = None;
    }

    /// Detail content for a row, as rendered by the host's popover callback.
    #[must_use]
    pub fn popover_for(&self, row_id: &str) -> Option<String> {
        let popover = self.item_popover.as_ref()?;
        self.row(row_id).map(|row| popover(row))
    }

    /// Invokes the click callback for an item addressed by row id.
    ///
    /// Returns `false` when the row or item does not exist or no handler is set.
    pub fn click_item(&self, row_id: &str, selector: ItemSelector) -> bool {
        let Some(row_index) = self.rows.iter().position(|row| row.id == row_id) else {
            return false;
        };
        self.dispatch_click(row_index, selector)
    }

    /// Hit-tests a pointer position against the current frame and reacts.
    ///
    /// Group headers toggle their collapse state; rows, segments and events go
    /// to the click callback. Returns the target that was hit.
    pub fn click_at(&mut self, x: f64, y: f64) -> TimelineResult<Option<HitTarget>> {
        let frame = self.build_render_frame()?;
        let Some(target) = frame.hit_test(x, y).cloned() else {
            return Ok(None);
        };

        match &target {
            HitTarget::GroupHeader { group_id } => {
                self.toggle_group(group_id);
            }
            HitTarget::Row { row_index } => {
                self.dispatch_click(*row_index, ItemSelector::Row);
            }
            HitTarget::Segment {
                row_index,
                segment_index,
            } => {
                self.dispatch_click(*row_index, ItemSelector::Segment(*segment_index));
            }
            HitTarget::Event {
                row_index,
                event_index,
            } => {
                self.dispatch_click(*row_index, ItemSelector::Event(*event_index));
            }
        }
        Ok(Some(target))
    }

    fn dispatch_click(&self, row_index: usize, selector: ItemSelector) -> bool {
        let Some(handler) = self.item_click_handler.as_ref() else {
            return false;
        };
        let Some(row) = self.rows.get(row_index) else {
            return false;
        };

        let item = match selector {
            ItemSelector::Row => ClickedItem::Row,
            ItemSelector::Segment(index) => match row.timeline.get(index) {
                Some(segment) => ClickedItem::Segment { index, segment },
                None => return false,
            },
            ItemSelector::Event(index) => match row.events.get(index) {
                Some(event) => ClickedItem::Event { index, event },
                None => return false,
            },
        };

        debug!(row_id = %row.id, ?selector, "item click");
        handler(ItemClick { row, item });
        true
    }
}
