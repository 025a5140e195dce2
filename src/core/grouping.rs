use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::TimelineRow;

/// Rows sharing a `group_id`, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup<'a> {
    pub group_id: &'a str,
    pub group_label: &'a str,
    pub row_indices: Vec<usize>,
}

/// Groups rows by `group_id`, preserving the order in which groups first appear.
///
/// The label of a group is taken from its first row.
#[must_use]
pub fn group_rows(rows: &[TimelineRow]) -> IndexMap<&str, RowGroup<'_>> {
    let mut groups: IndexMap<&str, RowGroup<'_>> = IndexMap::new();
    for (index, row) in rows.iter().enumerate() {
        groups
            .entry(row.group_id.as_str())
            .or_insert_with(|| RowGroup {
                group_id: &row.group_id,
                group_label: &row.group_label,
                row_indices: Vec::new(),
            })
            .row_indices
            .push(index);
    }
    groups
}

/// Collapsed group ids of one mounted timeline.
///
/// Independent of range state and never touches row data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCollapseState {
    collapsed: BTreeSet<String>,
}

impl GroupCollapseState {
    #[must_use]
    pub fn is_collapsed(&self, group_id: &str) -> bool {
        self.collapsed.contains(group_id)
    }

    pub fn collapse(&mut self, group_id: impl Into<String>) -> bool {
        self.collapsed.insert(group_id.into())
    }

    pub fn expand(&mut self, group_id: &str) -> bool {
        self.collapsed.remove(group_id)
    }

    /// Flips the state of `group_id` and returns `true` if it is now collapsed.
    pub fn toggle(&mut self, group_id: &str) -> bool {
        if self.collapsed.remove(group_id) {
            false
        } else {
            self.collapsed.insert(group_id.to_owned());
            true
        }
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }

    #[must_use]
    pub fn collapsed_groups(&self) -> impl Iterator<Item = &str> {
        self.collapsed.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}
