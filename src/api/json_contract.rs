use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TimelineRow;
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{TimelineEngine, TimelineView};

pub const TIMELINE_VIEW_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineViewJsonContractV1 {
    pub schema_version: u32,
    pub view: TimelineView,
}

/// Parses the row payload delivered by the data endpoint.
///
/// Accepts a bare array of rows or an object with a `rows` array.
pub fn rows_from_json_str(input: &str) -> TimelineResult<Vec<TimelineRow>> {
    #[derive(Deserialize)]
    struct RowsEnvelope {
        rows: Vec<TimelineRow>,
    }

    if let Ok(rows) = serde_json::from_str::<Vec<TimelineRow>>(input) {
        return Ok(rows);
    }
    let envelope: RowsEnvelope = serde_json::from_str(input)
        .map_err(|e| TimelineError::InvalidData(format!("failed to parse timeline rows: {e}")))?;
    Ok(envelope.rows)
}

impl TimelineView {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline view: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineViewJsonContractV1 {
            schema_version: TIMELINE_VIEW_JSON_SCHEMA_V1,
            view: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline view contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(view) = serde_json::from_str::<TimelineView>(input) {
            return Ok(view);
        }
        let payload: TimelineViewJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline view json payload: {e}"))
        })?;
        if payload.schema_version != TIMELINE_VIEW_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported timeline view schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view)
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces the rows from a JSON payload; existing rows survive a parse error.
    pub fn set_rows_from_json(&mut self, input: &str) -> TimelineResult<()> {
        let rows = rows_from_json_str(input)?;
        debug!(row_count = rows.len(), "parsed timeline rows from json");
        self.set_rows(rows);
        Ok(())
    }

    /// Versioned JSON snapshot of the current view; `None` without time data.
    pub fn snapshot_json_contract_v1_pretty(&self) -> TimelineResult<Option<String>> {
        self.view()
            .map(|view| view.to_json_contract_v1_pretty())
            .transpose()
    }
}
