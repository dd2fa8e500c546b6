use serde::{Deserialize, Serialize};

use crate::core::{ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ViewportState;

pub const SESSION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable dump of session state for debugging and regression fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub viewport: Viewport,
    pub series_len: usize,
    pub window_size: usize,
    pub start_index: usize,
    pub visible_values: Vec<u16>,
    pub save_enabled: bool,
    pub zoom_in_enabled: bool,
    pub generation: u64,
    /// Range of the last applied render pass.
    pub range: Option<ValueRange>,
    #[serde(default)]
    pub viewport_state: Option<ViewportState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SessionSnapshot,
}

impl SessionSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        let payload = SessionSnapshotJsonContractV1 {
            schema_version: SESSION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Accepts both the versioned contract and a bare snapshot object.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SessionSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SessionSnapshotJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot json: {e}")))?;
        if payload.schema_version != SESSION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
