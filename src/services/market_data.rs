use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One quote row from the snapshot feed. `ffmc` doubles as the volume
/// feature for the prediction model and defaults to 0 when the feed lacks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRow {
    pub symbol: String,
    pub open: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub last_price: f64,
    pub p_change: f64,
    #[serde(default)]
    pub ffmc: f64,
}

// Re-read on every request so a fresh snapshot file shows up without a restart.
pub fn read_snapshot(path: &str) -> Result<Vec<SnapshotRow>, ApiError> {
    let mut rdr = csv::Reader::from_path(path)
        .map_err(|e| ApiError::Internal(format!("snapshot read failed: {e}")))?;

    let mut rows: Vec<SnapshotRow> = Vec::new();
    for result in rdr.deserialize() {
        let row =
            result.map_err(|e| ApiError::Internal(format!("snapshot parse failed: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}
