use serde_json::json;

use super::{
    client::ApiClient,
    operations,
    types::{ApiError, Scan},
};

fn scope_variables(asset_id: Option<&str>) -> serde_json::Value {
    match asset_id {
        Some(asset_id) => json!({ "assetId": asset_id }),
        None => json!({}),
    }
}

impl ApiClient {
    /// Fetches scans, optionally scoped to one asset.
    pub async fn scans(&self, asset_id: Option<&str>) -> Result<Vec<Scan>, ApiError> {
        self.execute(operations::SCANS, "scans", scope_variables(asset_id))
            .await
    }

    /// One scan snapshot; this is the fetch the poll controller drives.
    pub async fn scan(&self, id: &str) -> Result<Scan, ApiError> {
        self.execute(operations::SCAN, "scan", json!({ "id": id }))
            .await
    }

    /// Launches a scan job. Returns the job in its initial (pending or
    /// running) state; progress is observed by polling `scan`.
    pub async fn start_scan(&self, asset_id: &str) -> Result<Scan, ApiError> {
        self.execute(
            operations::START_SCAN,
            "startScan",
            json!({ "assetId": asset_id }),
        )
        .await
    }

    /// Server-rendered CSV for one asset's scans, or all scans when
    /// unscoped. An empty payload is an explicit error, never a silent
    /// no-op.
    pub async fn export_scans(&self, asset_id: Option<&str>) -> Result<String, ApiError> {
        let csv: String = self
            .execute(
                operations::EXPORT_SCANS,
                "exportScans",
                scope_variables(asset_id),
            )
            .await?;
        if csv.is_empty() {
            return Err(ApiError::application("No data received from export"));
        }
        Ok(csv)
    }
}
