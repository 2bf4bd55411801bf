use serde_json::json;

use super::{
    client::ApiClient,
    operations,
    types::{ApiError, Asset, CreateAssetInput},
};
use crate::utils::validate;

impl ApiClient {
    pub async fn assets(&self) -> Result<Vec<Asset>, ApiError> {
        self.execute(operations::ASSETS, "assets", json!({})).await
    }

    pub async fn asset(&self, id: &str) -> Result<Asset, ApiError> {
        self.execute(operations::ASSET, "asset", json!({ "id": id }))
            .await
    }

    /// Creates an asset. The target grammar is checked locally first; a
    /// rejected input never reaches the server.
    pub async fn create_asset(&self, input: CreateAssetInput) -> Result<Asset, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::validation("Asset name is required"));
        }
        validate::validate_target(&input.target)?;
        self.execute(
            operations::CREATE_ASSET,
            "createAsset",
            json!({ "input": input }),
        )
        .await
    }

    pub async fn delete_asset(&self, id: &str) -> Result<bool, ApiError> {
        self.execute(operations::DELETE_ASSET, "deleteAsset", json!({ "id": id }))
            .await
    }
}
