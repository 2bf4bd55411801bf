use crate::api::{ApiClient, ApiError, Asset, CreateAssetInput};
use leptos::*;

/// Asset collection owned by the consuming view. The core only hands back
/// deltas; entities it did not originate are never partially mutated.
#[derive(Debug, Clone, Default)]
pub struct AssetsState {
    pub assets: Vec<Asset>,
    pub loading: bool,
}

pub fn use_assets() -> (ReadSignal<AssetsState>, WriteSignal<AssetsState>) {
    create_signal(AssetsState::default())
}

/// Replaces the collection wholesale with the server's listing.
pub async fn load_assets(
    api_client: &ApiClient,
    set_assets_state: WriteSignal<AssetsState>,
) -> Result<(), ApiError> {
    set_assets_state.update(|state| state.loading = true);
    match api_client.assets().await {
        Ok(assets) => {
            set_assets_state.update(|state| {
                state.assets = assets;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_assets_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Appends the created asset to the collection.
pub async fn create_asset(
    api_client: &ApiClient,
    set_assets_state: WriteSignal<AssetsState>,
    input: CreateAssetInput,
) -> Result<Asset, ApiError> {
    let asset = api_client.create_asset(input).await?;
    let created = asset.clone();
    set_assets_state.update(|state| state.assets.push(created));
    Ok(asset)
}

/// Removes the asset from the collection once the server confirms.
pub async fn delete_asset(
    api_client: &ApiClient,
    set_assets_state: WriteSignal<AssetsState>,
    id: &str,
) -> Result<(), ApiError> {
    api_client.delete_asset(id).await?;
    let id = id.to_string();
    set_assets_state.update(|state| state.assets.retain(|asset| asset.id != id));
    Ok(())
}
