use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::{
    db::ItemStore,
    error::ApiError,
    models::{ItemSumResponse, ItemView},
    services::validation::{parse_body, parse_item_id, validate_create},
    state::AppState,
};

/// Create a new item
pub async fn create_item<S: ItemStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    let raw = parse_body(&body)?;
    let item = validate_create(&raw)?;

    let created = state.store.create(item).await?;

    Ok((StatusCode::CREATED, Json(ItemView::from(created))))
}

/// List every item
pub async fn list_items<S: ItemStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    let items = state.store.list_all().await?;
    debug!(count = items.len(), "Returning items");
    Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

/// Fetch a single item by id
pub async fn get_item<S: ItemStore>(
    State(state): State<AppState<S>>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemView>, ApiError> {
    let id = parse_item_id(&item_id)?;
    let item = state.store.get_by_id(id).await?;
    Ok(Json(ItemView::from(item)))
}

/// Sum of all item prices
pub async fn sum_items<S: ItemStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<ItemSumResponse>, ApiError> {
    let total_price = state.store.sum_prices().await?;
    Ok(Json(ItemSumResponse { total_price }))
}
