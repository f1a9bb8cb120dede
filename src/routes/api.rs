use crate::{
    db::ItemStore,
    docs::ApiDoc,
    handlers::{create_item, get_item, health_check, list_items, not_found, ready_check, sum_items},
    state::AppState,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create item routes
pub fn create_item_routes<S: ItemStore>(state: AppState<S>) -> Router {
    Router::<AppState<S>>::new()
        .route("/items", get(list_items::<S>).post(create_item::<S>))
        // Static segment, matched ahead of `/items/:item_id`
        .route("/items/sum", get(sum_items::<S>))
        .route("/items/:item_id", get(get_item::<S>))
        .route("/health", get(health_check))
        .route("/ready", get(ready_check::<S>))
        .with_state(state)
}

/// Build the full application around `store`
pub fn create_app<S: ItemStore>(store: Arc<S>) -> Router {
    create_item_routes(AppState::new(store))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Layers run bottom-up: the id is set before tracing sees the request
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
