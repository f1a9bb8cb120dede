use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, error};

use crate::{
    db::ItemStore,
    models::{ErrorResponse, HealthResponse},
    state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint, answers 503 while the store is unreachable
pub async fn ready_check<S: ItemStore>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    debug!("Readiness check requested");
    match state.store.sum_prices().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                message: "Service is ready".to_string(),
            }),
        ),
        Err(e) => {
            error!("Readiness probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    message: "Item store is not reachable".to_string(),
                }),
            )
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "Not Found".to_string(),
        }),
    )
}
