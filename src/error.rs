use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::db::StoreError;
use crate::models::{ErrorResponse, ValidationErrorResponse};
use crate::services::validation::ValidationError;

pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Failure of a request, rendered as a JSON error body.
///
/// Validation and not-found are client errors; storage failures are the
/// only server-side kind.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("item {0} not found")]
    NotFound(i64),

    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Storage(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(e) => {
                debug!("Rejected request: {}", e);
                (status, Json(ValidationErrorResponse { detail: e.errors })).into_response()
            }
            ApiError::NotFound(id) => {
                info!(item_id = id, "Item not found");
                (
                    status,
                    Json(ErrorResponse {
                        detail: ITEM_NOT_FOUND.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Storage(e) => {
                error!("Storage error: {}", e);
                (
                    status,
                    Json(ErrorResponse {
                        detail: "Internal Server Error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound(3));
        assert!(matches!(err, ApiError::NotFound(3)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_failure_maps_to_500() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn overflow_maps_to_500() {
        let err = ApiError::from(StoreError::Overflow);
        assert!(matches!(err, ApiError::Storage(StoreError::Overflow)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_failure_maps_to_422() {
        let err = ApiError::from(crate::services::validation::parse_item_id("x").unwrap_err());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
