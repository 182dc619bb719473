//! Edge error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use storefront_shared::RegionError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    // Region backend errors
    #[error("Region fetch failed: {0}")]
    RegionFetch(String),
    #[error("No regions found")]
    RegionsNotFound,

    // Storefront upstream errors
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    // Internal errors
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            EdgeError::RegionFetch(msg) => {
                (StatusCode::BAD_GATEWAY, "REGION_FETCH_FAILED", msg.clone())
            }
            EdgeError::RegionsNotFound => {
                (StatusCode::NOT_FOUND, "REGIONS_NOT_FOUND", self.to_string())
            }
            EdgeError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILED", msg.clone()),
            EdgeError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                self.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<RegionError> for EdgeError {
    fn from(err: RegionError) -> Self {
        match err {
            RegionError::Fetch(msg) => EdgeError::RegionFetch(msg),
            RegionError::MissingRegions => EdgeError::RegionsNotFound,
        }
    }
}

impl From<reqwest::Error> for EdgeError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!(error = %err, "Upstream request error");
        EdgeError::Upstream(err.to_string())
    }
}

/// Result type alias for edge handlers
pub type EdgeResult<T> = Result<T, EdgeError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_status_mapping() {
        let resp = EdgeError::RegionFetch("status 500".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = EdgeError::RegionsNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = EdgeError::Upstream("connect refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_region_error_conversion() {
        assert!(matches!(
            EdgeError::from(RegionError::MissingRegions),
            EdgeError::RegionsNotFound
        ));
        assert!(matches!(
            EdgeError::from(RegionError::Fetch("timeout".into())),
            EdgeError::RegionFetch(_)
        ));
    }
}
