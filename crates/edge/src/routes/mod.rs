//! Edge routes

pub mod health;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{locale_middleware, request_id_middleware};
use crate::state::AppState;
use crate::upstream::forward_to_storefront;

/// Create the edge router.
///
/// Health probes are served locally; everything else flows through the locale
/// middleware and, on pass-through, is forwarded to the storefront origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .fallback(forward_to_storefront)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            locale_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
