pub mod car;
pub mod common;

pub use car::{car_routes, API_PREFIX};
pub use common::{common_routes, common_routes_with_ready};

use crate::middleware::{envelope_errors, log_requests};
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Car routes wrapped in request logging and a body size limit. Plain-text
/// rejections from either layer leave as JSON envelopes.
pub fn app_router(state: AppState, body_limit_bytes: usize) -> Router {
    car_routes(state)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(axum::middleware::map_response(envelope_errors))
}
