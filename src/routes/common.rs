//! Liveness, readiness and build info.

use crate::repository::CarRepository;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}

/// Opens and immediately rolls back a unit of work on the car store.
async fn ready(State(repository): State<Arc<dyn CarRepository>>) -> (StatusCode, Json<Readiness>) {
    let uow = match repository.begin().await {
        Ok(uow) => uow,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "degraded",
                    database: "unavailable",
                }),
            );
        }
    };
    if let Err(e) = uow.rollback().await {
        tracing::warn!(error = %e, "readiness rollback failed");
    }
    (
        StatusCode::OK,
        Json(Readiness {
            status: "ok",
            database: "ok",
        }),
    )
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health and GET /version; no store needed.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// Adds GET /ready, which checks the car store can open a transaction.
pub fn common_routes_with_ready(repository: Arc<dyn CarRepository>) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(repository)
        .merge(common_routes())
}
