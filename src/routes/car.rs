//! Car routes, mounted under the versioned prefix.

use crate::handlers::{get_all_cars, get_car_detail, insert_car};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub const API_PREFIX: &str = "/v1";

/// `POST /v1/car`, `GET /v1/cars`, `GET /v1/car/:id`.
pub fn car_routes(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/car", post(insert_car))
        .route("/cars", get(get_all_cars))
        .route("/car/:id", get(get_car_detail))
        .with_state(state);
    Router::new().nest(API_PREFIX, v1)
}
