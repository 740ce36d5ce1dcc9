//! Car handlers: create, list, detail.

use crate::error::AppError;
use crate::model::InsertCarRequest;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::telemetry::{record_json, Span};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::Instrument;

/// Write the envelope and record it on the handler span.
fn respond<T: Serialize>(span: &mut dyn Span, body: ApiResponse<T>) -> Response {
    record_json(span, "response", &body);
    let status = StatusCode::from_u16(body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

fn fail(span: &mut dyn Span, err: AppError) -> Response {
    if err.status_code().is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    respond(span, err.to_envelope())
}

pub async fn insert_car(State(state): State<AppState>, body: Bytes) -> Response {
    let mut span = state.tracer.start_span("Handler InsertData");

    let request: InsertCarRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return fail(span.as_mut(), AppError::BadRequest(e.to_string())),
    };
    record_json(span.as_mut(), "request", &request);

    match state.service.insert(request).instrument(span.context()).await {
        Ok(car) => respond(span.as_mut(), ApiResponse::success("success insert data", car)),
        Err(e) => fail(span.as_mut(), e),
    }
}

pub async fn get_all_cars(State(state): State<AppState>) -> Response {
    let mut span = state.tracer.start_span("Handler GetAll");

    match state.service.get_all().instrument(span.context()).await {
        Ok(cars) => respond(span.as_mut(), ApiResponse::success("success get all data cars", cars)),
        Err(e) => fail(span.as_mut(), e),
    }
}

pub async fn get_car_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut span = state.tracer.start_span("Handler GetDetail");

    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => return fail(span.as_mut(), AppError::BadRequest("cant convert id to int".into())),
    };

    match state.service.get_detail(id).instrument(span.context()).await {
        Ok(car) => respond(span.as_mut(), ApiResponse::success("success get data detail car", car)),
        Err(e) => fail(span.as_mut(), e),
    }
}
