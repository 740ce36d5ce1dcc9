//! Request logging: one structured line per request with both bodies.
//! Error normalisation: plain-text errors from inner layers become envelopes.

use crate::error::AppError;
use crate::response::ApiResponse;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::time::Instant;

/// Upper bound when reading a non-JSON error body to reuse as the message.
const ERROR_BODY_LIMIT: usize = 64 * 1024;

/// Best-effort JSON view of a body; anything unparseable logs as `{}`.
fn body_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Default::default()))
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let url = req.uri().path().to_string();

    let (parts, body) = req.into_parts();
    // size is capped by the body limit layer outside this one
    let req_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(url = %url, method = %method, error = %e, "request body rejected");
            return AppError::BadRequest(e.to_string()).into_response();
        }
    };
    let request_body = body_json(&req_bytes);
    let res = next.run(Request::from_parts(parts, Body::from(req_bytes))).await;

    let (parts, body) = res.into_parts();
    let res_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(url = %url, method = %method, error = %e, "response body unreadable");
            return AppError::Internal(e.to_string()).into_response();
        }
    };
    let response_body = body_json(&res_bytes);

    tracing::info!(
        url = %url,
        method = %method,
        request = %request_body,
        response = %response_body,
        status_code = parts.status.as_u16(),
        response_time = %format!("{}ms", start.elapsed().as_millis()),
        "request coming"
    );
    Response::from_parts(parts, Body::from(res_bytes))
}

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Wrap 4xx/5xx responses that are not already JSON (body limit, method
/// mismatch) in the standard envelope. Other headers such as `Allow` are kept.
pub async fn envelope_errors(res: Response) -> Response {
    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let (parts, body) = res.into_parts();
    let text = match axum::body::to_bytes(body, ERROR_BODY_LIMIT).await {
        Ok(b) => String::from_utf8_lossy(&b).trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "error body unreadable");
            String::new()
        }
    };
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("error").to_lowercase()
    } else {
        text
    };

    let mut out = (status, Json(ApiResponse::<()>::error(status, message))).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            out.headers_mut().insert(name.clone(), value.clone());
        }
    }
    out
}
