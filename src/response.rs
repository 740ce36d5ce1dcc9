//! Standard response envelope shared by every endpoint.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: code_to_status(StatusCode::OK).to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.as_u16(),
            status: code_to_status(code).to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Short status label for a numeric code; anything unlisted is an internal error.
pub fn code_to_status(code: StatusCode) -> &'static str {
    match code {
        StatusCode::OK => "ok",
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::NOT_FOUND => "not found",
        _ => "internal server error",
    }
}
