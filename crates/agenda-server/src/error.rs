//! JSON error responses for the HTTP API.

use agenda_core::AgendaError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, code: "not_found", message: msg.into(), details: None }
    }
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "bad_request", message: msg.into(), details: None }
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, code: "time_conflict", message: msg.into(), details: None }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "internal_error", message: msg.into(), details: None }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(details) = self.details {
            error["details"] = details;
        }
        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<AgendaError> for ApiError {
    fn from(err: AgendaError) -> Self {
        match &err {
            e if e.is_not_found() => ApiError::not_found(err.to_string()),
            AgendaError::EmptyDay { .. } => ApiError::not_found(err.to_string()),
            AgendaError::TimeConflict(conflict) => {
                let details = serde_json::to_value(conflict).unwrap_or(Value::Null);
                ApiError::conflict(err.to_string()).with_details(details)
            }
            AgendaError::InvalidDay { .. }
            | AgendaError::DayMismatch { .. }
            | AgendaError::MissingArgument(_)
            | AgendaError::InvalidTime(_) => ApiError::bad_request(err.to_string()),
            _ => {
                tracing::error!(error = %err, "request failed");
                ApiError::internal(err.to_string())
            }
        }
    }
}
