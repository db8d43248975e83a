//! Request envelope handling shared by the workflow routers: payload extraction, the
//! error body contract, and the fixed CORS headers.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::scoring::validation::FieldError;

fn allow_origin() -> (header::HeaderName, HeaderValue) {
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}

/// Failure that stops a request before a result is assembled.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("No JSON data provided")]
    NoJson,
    #[error("{0}")]
    MissingPayload(&'static str),
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error("{0}")]
    Unexpected(String),
}

impl WorkflowError {
    pub fn status(&self) -> StatusCode {
        match self {
            WorkflowError::NoJson
            | WorkflowError::MissingPayload(_)
            | WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            WorkflowError::NoJson | WorkflowError::MissingPayload(_) => {
                json!({ "error": self.to_string() })
            }
            WorkflowError::Validation(err) => {
                json!({ "error": "Validation error", "message": err.to_string() })
            }
            WorkflowError::Unexpected(message) => {
                json!({ "error": "Internal server error", "message": message })
            }
        }
    }
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            [allow_origin()],
            axum::Json(self.body()),
        )
            .into_response()
    }
}

/// Names the top-level key a workflow reads and the message used when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    pub key: &'static str,
    pub missing_message: &'static str,
}

impl Envelope {
    /// Decode the raw body and return the object stored under `key`.
    ///
    /// Bodies that are not JSON, or are an empty/false-y document, are `NoJson`; an absent,
    /// null, or empty payload is `MissingPayload`.
    pub fn open(&self, body: &[u8]) -> Result<Map<String, Value>, WorkflowError> {
        let document: Value = serde_json::from_slice(body).map_err(|_| WorkflowError::NoJson)?;
        if is_blank(&document) {
            return Err(WorkflowError::NoJson);
        }

        let payload = document
            .as_object()
            .and_then(|object| object.get(self.key))
            .filter(|payload| !is_blank(payload))
            .ok_or(WorkflowError::MissingPayload(self.missing_message))?;

        match payload {
            Value::Object(object) => Ok(object.clone()),
            _ => Err(FieldError::InvalidType {
                field: self.key.to_string(),
                expected: "object",
            }
            .into()),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Object(object) => object.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Number(_) => false,
    }
}

/// Serialize a successful result with the CORS origin header.
pub fn respond<T: Serialize>(result: &T) -> Result<Response, WorkflowError> {
    let body =
        serde_json::to_vec(result).map_err(|err| WorkflowError::Unexpected(err.to_string()))?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            allow_origin(),
        ],
        body,
    )
        .into_response())
}

/// Answer a CORS preflight request.
pub async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            allow_origin(),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("POST"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
            (
                header::ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static("3600"),
            ),
        ],
    )
        .into_response()
}
