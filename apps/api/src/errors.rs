use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::InferenceError;

/// Replaces raw error text in 500 responses when details are not exposed.
const GENERIC_DETAILS: &str = "An internal server error occurred";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": <reason phrase>, "details": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Inference error: {source}")]
    Inference {
        #[source]
        source: InferenceError,
        expose_details: bool,
    },

    #[error("Internal server error: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
        expose_details: bool,
    },
}

impl AppError {
    pub fn inference(source: InferenceError, expose_details: bool) -> Self {
        AppError::Inference {
            source,
            expose_details,
        }
    }

    pub fn internal(source: anyhow::Error, expose_details: bool) -> Self {
        AppError::Internal {
            source,
            expose_details,
        }
    }
}

/// Body deserialization failures from `axum::Json`. Missing or mistyped
/// fields are data errors (422); the message names the offending field.
/// A body over the extractor's size limit is 413.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::UnprocessableEntity(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                AppError::UnsupportedMediaType(e.body_text())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedMediaType(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg.clone())
            }
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::UnprocessableEntity(msg) => {
                tracing::debug!("Rejected request body: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::Inference {
                source,
                expose_details,
            } => {
                tracing::error!("Inference error: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    redact(source.to_string(), *expose_details),
                )
            }
            AppError::Internal {
                source,
                expose_details,
            } => {
                tracing::error!("Internal error: {source:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    redact(format!("{source:#}"), *expose_details),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "details": details
        }));

        (status, body).into_response()
    }
}

fn redact(details: String, expose: bool) -> String {
    if expose {
        details
    } else {
        GENERIC_DETAILS.to_string()
    }
}
