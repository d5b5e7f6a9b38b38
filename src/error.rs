// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::OnceLock;

/// Remediation hint attached to every token rejection.
pub const REFRESH_HINT: &str = "Veuillez rafraîchir votre token ou vous reconnecter";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input (400)
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique field; the original API reports these as 400
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid or expired credentials (401)
    #[error("{message}")]
    Authentication {
        message: String,
        /// Client hint: refresh the token or log in again
        solution: Option<String>,
    },

    /// Role or ownership mismatch (403)
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Request-rate ceiling exceeded (429)
    #[error("Too many requests")]
    RateLimited,

    /// External weather provider failure, message passed through (500)
    #[error("Weather provider error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 401 without a remediation hint.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Authentication {
            message: message.into(),
            solution: None,
        }
    }

    /// 401 for a rejected token, carrying the refresh/re-login hint.
    pub fn token_rejected(message: impl Into<String>) -> Self {
        AppError::Authentication {
            message: message.into(),
            solution: Some(REFRESH_HINT.to_string()),
        }
    }
}

// Token *issuance* failures are server faults; verification failures are
// classified by the call sites into 401 responses instead.
impl From<crate::services::TokenError> for AppError {
    fn from(err: crate::services::TokenError) -> Self {
        AppError::Internal(anyhow::anyhow!("Token issuance failed: {err}"))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
}

/// Whether error responses expose internal detail. Set once at startup
/// from the loaded configuration; defaults to off.
static DEV_MODE: OnceLock<bool> = OnceLock::new();

/// Record the development flag for error rendering. Later calls are
/// ignored, so the flag cannot flip at runtime.
pub fn init_dev_mode(enabled: bool) {
    let _ = DEV_MODE.set(enabled);
}

/// Internal error details are only exposed in a development-like mode.
fn dev_details(msg: &str) -> Option<String> {
    if DEV_MODE.get().copied().unwrap_or(false) {
        Some(msg.to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, solution) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None, None)
            }
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None, None),
            AppError::Authentication { message, solution } => (
                StatusCode::UNAUTHORIZED,
                message.clone(),
                None,
                solution.clone(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone(), None, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None, None),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later.".to_string(),
                None,
                None,
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch weather".to_string(),
                Some(msg.clone()),
                None,
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erreur serveur".to_string(),
                    dev_details(msg),
                    None,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erreur serveur".to_string(),
                    dev_details(&format!("{err:#}")),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error,
            details,
            solution,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // DEV_MODE is process-global and write-once, so both halves of the
    // behavior live in one test with a fixed order.
    #[tokio::test]
    async fn test_dev_mode_gates_internal_details() {
        let body = render(AppError::Database("connection refused".to_string())).await;
        assert_eq!(body["error"], "Erreur serveur");
        assert!(body.get("details").is_none());

        init_dev_mode(true);

        let body = render(AppError::Database("connection refused".to_string())).await;
        assert_eq!(body["details"], "connection refused");
    }
}
