//! Application error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// The provider credential is missing or unusable
    #[error("{0}")]
    Configuration(String),

    /// The provider handle could not be established
    #[error("{0}")]
    Connection(String),

    /// The requested capability is not supported by the linked provider API
    #[error("{0}")]
    CapabilityUnavailable(String),

    /// The provider reported an error for the submitted task
    #[error("{message}")]
    Provider {
        code: Option<String>,
        message: String,
    },

    /// The provider call exceeded the configured deadline
    #[error("Provider call timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Provider error code, when the provider supplied one
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            AppError::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::CapabilityUnavailable(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
