//! Error types for the profile service
//!
//! `ProfileError` is what a request can fail with; `FetchError` is what a
//! single upstream call can fail with. Adapters never let a `FetchError`
//! escape: they log it and return their neutral value instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Profile Error Enum ==
/// Request-level failure of the aggregation pipeline.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Mandatory credential or identity missing
    #[error("Profile not configured: {0}")]
    NotConfigured(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::NotConfigured(_) => "not_configured",
            ProfileError::Internal(_) => "internal",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProfileError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProfileError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

// == Fetch Error Enum ==
/// Failure of one upstream HTTP call.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    /// Request did not finish within the per-call timeout
    #[error("{0} request timed out")]
    Timeout(&'static str),

    /// Connection or protocol failure
    #[error("{source_name} request failed: {message}")]
    Transport {
        source_name: &'static str,
        message: String,
    },

    /// Body could not be decoded into the expected shape
    #[error("{source_name} response could not be decoded: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },
}

impl FetchError {
    /// Classifies a reqwest error raised while sending or reading a request.
    pub fn from_reqwest(source_name: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(source_name)
        } else if err.is_decode() {
            FetchError::Decode {
                source_name,
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                source_name,
                message: err.to_string(),
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the profile service.
pub type Result<T> = std::result::Result<T, ProfileError>;
