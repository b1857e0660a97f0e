//! Error types for the document Q&A service

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// One or more document ids are not in the registry, echoed as requested
    #[error("Documents not found: {}", .ids.join(", "))]
    NotFound { ids: Vec<String> },

    /// Upload content type outside the supported set
    #[error("Unsupported file type '{content_type}'. Supported: {}", .accepted.join(", "))]
    UnsupportedType {
        content_type: String,
        accepted: Vec<String>,
    },

    /// Malformed request or unreadable upload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reasoning backend is unconfigured or unreachable
    #[error("Reasoning backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Reasoning backend answered with something unusable
    #[error("Reasoning backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a not-found error for a single document
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound {
            ids: vec![id.to_string()],
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status used when this error reaches the transport layer
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::UnsupportedType { .. } | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Backend(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::UnsupportedType { .. } => "unsupported_type",
            Error::InvalidInput(_) => "invalid_input",
            Error::BackendUnavailable(_) => "backend_unavailable",
            Error::Backend(_) => "backend_error",
            Error::Config(_) => "config_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::BackendUnavailable(err.to_string())
        } else {
            Error::Backend(err.to_string())
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartRejection> for Error {
    fn from(rejection: MultipartRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut error = json!({
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match &self {
            Error::NotFound { ids } => {
                error["missing_ids"] = json!(ids);
            }
            Error::UnsupportedType { accepted, .. } => {
                error["accepted"] = json!(accepted);
            }
            Error::BackendUnavailable(_) | Error::Backend(_) | Error::Internal(_) => {
                tracing::error!("Request failed: {}", self);
            }
            _ => {}
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::not_found(Uuid::new_v4()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::invalid_input("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::backend_unavailable("no key").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(Error::backend("bad reply").status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_message_names_ids() {
        let a = Uuid::new_v4();
        let message = Error::NotFound {
            ids: vec![a.to_string(), "doc-123".to_string()],
        }
        .to_string();
        assert!(message.contains(&a.to_string()));
        assert!(message.contains("doc-123"));
    }

    #[tokio::test]
    async fn test_not_found_body_echoes_requested_ids() {
        let response = Error::NotFound {
            ids: vec!["doc-123".to_string()],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["type"], "not_found");
        assert_eq!(body["error"]["missing_ids"], json!(["doc-123"]));
    }

    #[test]
    fn test_unsupported_type_lists_accepted() {
        let err = Error::UnsupportedType {
            content_type: "application/zip".to_string(),
            accepted: vec!["text/plain".to_string(), "application/pdf".to_string()],
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("text/plain, application/pdf"));
    }
}
