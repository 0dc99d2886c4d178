//! Error handling for the certificate client
//!
//! Every failure maps to one stable code and one user-facing message per
//! category, so the command line and any other front end report the same
//! thing for the same problem.

use serde::Serialize;
use shared::{RepositoryError, ValidationError, ValidationErrors};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Input errors, raised before any request is sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Certificate ID is required")]
    EmptyCertificateId,

    // Session errors
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session token is malformed: {0}")]
    MalformedToken(String),

    // Backend errors
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable error body for `--json` output
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidationError>,
}

impl ClientError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::EmptyCertificateId => "VALIDATION_ERROR",
            ClientError::NotLoggedIn => "NOT_LOGGED_IN",
            ClientError::InvalidCredentials => "INVALID_CREDENTIALS",
            ClientError::MalformedToken(_) => "INVALID_TOKEN",
            ClientError::Repository(RepositoryError::NotFound(_)) => "NOT_FOUND",
            ClientError::Repository(RepositoryError::Forbidden) => "FORBIDDEN",
            ClientError::Repository(RepositoryError::Unauthorized) => "UNAUTHORIZED",
            ClientError::Repository(RepositoryError::Conflict(_)) => "DUPLICATE_ENTRY",
            ClientError::Repository(RepositoryError::Unknown(_)) => "TRANSPORT_ERROR",
            ClientError::Configuration(_) => "CONFIGURATION_ERROR",
            ClientError::Io(_) => "IO_ERROR",
            ClientError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Message to show the user for this category of failure
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => format!(
                "Please correct the highlighted fields: {}",
                errors
                    .errors()
                    .iter()
                    .map(|e| e.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ClientError::EmptyCertificateId => "Please enter a certificate ID.".to_string(),
            ClientError::NotLoggedIn => {
                "You are not logged in. Run `certctl login` first.".to_string()
            }
            ClientError::InvalidCredentials => {
                "Login failed. Please check your credentials.".to_string()
            }
            ClientError::MalformedToken(_)
            | ClientError::Repository(RepositoryError::Unauthorized) => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::Repository(RepositoryError::NotFound(_)) => {
                "Certificate not found. Please check the ID and try again.".to_string()
            }
            ClientError::Repository(RepositoryError::Forbidden) => {
                "You are not authorized to view this certificate.".to_string()
            }
            ClientError::Repository(RepositoryError::Conflict(_)) => {
                "A certificate with this ID already exists.".to_string()
            }
            ClientError::Repository(RepositoryError::Unknown(_)) | ClientError::Json(_) => {
                "An error occurred. Please try again.".to_string()
            }
            ClientError::Configuration(msg) => format!("Configuration error: {}", msg),
            ClientError::Io(e) => format!("File error: {}", e),
        }
    }

    /// Whether the stored session must be discarded
    pub fn is_session_invalid(&self) -> bool {
        matches!(
            self,
            ClientError::Repository(RepositoryError::Unauthorized) | ClientError::MalformedToken(_)
        )
    }

    pub fn to_response(&self) -> ErrorResponse {
        let fields = match self {
            ClientError::Validation(errors) => errors.errors().to_vec(),
            _ => Vec::new(),
        };
        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.user_message(),
                fields,
            },
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
