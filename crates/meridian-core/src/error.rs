//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Message returned to callers in place of internal failure details.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

/// Unified error type for all layers of Meridian.
///
/// Domain failures (`NotFound`, `Conflict`, `Validation`) are raised by the
/// service layer and translated by the boundary. Everything else is an
/// internal failure whose detail is logged but never shown to callers.
#[derive(Error, Debug)]
pub enum MeridianError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} not found with {key}: {value}")]
    NotFound {
        resource_type: &'static str,
        key: &'static str,
        value: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (the resource already exists)
    #[error("{0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeridianError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for failures that must not leak their detail to callers.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Returns the message that is safe to show to an API caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::not_found_by(resource_type, "id", id)
    }

    /// Creates a not found error for a lookup by a named key.
    #[must_use]
    pub fn not_found_by<T: ToString>(resource_type: &'static str, key: &'static str, value: T) -> Self {
        Self::NotFound {
            resource_type,
            key,
            value: value.to_string(),
        }
    }

    /// Creates a conflict error for a unique key that is already taken.
    #[must_use]
    pub fn already_exists(resource_type: &str, field: &str, value: &str) -> Self {
        Self::Conflict(format!(
            "{resource_type} with {field} '{value}' already exists"
        ))
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a `NotFound` error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a `Conflict` error.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for MeridianError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // 1062 is the MySQL duplicate-key error number, 23505 the PostgreSQL SQLSTATE
            let duplicate_code = db_err
                .code()
                .is_some_and(|code| code == "23505" || code == "1062");
            if db_err.is_unique_violation() || duplicate_code {
                return Self::Conflict(
                    "A resource with the same unique value already exists".to_string(),
                );
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for MeridianError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `MeridianError`.
    #[must_use]
    pub fn from_error(error: &MeridianError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&MeridianError> for ErrorResponse {
    fn from(error: &MeridianError) -> Self {
        Self::from_error(error)
    }
}
