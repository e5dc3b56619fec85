//! Type-safe error codes for API responses.
//!
//! Each code has a client-facing string (e.g. "VALIDATION_ERROR"), an integer
//! for logs and dashboards (e.g. 1001) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidEnumValue;
//! assert_eq!(code.as_str(), "INVALID_ENUM_VALUE");
//! assert_eq!(code.code(), 1003);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Ranges: 1000-1999 client errors, 2000-2999 server and storage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more request fields violate their constraints
    ValidationError,

    /// Path identifier is not a valid id
    InvalidId,

    /// Text does not name a member of a closed enumeration
    InvalidEnumValue,

    /// Request body could not be parsed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Generic client error
    BadRequest,

    /// The backing store failed
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidEnumValue => "INVALID_ENUM_VALUE",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidEnumValue => 1003,
            Self::JsonExtraction => 1004,
            Self::NotFound => 1005,
            Self::BadRequest => 1006,
            Self::DatabaseError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid id format",
            Self::InvalidEnumValue => "Value is not one of the allowed options",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::DatabaseError => "A database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
