//! Type-safe error codes for API responses.
//!
//! Each code has a string form for clients (`"VALIDATION_ERROR"`), an integer
//! for logs and dashboards (`1001`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidId,
    InvalidJson,
    BadRequest,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    UnsupportedMediaType,
    UnprocessableEntity,
    PayloadTooLarge,

    // Server errors (5000-5999)
    InternalError,
    DatabaseError,
    SerdeJsonError,
    IoError,
    BadGateway,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ErrorCode::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::BadGateway => "BAD_GATEWAY",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidId => 1002,
            ErrorCode::InvalidJson => 1003,
            ErrorCode::BadRequest => 1004,
            ErrorCode::NotFound => 1005,
            ErrorCode::Unauthorized => 1006,
            ErrorCode::Forbidden => 1007,
            ErrorCode::Conflict => 1008,
            ErrorCode::UnsupportedMediaType => 1009,
            ErrorCode::UnprocessableEntity => 1010,
            ErrorCode::PayloadTooLarge => 1011,
            ErrorCode::InternalError => 5001,
            ErrorCode::DatabaseError => 5002,
            ErrorCode::SerdeJsonError => 5003,
            ErrorCode::IoError => 5004,
            ErrorCode::BadGateway => 5005,
            ErrorCode::ServiceUnavailable => 5006,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidId => "Invalid identifier format",
            ErrorCode::InvalidJson => "Invalid JSON body",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Forbidden => "Access forbidden",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::UnsupportedMediaType => "Unsupported media type",
            ErrorCode::UnprocessableEntity => "Unprocessable entity",
            ErrorCode::PayloadTooLarge => "Request body is too large",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::DatabaseError => "A database error occurred",
            ErrorCode::SerdeJsonError => "Failed to process JSON data",
            ErrorCode::IoError => "An I/O error occurred",
            ErrorCode::BadGateway => "An upstream service failed",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.code() < 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidId,
            ErrorCode::UnsupportedMediaType,
            ErrorCode::BadGateway,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_client_and_server_ranges() {
        assert!(ErrorCode::NotFound.is_client_error());
        assert!(!ErrorCode::DatabaseError.is_client_error());
    }
}
