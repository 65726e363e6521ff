use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

pub const INVALID_CREDENTIALS: &str = "Unauthorized, perhaps you need check your credentials";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not active")]
    Inactive,

    #[error("Old password is incorrect")]
    WrongPassword,

    #[error("New password cannot be the same as your old password.")]
    SamePassword,

    #[error("New password and confirm password do not match.")]
    PasswordMismatch,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            err @ (UserError::DuplicateEmail | UserError::DuplicateUsername) => {
                AppError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => AppError::Unauthorized(INVALID_CREDENTIALS.to_string()),
            err @ UserError::Inactive => AppError::Forbidden(err.to_string()),
            err @ UserError::WrongPassword => AppError::Unauthorized(err.to_string()),
            err @ (UserError::SamePassword | UserError::PasswordMismatch) => {
                AppError::BadRequest(err.to_string())
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        match database::mongodb::duplicate_key_field(&err).as_deref() {
            Some("email") => UserError::DuplicateEmail,
            Some("username") => UserError::DuplicateUsername,
            _ => UserError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (UserError::DuplicateEmail, StatusCode::CONFLICT),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::WrongPassword, StatusCode::UNAUTHORIZED),
            (UserError::Inactive, StatusCode::FORBIDDEN),
            (UserError::SamePassword, StatusCode::BAD_REQUEST),
            (UserError::PasswordMismatch, StatusCode::BAD_REQUEST),
            (UserError::PasswordHash("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
