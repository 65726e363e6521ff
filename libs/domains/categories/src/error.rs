use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_ai::AiError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid category id: {0}")]
    InvalidId(String),

    #[error("Category {category} cannot be moved under {parent}: it is one of its ancestors")]
    Cycle { category: Uuid, parent: Uuid },

    #[error("Category slug already exists: {0}")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("AI suggestions are not configured")]
    AiNotConfigured,

    #[error("AI provider error: {0}")]
    Ai(#[from] AiError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => {
                AppError::NotFound("Category not found or already deleted.".to_string())
            }
            CategoryError::InvalidId(id) => AppError::InvalidId(id),
            err @ CategoryError::Cycle { .. } => AppError::BadRequest(err.to_string()),
            CategoryError::DuplicateSlug(_) => {
                AppError::Conflict("Category slug already exists".to_string())
            }
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::AiNotConfigured | CategoryError::Ai(AiError::NotConfigured(_)) => {
                AppError::ServiceUnavailable("AI suggestions are not configured".to_string())
            }
            CategoryError::Ai(e) => {
                AppError::BadGateway(format!("Failed to get suggestions from AI: {e}"))
            }
            CategoryError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CategoryError {
    fn from(err: mongodb::error::Error) -> Self {
        if database::mongodb::is_duplicate_key(&err) {
            return CategoryError::DuplicateSlug(err.to_string());
        }
        CategoryError::Database(err.to_string())
    }
}
