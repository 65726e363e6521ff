use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("File type {0} is not allowed. Only image/jpeg, image/png, image/webp, image/gif are supported.")]
    UnsupportedImageType(String),

    #[error("Upload is too large: {0}")]
    PayloadTooLarge(String),

    #[error("Image storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product is not found".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            err @ ProductError::UnsupportedImageType(_) => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            ProductError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            ProductError::Storage(msg) => AppError::InternalServerError(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<std::io::Error> for ProductError {
    fn from(err: std::io::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}

impl From<MultipartError> for ProductError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProductError::PayloadTooLarge(err.body_text())
        } else {
            ProductError::Validation(err.body_text())
        }
    }
}
