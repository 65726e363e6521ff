use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_ai::AiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Text to summarize is empty or invalid.")]
    EmptyText,

    #[error("AI assistant is not configured")]
    NotConfigured,

    #[error("AI provider error: {0}")]
    Ai(#[from] AiError),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            err @ AssistantError::EmptyText => AppError::BadRequest(err.to_string()),
            err @ (AssistantError::NotConfigured | AssistantError::Ai(AiError::NotConfigured(_))) => {
                AppError::ServiceUnavailable(err.to_string())
            }
            AssistantError::Ai(e) => AppError::BadGateway(format!("Failed to summarize text: {e}")),
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
