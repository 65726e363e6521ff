use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI provider is not configured: {0}")]
    NotConfigured(String),

    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("AI provider returned no text")]
    EmptyResponse,

    #[error("Failed to parse AI output: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type AiResult<T> = Result<T, AiError>;
