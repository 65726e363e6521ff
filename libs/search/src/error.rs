use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Document {id} not found in index {index}")]
    DocumentNotFound { index: String, id: String },

    #[error("Search configuration error: {0}")]
    Config(String),

    #[error("Failed to encode search document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Search backend unavailable: {0}")]
    Unavailable(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
