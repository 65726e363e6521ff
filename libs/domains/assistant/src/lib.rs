//! AI assistant endpoints backed by a [`core_ai::ContentGenerator`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{AssistantError, AssistantResult};
pub use handlers::ApiDoc;
pub use models::{SummarizeRequest, SummarizeResponse};
pub use service::AssistantService;
