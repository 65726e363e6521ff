//! Text generation for the assistant and SEO helpers.
//!
//! [`ContentGenerator`] is the seam; [`GeminiClient`] talks to the Google
//! Generative Language REST API.

mod error;
mod gemini;
mod json;

pub use error::{AiError, AiResult};
pub use gemini::{GeminiClient, GeminiConfig};
pub use json::extract_json_block;

use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Single-turn prompt, returns the concatenated text of the first candidate.
    async fn generate(&self, prompt: &str) -> AiResult<String>;
}
