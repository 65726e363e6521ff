use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ContentGenerator;
use crate::error::{AiError, AiResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini provider configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl FromEnv for GeminiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("GEMINI_API_KEY")?;
        Ok(Self::new(api_key)
            .with_model(env_or_default("AI_MODEL", DEFAULT_MODEL))
            .with_base_url(env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL)))
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> AiResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::NotConfigured("GEMINI_API_KEY is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> AiResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text().ok_or(AiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "world" }] },
                "finishReason": "STOP"
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(
            GeminiConfig::new("k")
                .with_model("gemini-2.0-flash")
                .with_base_url("http://localhost:1234/"),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new(" ")),
            Err(AiError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", Some("secret")),
                ("AI_MODEL", Some("gemini-pro")),
                ("GEMINI_BASE_URL", None),
            ],
            || {
                let config = GeminiConfig::from_env().unwrap();
                assert_eq!(config.api_key, "secret");
                assert_eq!(config.model, "gemini-pro");
                assert_eq!(config.base_url, DEFAULT_BASE_URL);
            },
        );
        temp_env::with_var_unset("GEMINI_API_KEY", || {
            assert!(GeminiConfig::from_env().is_err());
        });
    }

    #[tokio::test]
    async fn test_mock_generator() {
        let mut mock = crate::MockContentGenerator::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("summarize"))
            .returning(|_| Ok("short".to_string()));
        assert_eq!(mock.generate("please summarize this").await.unwrap(), "short");
    }
}
