use core_ai::ContentGenerator;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{AssistantError, AssistantResult};
use crate::models::{SummarizeRequest, SummarizeResponse, summarize_prompt};

#[derive(Clone, Default)]
pub struct AssistantService {
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl AssistantService {
    /// `None` leaves the endpoints answering 503.
    pub fn new(generator: Option<Arc<dyn ContentGenerator>>) -> Self {
        Self { generator }
    }

    #[instrument(skip(self, request), fields(chars = request.text_to_summarize.len()))]
    pub async fn summarize(&self, request: SummarizeRequest) -> AssistantResult<SummarizeResponse> {
        let text = request.text_to_summarize.trim();
        if text.is_empty() {
            return Err(AssistantError::EmptyText);
        }
        let generator = self.generator.as_ref().ok_or(AssistantError::NotConfigured)?;

        let summary = generator.generate(&summarize_prompt(text)).await?;
        Ok(SummarizeResponse { summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_ai::AiResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContentGenerator for Recorder {
        async fn generate(&self, prompt: &str) -> AiResult<String> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            Ok("short version".to_string())
        }
    }

    fn request(text: &str) -> SummarizeRequest {
        SummarizeRequest {
            text_to_summarize: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_summarize_sends_fixed_prompt() {
        let recorder = Arc::new(Recorder::default());
        let generator: Arc<dyn ContentGenerator> = recorder.clone();
        let service = AssistantService::new(Some(generator));

        let response = service.summarize(request("  long text  ")).await.unwrap();
        assert_eq!(response.summary, "short version");
        assert_eq!(
            recorder.prompts.lock().unwrap().as_slice(),
            ["please summarize these content: \"long text\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_configuration_check() {
        let service = AssistantService::new(None);
        let err = service.summarize(request("   ")).await.unwrap_err();
        assert!(matches!(err, AssistantError::EmptyText));

        let err = service.summarize(request("text")).await.unwrap_err();
        assert!(matches!(err, AssistantError::NotConfigured));
    }
}
