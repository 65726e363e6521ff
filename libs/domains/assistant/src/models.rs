use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /assistant/summarize`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SummarizeRequest {
    #[serde(default, alias = "textToSummarize")]
    #[validate(length(min = 1, message = "Text to summarize is empty or invalid."))]
    pub text_to_summarize: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Fixed summarization prompt.
pub fn summarize_prompt(text: &str) -> String {
    format!("please summarize these content: \"{text}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_camel_case_field() {
        let request: SummarizeRequest =
            serde_json::from_str(r#"{"textToSummarize":"hello"}"#).unwrap();
        assert_eq!(request.text_to_summarize, "hello");
    }

    #[test]
    fn test_prompt_quotes_text() {
        assert_eq!(
            summarize_prompt("a b"),
            "please summarize these content: \"a b\""
        );
    }
}
