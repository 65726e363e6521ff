/// Pull the JSON payload out of model output.
///
/// Accepts a fenced ```` ```json ```` block, any fenced block, or the span
/// from the first `{` to the last `}`.
pub fn extract_json_block(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```") {
        let after = &text[start + 3..];
        let body = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = body.find("```") {
            let block = body[..end].trim();
            if !block.is_empty() {
                return Some(block);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_block() {
        let text = "Here you go:\n```json\n{\"a\": [\"x\"]}\n```\nthanks";
        assert_eq!(extract_json_block(text), Some("{\"a\": [\"x\"]}"));
    }

    #[test]
    fn test_plain_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_block(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_raw_object() {
        let text = "sure {\"a\": 1} done";
        assert_eq!(extract_json_block(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json_block("no structured output here"), None);
    }
}
