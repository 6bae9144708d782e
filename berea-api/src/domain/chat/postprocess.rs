//! Response post-processing: always yields a displayable string.

use gemini::models::{FinishReason, GenerateContentResponse};

pub const FALLBACK_MESSAGE: &str = "Sorry, I could not generate a response.";

pub const TRUNCATION_NOTICE: &str =
    "\n\n[Response truncated due to token limit. Please ask a narrower follow-up if needed.]";

/// Extract the first candidate's concatenated text, substituting the fixed
/// fallback message when extraction yields nothing, and appending the
/// truncation notice on a length-limit finish. Never fails.
pub fn render_response(response: &GenerateContentResponse) -> String {
    let mut text = response
        .concatenated_text()
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    if response
        .finish_reason()
        .is_some_and(FinishReason::is_length_limit)
    {
        text.push_str(TRUNCATION_NOTICE);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::completion::MockCompletion;

    #[test]
    fn normal_finish_returns_text_unchanged() {
        let response = MockCompletion::reply("Six bullets here.", FinishReason::Stop);
        assert_eq!(render_response(&response), "Six bullets here.");
    }

    #[test]
    fn length_limit_appends_notice() {
        let response = MockCompletion::reply("Partial answer", FinishReason::MaxTokens);
        let rendered = render_response(&response);

        assert!(rendered.starts_with("Partial answer"));
        assert!(rendered.ends_with(TRUNCATION_NOTICE));
    }

    #[test]
    fn missing_candidates_yield_fallback_message() {
        let response = MockCompletion::empty_reply();
        assert_eq!(render_response(&response), FALLBACK_MESSAGE);
    }

    #[test]
    fn whitespace_only_fragments_yield_fallback_message() {
        let response = MockCompletion::reply("   ", FinishReason::Stop);
        assert_eq!(render_response(&response), FALLBACK_MESSAGE);
    }
}
