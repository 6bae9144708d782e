//! Wire models for the Generative Language `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// The API accepts this field in snake_case, unlike `generationConfig`.
    #[serde(rename = "system_instruction")]
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request: one system instruction and one user content made
    /// up of the given text parts.
    pub fn single_turn(
        system_instruction: impl Into<String>,
        parts: Vec<String>,
        generation_config: GenerationConfig,
    ) -> Self {
        Self {
            system_instruction: Content::from_text(system_instruction),
            contents: vec![Content {
                parts: parts.into_iter().map(|text| Part { text }).collect(),
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Finish signal of the first candidate, if any.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first().and_then(|c| c.finish_reason)
    }

    /// Concatenation of all text fragments of the first candidate, trimmed.
    ///
    /// Returns `None` when there are no candidates, no parts, or only empty
    /// fragments.
    pub fn concatenated_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Why the model stopped producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    #[serde(other)]
    Other,
}

impl FinishReason {
    pub fn is_length_limit(self) -> bool {
        matches!(self, FinishReason::MaxTokens)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_expected_field_names() {
        let request = GenerateContentRequest::single_turn(
            "be terse",
            vec!["rule".to_string(), "question".to_string()],
            GenerationConfig::default(),
        );
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("system_instruction").is_some());
        assert!(json.get("generationConfig").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["contents"][0]["parts"][1]["text"], "question");
    }

    #[test]
    fn concatenated_text_joins_fragments() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.concatenated_text().as_deref(), Some("Hello world"));
        assert_eq!(response.finish_reason(), Some(FinishReason::Stop));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(response.candidates.is_empty());
        assert!(response.concatenated_text().is_none());
        assert!(response.finish_reason().is_none());
    }

    #[test]
    fn unknown_finish_reason_falls_back_to_other() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "BLOCKLIST" }]
        }))
        .unwrap();

        assert_eq!(response.finish_reason(), Some(FinishReason::Other));
    }
}
