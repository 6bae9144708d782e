//! Scripted completion backend for testing the fallback ladder.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gemini::{
    models::{
        Candidate, CandidateContent, CandidatePart, FinishReason, GenerateContentRequest,
        GenerateContentResponse,
    },
    GeminiError,
};

use super::CompletionBackend;

/// Completion backend that replays a fixed script of replies and records
/// which models were attempted, in order.
///
/// # Examples
///
/// ```
/// use berea_api::domain::chat::completion::MockCompletion;
/// use gemini::models::FinishReason;
///
/// let backend = MockCompletion::scripted(vec![
///     Ok(MockCompletion::reply("too long", FinishReason::MaxTokens)),
///     Ok(MockCompletion::reply("short answer", FinishReason::Stop)),
/// ]);
/// ```
#[derive(Clone)]
pub struct MockCompletion {
    replies: Arc<Mutex<VecDeque<Result<GenerateContentResponse, GeminiError>>>>,
    models_called: Arc<Mutex<Vec<String>>>,
}

impl MockCompletion {
    /// Create a mock that pops one scripted reply per attempt.
    pub fn scripted(replies: Vec<Result<GenerateContentResponse, GeminiError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            models_called: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Well-formed single-candidate response with the given text and finish
    /// signal.
    pub fn reply(text: &str, finish_reason: FinishReason) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.to_string()),
                    }],
                }),
                finish_reason: Some(finish_reason),
            }],
            usage_metadata: None,
        }
    }

    /// Success-status response with an empty candidate list.
    pub fn empty_reply() -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![],
            usage_metadata: None,
        }
    }

    /// Models attempted so far, in call order.
    pub fn models_called(&self) -> Vec<String> {
        self.models_called.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.models_called.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletion {
    async fn complete(
        &self,
        model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.models_called.lock().unwrap().push(model.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GeminiError::Request("mock script exhausted".to_string())))
    }
}
