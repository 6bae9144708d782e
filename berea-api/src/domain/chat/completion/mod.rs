//! Completion backend seam.
//!
//! Abstracts the generative-text provider so the pipeline and its fallback
//! ladder can be exercised against a scripted mock.

mod mock;

pub use mock::MockCompletion;

use async_trait::async_trait;
use gemini::{
    models::{GenerateContentRequest, GenerateContentResponse},
    GeminiClient, GeminiError,
};

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// One completion attempt against the given model.
    async fn complete(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn complete(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.generate_content(model, request).await
    }
}
