//! Chat pipeline orchestration: tokenize, rank, assemble, complete with
//! model fallback, post-process.

use gemini::{
    models::{FinishReason, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        UsageMetadata},
    GeminiError,
};
use serde::Serialize;

use crate::domain::StudyLibrary;

use super::{
    assemble_context, build_parts, notes_block, rank_notes, rank_sermons, render_response,
    sermons_block, tokenize,
    completion::CompletionBackend,
    ladder::{AttemptOutcome, LadderStage, ModelLadder},
    AssemblerConfig, RankWeights, RESPONSE_INSTRUCTION,
};

#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub ladder: ModelLadder,
    pub weights: RankWeights,
    pub assembler: AssemblerConfig,
    pub generation: GenerationConfig,
}

/// Final pipeline output, mirrored onto the route response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOutcome {
    pub ai_response: String,
    pub finish_reason: Option<FinishReason>,
    pub usage_metadata: Option<UsageMetadata>,
    pub context_char_count: usize,
    pub model_used: String,
}

/// One chat submission runs one sequential pipeline pass; every value here
/// is constructed fresh per call and discarded afterwards, so a failed run
/// leaves nothing behind for the next submission.
pub struct ChatService<C>
where
    C: CompletionBackend,
{
    backend: C,
    config: ChatConfig,
}

impl<C> ChatService<C>
where
    C: CompletionBackend,
{
    pub fn new(backend: C, config: ChatConfig) -> Self {
        Self { backend, config }
    }

    pub fn with_defaults(backend: C) -> Self {
        Self::new(backend, ChatConfig::default())
    }

    /// Rank the snapshot against the question and assemble the bounded
    /// context block.
    pub fn assemble_for_query(&self, library: &StudyLibrary, user_message: &str) -> String {
        let terms = tokenize(user_message);

        let sermons = rank_sermons(
            &library.sermons,
            &terms,
            &self.config.weights,
            self.config.assembler.max_sermons,
        );
        let notes = rank_notes(
            &library.personal_notes,
            &library.community_notes,
            &terms,
            &self.config.weights,
            self.config.assembler.max_notes,
        );

        let blocks = [
            sermons_block(&sermons, &self.config.assembler),
            notes_block(&notes, &self.config.assembler),
        ];
        assemble_context(&blocks, &self.config.assembler)
    }

    /// Answer one user question.
    ///
    /// `context_override` keeps the inbound wire contract: a caller-supplied
    /// pre-assembled context is used verbatim instead of ranking the
    /// snapshot.
    pub async fn answer(
        &self,
        library: &StudyLibrary,
        user_message: &str,
        context_override: Option<String>,
    ) -> Result<ChatOutcome, GeminiError> {
        let full_context = match context_override {
            Some(context) => context,
            None => self.assemble_for_query(library, user_message),
        };

        let request = GenerateContentRequest::single_turn(
            RESPONSE_INSTRUCTION,
            build_parts(&full_context, user_message),
            self.config.generation,
        );

        let mut stage = LadderStage::Primary;
        loop {
            let model = self.config.ladder.model(stage);
            tracing::debug!(model, stage = ?stage, "Completion attempt");

            let result = self.backend.complete(model, &request).await;
            let outcome = classify(&result);

            match stage.next(outcome) {
                Some(next_stage) => {
                    tracing::info!(model, outcome = ?outcome, "Falling back to next model");
                    stage = next_stage;
                }
                None => {
                    return result
                        .map(|response| self.finish(response, model, &full_context));
                }
            }
        }
    }

    fn finish(
        &self,
        response: GenerateContentResponse,
        model: &str,
        full_context: &str,
    ) -> ChatOutcome {
        ChatOutcome {
            ai_response: render_response(&response),
            finish_reason: response.finish_reason(),
            usage_metadata: response.usage_metadata,
            context_char_count: full_context.chars().count(),
            model_used: model.to_string(),
        }
    }
}

fn classify(result: &Result<GenerateContentResponse, GeminiError>) -> AttemptOutcome {
    match result {
        Err(_) => AttemptOutcome::Failed,
        Ok(response) if response.candidates.is_empty() => AttemptOutcome::NoCandidates,
        Ok(response)
            if response
                .finish_reason()
                .is_some_and(FinishReason::is_length_limit) =>
        {
            AttemptOutcome::LengthLimited
        }
        Ok(_) => AttemptOutcome::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::completion::MockCompletion;
    use crate::domain::chat::{FALLBACK_MESSAGE, TRUNCATION_NOTICE};
    use crate::domain::Sermon;

    fn service(mock: &MockCompletion) -> ChatService<MockCompletion> {
        ChatService::with_defaults(mock.clone())
    }

    fn api_error() -> GeminiError {
        GeminiError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        }
    }

    #[tokio::test]
    async fn clean_primary_answer_makes_one_attempt() {
        let mock = MockCompletion::scripted(vec![Ok(MockCompletion::reply(
            "Answer.",
            FinishReason::Stop,
        ))]);

        let outcome = service(&mock)
            .answer(&StudyLibrary::default(), "what about grace?", None)
            .await
            .unwrap();

        assert_eq!(mock.models_called(), vec!["gemini-2.5-flash"]);
        assert_eq!(outcome.ai_response, "Answer.");
        assert_eq!(outcome.model_used, "gemini-2.5-flash");
        assert_eq!(outcome.finish_reason, Some(FinishReason::Stop));
    }

    #[tokio::test]
    async fn primary_length_limit_falls_back_to_secondary_once() {
        let mock = MockCompletion::scripted(vec![
            Ok(MockCompletion::reply("truncated", FinishReason::MaxTokens)),
            Ok(MockCompletion::reply("full answer", FinishReason::Stop)),
        ]);

        let outcome = service(&mock)
            .answer(&StudyLibrary::default(), "long question", None)
            .await
            .unwrap();

        assert_eq!(
            mock.models_called(),
            vec!["gemini-2.5-flash", "gemini-2.0-flash"]
        );
        assert_eq!(outcome.ai_response, "full answer");
        assert_eq!(outcome.model_used, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn length_limited_fallback_is_accepted_with_notice() {
        let mock = MockCompletion::scripted(vec![
            Ok(MockCompletion::reply("cut", FinishReason::MaxTokens)),
            Ok(MockCompletion::reply("also cut", FinishReason::MaxTokens)),
        ]);

        let outcome = service(&mock)
            .answer(&StudyLibrary::default(), "question", None)
            .await
            .unwrap();

        // Second length limit is accepted, not retried further.
        assert_eq!(mock.call_count(), 2);
        assert!(outcome.ai_response.starts_with("also cut"));
        assert!(outcome.ai_response.ends_with(TRUNCATION_NOTICE));
    }

    #[tokio::test]
    async fn exhausted_ladder_surfaces_upstream_error_after_three_attempts() {
        let mock = MockCompletion::scripted(vec![
            Ok(MockCompletion::reply("cut", FinishReason::MaxTokens)),
            Err(api_error()),
            Err(api_error()),
        ]);

        let err = service(&mock)
            .answer(&StudyLibrary::default(), "question", None)
            .await
            .unwrap_err();

        assert_eq!(
            mock.models_called(),
            vec!["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"]
        );
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn empty_secondary_response_reaches_tertiary() {
        let mock = MockCompletion::scripted(vec![
            Ok(MockCompletion::reply("cut", FinishReason::MaxTokens)),
            Ok(MockCompletion::empty_reply()),
            Ok(MockCompletion::reply("rescued", FinishReason::Stop)),
        ]);

        let outcome = service(&mock)
            .answer(&StudyLibrary::default(), "question", None)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 3);
        assert_eq!(outcome.ai_response, "rescued");
        assert_eq!(outcome.model_used, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn primary_outright_failure_is_terminal() {
        let mock = MockCompletion::scripted(vec![Err(api_error())]);

        let err = service(&mock)
            .answer(&StudyLibrary::default(), "question", None)
            .await
            .unwrap_err();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(err.to_string(), "model overloaded");
    }

    #[tokio::test]
    async fn malformed_primary_payload_degrades_to_fallback_message() {
        let mock = MockCompletion::scripted(vec![Ok(MockCompletion::empty_reply())]);

        let outcome = service(&mock)
            .answer(&StudyLibrary::default(), "question", None)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(outcome.ai_response, FALLBACK_MESSAGE);
        assert_eq!(outcome.finish_reason, None);
    }

    #[tokio::test]
    async fn context_override_is_used_verbatim() {
        let mock = MockCompletion::scripted(vec![Ok(MockCompletion::reply(
            "ok",
            FinishReason::Stop,
        ))]);

        let outcome = service(&mock)
            .answer(
                &StudyLibrary::default(),
                "question",
                Some("prebuilt context".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(outcome.context_char_count, "prebuilt context".len());
    }

    #[tokio::test]
    async fn assembled_context_counts_toward_outcome() {
        let library = StudyLibrary {
            sermons: vec![Sermon {
                title: "On Grace".to_string(),
                summary: "Grace upon grace.".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mock = MockCompletion::scripted(vec![Ok(MockCompletion::reply(
            "ok",
            FinishReason::Stop,
        ))]);

        let outcome = service(&mock)
            .answer(&library, "tell me about grace", None)
            .await
            .unwrap();

        let expected = service(&mock).assemble_for_query(&library, "tell me about grace");
        assert_eq!(outcome.context_char_count, expected.chars().count());
        assert!(expected.contains("On Grace"));
    }
}
