//! AI study assistant pipeline.
//!
//! One chat submission runs one sequential pass:
//!
//! 1. [`tokenize`] the question into search terms
//! 2. rank the sermon and note snapshots ([`rank_sermons`], [`rank_notes`])
//! 3. assemble the bounded context block ([`assemble_context`])
//! 4. call the completion backend through the model fallback ladder
//! 5. post-process into a displayable answer ([`render_response`])
//!
//! The completion provider sits behind [`completion::CompletionBackend`] so
//! the ladder can be tested with a scripted mock.

mod assembler;
mod ladder;
mod postprocess;
mod prompt;
mod ranker;
mod service;
mod tokenizer;

pub mod completion;

pub use assembler::{
    assemble_context, notes_block, sermons_block, trim_to_sentence, AssemblerConfig,
    BUDGET_MARKER, CATEGORY_SEPARATOR,
};
pub use ladder::{AttemptOutcome, LadderStage, ModelLadder};
pub use postprocess::{render_response, FALLBACK_MESSAGE, TRUNCATION_NOTICE};
pub use prompt::{build_parts, RESPONSE_INSTRUCTION};
pub use ranker::{rank_notes, rank_sermons, score_text, RankWeights, ScopedNote};
pub use service::{ChatConfig, ChatOutcome, ChatService};
pub use tokenizer::tokenize;
