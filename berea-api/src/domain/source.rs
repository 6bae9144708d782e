//! Capability interface for the hosted note store.
//!
//! The store's query contract (pagination, ordering, filtering) is owned by
//! the external collaborator; the pipeline only needs the fetched collections.

use async_trait::async_trait;
use thiserror::Error;

use super::documents::Note;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("FetchError: {0}")]
    Fetch(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Community-shared notes, most-liked first.
    async fn fetch_community_notes(&self) -> Result<Vec<Note>, SourceError>;

    /// The given user's own notes, newest first, capped by the store.
    async fn fetch_personal_notes(&self, user_id: &str) -> Result<Vec<Note>, SourceError>;
}
