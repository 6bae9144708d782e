//! Builds the per-session [`StudyLibrary`] snapshot from the configured
//! sources.
//!
//! The bundled sermon JSON is the baseline; remote notes are layered on top
//! when Supabase is configured. Note-fetch failures are logged and tolerated
//! so the assistant still works from the static library alone.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{DocumentSource, StudyLibrary, SourceError};

use super::{load_sermon_bundle, SupabaseDocumentSource};

pub struct LibraryLoader {
    bundle_path: Option<PathBuf>,
    source: Option<Arc<dyn DocumentSource>>,
    user_id: Option<String>,
}

impl LibraryLoader {
    pub fn new(
        bundle_path: Option<PathBuf>,
        source: Option<Arc<dyn DocumentSource>>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            bundle_path,
            source,
            user_id,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let source = settings.supabase.as_ref().map(|supabase| {
            Arc::new(SupabaseDocumentSource::new(
                supabase.url.clone(),
                supabase.anon_key.clone(),
            )) as Arc<dyn DocumentSource>
        });
        let user_id = settings
            .supabase
            .as_ref()
            .and_then(|supabase| supabase.user_id.clone());

        Self::new(
            settings.context.sermon_bundle_path.clone().map(PathBuf::from),
            source,
            user_id,
        )
    }

    /// Fetch a fresh snapshot. Fails only when the sermon bundle itself is
    /// unreadable.
    pub async fn load(&self) -> Result<StudyLibrary, SourceError> {
        let sermons = match &self.bundle_path {
            Some(path) => load_sermon_bundle(path)?,
            None => Vec::new(),
        };

        let mut library = StudyLibrary {
            sermons,
            ..Default::default()
        };

        if let Some(source) = &self.source {
            match source.fetch_community_notes().await {
                Ok(notes) => library.community_notes = notes,
                Err(err) => tracing::warn!(error = %err, "Failed to fetch community notes"),
            }

            if let Some(user_id) = &self.user_id {
                match source.fetch_personal_notes(user_id).await {
                    Ok(notes) => library.personal_notes = notes,
                    Err(err) => tracing::warn!(error = %err, "Failed to fetch personal notes"),
                }
            }
        }

        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Note;
    use async_trait::async_trait;

    struct StubSource;

    #[async_trait]
    impl DocumentSource for StubSource {
        async fn fetch_community_notes(&self) -> Result<Vec<Note>, SourceError> {
            Ok(vec![Note {
                content: "shared".to_string(),
                ..Default::default()
            }])
        }

        async fn fetch_personal_notes(&self, _user_id: &str) -> Result<Vec<Note>, SourceError> {
            Err(SourceError::Fetch("store offline".to_string()))
        }
    }

    #[tokio::test]
    async fn note_fetch_failures_do_not_sink_the_snapshot() {
        let loader = LibraryLoader::new(
            None,
            Some(Arc::new(StubSource)),
            Some("user-1".to_string()),
        );

        let library = loader.load().await.unwrap();

        assert_eq!(library.community_notes.len(), 1);
        assert!(library.personal_notes.is_empty());
        assert!(library.sermons.is_empty());
    }
}
