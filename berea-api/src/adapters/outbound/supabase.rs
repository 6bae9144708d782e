//! Supabase PostgREST adapter for the hosted note store.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::{DocumentSource, Note, SourceError};

/// Personal notes fetched per session, newest first.
const PERSONAL_NOTES_LIMIT: usize = 50;

pub struct SupabaseDocumentSource {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

impl SupabaseDocumentSource {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            http: reqwest::Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, SourceError> {
        let url = format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            path_and_query
        );

        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .send()
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Fetch(format!(
                "Supabase returned status {}",
                resp.status()
            )));
        }

        resp.json::<T>().await.map_err(|e| {
            SourceError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })
    }
}

#[async_trait]
impl DocumentSource for SupabaseDocumentSource {
    async fn fetch_community_notes(&self) -> Result<Vec<Note>, SourceError> {
        self.fetch("shared_notes?select=*&order=likes_count.desc")
            .await
    }

    async fn fetch_personal_notes(&self, user_id: &str) -> Result<Vec<Note>, SourceError> {
        self.fetch(&format!(
            "notes?select=*&user_id=eq.{}&order=created_at.desc&limit={}",
            user_id, PERSONAL_NOTES_LIMIT
        ))
        .await
    }
}
