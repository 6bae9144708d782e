//! Document types ranked into the assistant's context.
//!
//! All text fields tolerate being empty or missing; an empty field simply
//! scores zero during ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sermon {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub church: String,
    #[serde(default)]
    pub book_reference: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verse_insights: Vec<VerseInsight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerseInsight {
    #[serde(default)]
    pub verse: String,
    #[serde(default)]
    pub insight: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub chapter: Option<u32>,
    #[serde(default)]
    pub verse: Option<u32>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Note {
    /// Verse location line, e.g. `"John 3:16"`. Missing parts render empty,
    /// never error.
    pub fn location(&self) -> String {
        let chapter = self.chapter.map(|c| c.to_string()).unwrap_or_default();
        let verse = self.verse.map(|v| v.to_string()).unwrap_or_default();
        format!("{} {}:{}", self.book, chapter, verse)
    }
}

/// Whether a note belongs to the session user or was shared by the community.
/// A minor ranking input: personal notes may receive a fixed score bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteScope {
    Personal,
    Community,
}

impl std::fmt::Display for NoteScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteScope::Personal => write!(f, "My Note"),
            NoteScope::Community => write!(f, "Community Note"),
        }
    }
}

/// Read-only snapshot of every document collection available to the ranker.
///
/// Fetched once per session and only ever replaced wholesale, so a ranking
/// pass always sees a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct StudyLibrary {
    pub sermons: Vec<Sermon>,
    pub personal_notes: Vec<Note>,
    pub community_notes: Vec<Note>,
}

impl StudyLibrary {
    pub fn insight_count(&self) -> usize {
        self.sermons.iter().map(|s| s.verse_insights.len()).sum()
    }
}
