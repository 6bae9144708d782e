//! Context assembly: formats ranked documents into the bounded text block
//! sent upstream.
//!
//! Truncation is two-level: each field is trimmed at a sentence boundary,
//! then the joined block is hard-cut to the global budget. Collapsing the
//! two levels into one pass would change which content reaches the
//! completion call.

use itertools::Itertools;

use crate::domain::Sermon;

use super::ranker::ScopedNote;

pub const CATEGORY_SEPARATOR: &str = "\n\n---\n\n";
pub const BUDGET_MARKER: &str = "\n\n[Context trimmed due to size budget]";

/// A sentence boundary closer to the start than this is ignored; the field
/// is hard-cut with an ellipsis instead.
const MIN_BOUNDARY: usize = 40;

const MAX_TAGS_PER_SERMON: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct AssemblerConfig {
    pub max_sermons: usize,
    pub max_notes: usize,
    pub char_budget: usize,
    pub sermon_summary_chars: usize,
    pub note_content_chars: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_sermons: 8,
            max_notes: 10,
            char_budget: 12_000,
            sermon_summary_chars: 220,
            note_content_chars: 180,
        }
    }
}

/// Whitespace-normalize `text` and bound it to `max_chars`.
///
/// Prefers cutting at the last `. `, `! ` or `? ` within the limit,
/// keeping the terminal mark. When no boundary exists past [`MIN_BOUNDARY`],
/// hard-cuts and appends an ellipsis.
pub fn trim_to_sentence(text: &str, max_chars: usize) -> String {
    let normalized = text.split_whitespace().join(" ");
    if normalized.chars().count() <= max_chars {
        return normalized;
    }

    let sliced: String = normalized.chars().take(max_chars).collect();
    let last_stop = [". ", "! ", "? "]
        .iter()
        .filter_map(|stop| sliced.rfind(stop))
        .max();

    match last_stop {
        Some(idx) if idx > MIN_BOUNDARY => sliced[..=idx].trim().to_string(),
        _ => format!("{}...", sliced.trim()),
    }
}

/// Render the sermon category block, or an empty string when nothing ranked.
pub fn sermons_block(sermons: &[&Sermon], config: &AssemblerConfig) -> String {
    if sermons.is_empty() {
        return String::new();
    }

    let entries = sermons
        .iter()
        .enumerate()
        .map(|(idx, sermon)| {
            let summary = trim_to_sentence(&sermon.summary, config.sermon_summary_chars);
            let tag_line = sermon
                .tags
                .iter()
                .take(MAX_TAGS_PER_SERMON)
                .join(", ");
            format!(
                "{}. \"{}\" by {} ({})\n   Ref: {}\n   Summary: {}\n   Tags: {}",
                idx + 1,
                sermon.title,
                sermon.speaker,
                sermon.church,
                sermon.book_reference.as_deref().unwrap_or("N/A"),
                summary,
                if tag_line.is_empty() { "N/A" } else { tag_line.as_str() },
            )
        })
        .join("\n\n");

    format!("Relevant Sermons (Top {}):\n{}", sermons.len(), entries)
}

/// Render the notes category block, or an empty string when nothing ranked.
pub fn notes_block(notes: &[ScopedNote], config: &AssemblerConfig) -> String {
    if notes.is_empty() {
        return String::new();
    }

    let entries = notes
        .iter()
        .enumerate()
        .map(|(idx, scoped)| {
            let content = trim_to_sentence(&scoped.note.content, config.note_content_chars);
            let likes = scoped
                .note
                .likes_count
                .map(|n| format!(" | likes={}", n))
                .unwrap_or_default();
            format!(
                "{}. [{}] {}{}\n   {}",
                idx + 1,
                scoped.scope,
                scoped.note.location(),
                likes,
                content,
            )
        })
        .join("\n\n");

    format!("Relevant Notes (Top {}):\n{}", notes.len(), entries)
}

/// Join category blocks and apply the global character budget.
pub fn assemble_context(blocks: &[String], config: &AssemblerConfig) -> String {
    let full = blocks
        .iter()
        .filter(|block| !block.is_empty())
        .join(CATEGORY_SEPARATOR);

    if full.chars().count() > config.char_budget {
        let cut: String = full.chars().take(config.char_budget).collect();
        format!("{}{}", cut, BUDGET_MARKER)
    } else {
        full
    }
}
