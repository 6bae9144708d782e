//! Weighted substring relevance ranking over the document snapshot.

use crate::domain::{Note, NoteScope, Sermon};

/// Per-field score weights.
///
/// The constants are policy, not contract, but the ordering
/// title > tags > reference > summary (and location > body for notes) is
/// fixed: reference-bearing fields must outrank free-text bodies.
#[derive(Debug, Clone, Copy)]
pub struct RankWeights {
    pub title: u32,
    pub tags: u32,
    pub reference: u32,
    pub summary: u32,
    pub location: u32,
    pub body: u32,
    pub personal_note_bonus: u32,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            title: 4,
            tags: 3,
            reference: 2,
            summary: 1,
            location: 3,
            body: 1,
            personal_note_bonus: 1,
        }
    }
}

/// Number of query terms appearing in `text` as substrings.
///
/// Each term counts at most once per field, however often it repeats.
/// Empty text scores zero.
pub fn score_text(text: &str, terms: &[String]) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let lower = text.to_lowercase();
    terms.iter().filter(|term| lower.contains(term.as_str())).count() as u32
}

/// A note paired with its scope label for ranking and formatting.
#[derive(Debug, Clone)]
pub struct ScopedNote<'a> {
    pub scope: NoteScope,
    pub note: &'a Note,
}

/// Top `limit` sermons by weighted field score, score-descending.
///
/// The sort is stable: ties keep original collection order, which decides
/// which items survive the cutoff and must be reproducible.
pub fn rank_sermons<'a>(
    sermons: &'a [Sermon],
    terms: &[String],
    weights: &RankWeights,
    limit: usize,
) -> Vec<&'a Sermon> {
    let mut scored: Vec<(u32, &Sermon)> = sermons
        .iter()
        .map(|sermon| {
            let tags = sermon.tags.join(" ");
            let reference = sermon.book_reference.as_deref().unwrap_or("");
            let score = score_text(&sermon.title, terms) * weights.title
                + score_text(&tags, terms) * weights.tags
                + score_text(reference, terms) * weights.reference
                + score_text(&sermon.summary, terms) * weights.summary;
            (score, sermon)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, s)| s).collect()
}

/// Top `limit` notes across both scopes, personal notes listed first on
/// input so they win stable-sort ties against community notes.
pub fn rank_notes<'a>(
    personal: &'a [Note],
    community: &'a [Note],
    terms: &[String],
    weights: &RankWeights,
    limit: usize,
) -> Vec<ScopedNote<'a>> {
    let combined = personal
        .iter()
        .map(|note| ScopedNote {
            scope: NoteScope::Personal,
            note,
        })
        .chain(community.iter().map(|note| ScopedNote {
            scope: NoteScope::Community,
            note,
        }));

    let mut scored: Vec<(u32, ScopedNote<'a>)> = combined
        .map(|scoped| {
            let location = scoped.note.location();
            let mut score = score_text(&location, terms) * weights.location
                + score_text(&scoped.note.content, terms) * weights.body;
            if scoped.scope == NoteScope::Personal {
                score += weights.personal_note_bonus;
            }
            (score, scoped)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, n)| n).collect()
}
