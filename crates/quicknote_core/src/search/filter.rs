//! Case-insensitive substring filter over titles and contents.
//!
//! # Invariants
//! - An empty query matches every note.
//! - Result order equals collection order.

use crate::model::note::Note;

/// Returns whether `note` matches an already lowercased query.
fn matches_lowercased(note: &Note, needle: &str) -> bool {
    note.content.to_lowercase().contains(needle) || note.title.to_lowercase().contains(needle)
}

/// Returns whether `note` matches `query` in its title or content.
pub fn note_matches(note: &Note, query: &str) -> bool {
    query.is_empty() || matches_lowercased(note, &query.to_lowercase())
}

/// Filters `notes` by `query`, preserving order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes.iter().collect();
    }
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_lowercased(note, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, note_matches};
    use crate::model::note::Note;

    fn sample() -> Vec<Note> {
        vec![
            Note::new("Todo", "Call mom"),
            Note::new("Shopping", "Milk, eggs"),
            Note::new("Ideas", "Write a TODO app"),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let notes = sample();
        let hits = filter_notes(&notes, "");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "Todo");
        assert_eq!(hits[2].title, "Ideas");
    }

    #[test]
    fn matches_title_or_content_ignoring_case() {
        let notes = sample();
        let hits = filter_notes(&notes, "todo");
        let titles: Vec<_> = hits.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["Todo", "Ideas"]);

        assert_eq!(filter_notes(&notes, "MILK").len(), 1);
        assert!(filter_notes(&notes, "bread").is_empty());
    }

    #[test]
    fn whitespace_query_is_not_trimmed() {
        let notes = sample();
        let hits = filter_notes(&notes, " ");
        let titles: Vec<_> = hits.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["Todo", "Shopping", "Ideas"]);
        assert!(!note_matches(&Note::new("a", "b"), " "));
    }

    #[test]
    fn matches_non_ascii_case_folding() {
        let note = Note::new("Reunião", "ÁGUA e café");
        assert!(note_matches(&note, "REUNIÃO"));
        assert!(note_matches(&note, "água"));
    }
}
