//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its edit patch.
//! - Fix the persisted field names (`id`, `date`, `title`, `content`).
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation and never mutated.
//! - Only `title` and `content` change after creation, and always together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id generated once at creation.
    pub id: NoteId,
    /// Serialized as `date` (ISO-8601) to match the stored collection format.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
}

/// Wholesale replacement of a note's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub title: String,
    pub content: String,
}

impl NotePatch {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Note {
    /// Creates a new note with a generated id and the current UTC time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), Utc::now(), title, content)
    }

    /// Creates a note with caller-provided identity and timestamp.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        created_at: DateTime<Utc>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            created_at,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Replaces title and content; `id` and `created_at` are preserved.
    pub fn apply_patch(&mut self, patch: NotePatch) {
        self.title = patch.title;
        self.content = patch.content;
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NotePatch};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn serializes_created_at_under_date_key() {
        let id = Uuid::parse_str("9b2f6c1e-6a43-4f4b-9d4e-3c1a2b7f8e90").unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap();
        let note = Note::with_id(id, created_at, "Shopping", "Milk, eggs");

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], "9b2f6c1e-6a43-4f4b-9d4e-3c1a2b7f8e90");
        assert_eq!(value["date"], "2024-05-01T12:34:56Z");
        assert_eq!(value["title"], "Shopping");
        assert_eq!(value["content"], "Milk, eggs");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn accepts_browser_style_timestamps_with_millis() {
        let raw = r#"{"id":"9b2f6c1e-6a43-4f4b-9d4e-3c1a2b7f8e90","date":"2024-05-01T12:34:56.789Z","title":"t","content":"c"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.created_at.timestamp_subsec_millis(), 789);
    }

    #[test]
    fn patch_keeps_identity_and_creation_time() {
        let mut note = Note::new("old", "body");
        let (id, created_at) = (note.id, note.created_at);
        note.apply_patch(NotePatch::new("new", "other"));
        assert_eq!(note.id, id);
        assert_eq!(note.created_at, created_at);
        assert_eq!(note.title, "new");
        assert_eq!(note.content, "other");
    }
}
