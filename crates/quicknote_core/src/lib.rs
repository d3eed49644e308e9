//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod speech;
pub mod store;

pub use config::NotesConfig;
pub use editor::edit_session::NoteEditSession;
pub use editor::note_editor::{DraftField, EditorError, EditorState, NoteEditor};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NotePatch};
pub use repo::note_repo::{KvNoteRepository, NoteRepository, RepoError, RepoResult};
pub use search::filter::{filter_notes, note_matches};
pub use service::note_list::NoteListController;
pub use speech::{
    RecognitionConfig, RecognitionResult, RecognitionSession, SpeechAlternative,
    SpeechCapability, SpeechError, SpeechRecognizer, SpeechResultEvent, TranscriptionMode,
};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
