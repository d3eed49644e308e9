//! Note collection repository and key-value implementation.
//!
//! # Responsibility
//! - Encode/decode the full note collection as one JSON array.
//! - Persist through any `KeyValueStore` under a configurable key.
//!
//! # Invariants
//! - A missing key loads as an empty collection.
//! - Invalid JSON or duplicate ids are reported as `RepoError::InvalidData`.
//! - `save_all` writes exactly the given order.

use crate::config::NotesConfig;
use crate::model::note::Note;
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Persisted value exists but is not a valid note collection.
    InvalidData(String),
    /// Collection could not be serialized.
    Encode(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted notes: {message}"),
            Self::Encode(message) => write!(f, "failed to encode notes: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) | Self::Encode(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Whole-collection repository contract injected into the controller.
pub trait NoteRepository {
    /// Loads every stored note in persisted order.
    fn load_all(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the stored collection with `notes`.
    fn save_all(&mut self, notes: &[Note]) -> RepoResult<()>;
}

/// Note repository persisting a JSON array under one store key.
pub struct KvNoteRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    /// Uses the default `"notes"` key.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &NotesConfig::default())
    }

    pub fn with_config(store: S, config: &NotesConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the raw persisted value, if any.
    pub fn raw_value(&self) -> RepoResult<Option<String>> {
        Ok(self.store.get(&self.key)?)
    }
}

impl<S: KeyValueStore> NoteRepository for KvNoteRepository<S> {
    fn load_all(&self) -> RepoResult<Vec<Note>> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!("event=notes_load module=repo status=ok source=empty");
            return Ok(Vec::new());
        };

        let notes = decode_notes(&raw).map_err(|err| {
            error!(
                "event=notes_load module=repo status=error error_code=invalid_data bytes={}",
                raw.len()
            );
            err
        })?;
        debug!(
            "event=notes_load module=repo status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save_all(&mut self, notes: &[Note]) -> RepoResult<()> {
        let encoded = encode_notes(notes)?;
        self.store.set(&self.key, &encoded)?;
        debug!(
            "event=notes_save module=repo status=ok count={} bytes={}",
            notes.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Serializes a collection into the persisted JSON array format.
pub fn encode_notes(notes: &[Note]) -> RepoResult<String> {
    serde_json::to_string(notes).map_err(|err| RepoError::Encode(err.to_string()))
}

/// Parses the persisted JSON array format.
pub fn decode_notes(raw: &str) -> RepoResult<Vec<Note>> {
    let notes: Vec<Note> =
        serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate note id `{}`",
                note.id
            )));
        }
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, KvNoteRepository, NoteRepository, RepoError};
    use crate::model::note::Note;
    use crate::store::MemoryStore;

    #[test]
    fn missing_key_loads_empty_collection() {
        let repo = KvNoteRepository::new(MemoryStore::new());
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn stored_empty_array_loads_empty_collection() {
        let repo = KvNoteRepository::new(MemoryStore::with_entry("notes", "[]"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let mut repo = KvNoteRepository::new(MemoryStore::new());
        let notes = vec![Note::new("b", "2"), Note::new("a", "1")];
        repo.save_all(&notes).unwrap();
        assert_eq!(repo.load_all().unwrap(), notes);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let repo = KvNoteRepository::new(MemoryStore::with_entry("notes", "{not json"));
        let err = repo.load_all().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let note = Note::new("t", "c");
        let raw = serde_json::to_string(&vec![note.clone(), note]).unwrap();
        let err = decode_notes(&raw).unwrap_err();
        assert!(err.to_string().contains("duplicate note id"));
    }
}
