//! Note list controller.
//!
//! # Responsibility
//! - Own the canonical in-memory note collection.
//! - Apply create/update/delete with write-through persistence.
//! - Answer search queries over the collection.
//!
//! # Invariants
//! - The collection is ordered newest-first by creation.
//! - After every successful mutation the repository holds exactly the
//!   in-memory collection.
//! - A failed write leaves the in-memory collection untouched.
//! - Unknown ids on update/delete are no-ops and never touch the store.

use crate::model::note::{Note, NoteId, NotePatch};
use crate::repo::note_repo::{NoteRepository, RepoResult};
use crate::search::filter::filter_notes;
use log::{error, info};

/// Root controller over one injected repository.
pub struct NoteListController<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NoteListController<R> {
    /// Loads the stored collection; a missing value starts empty.
    ///
    /// # Errors
    /// - Returns `RepoError::InvalidData` when the stored value is malformed.
    pub fn load(repo: R) -> RepoResult<Self> {
        let notes = repo.load_all()?;
        info!(
            "event=notes_loaded module=service status=ok count={}",
            notes.len()
        );
        Ok(Self { repo, notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a note and prepends it to the collection.
    ///
    /// Input validation belongs to the caller; empty values are stored as-is.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> RepoResult<Note> {
        let note = Note::new(title, content);
        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note.clone());
        next.extend(self.notes.iter().cloned());

        self.commit("note_create", note.id, next)?;
        Ok(note)
    }

    /// Replaces title and content of the note with `id`.
    ///
    /// Returns `Ok(false)` when no such note exists.
    pub fn update(&mut self, id: NoteId, patch: NotePatch) -> RepoResult<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            info!("event=note_update module=service status=skipped reason=not_found id={id}");
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next[index].apply_patch(patch);
        self.commit("note_update", id, next)?;
        Ok(true)
    }

    /// Removes the note with `id`.
    ///
    /// Returns `Ok(false)` when no such note exists.
    pub fn delete(&mut self, id: NoteId) -> RepoResult<bool> {
        if self.get(id).is_none() {
            info!("event=note_delete module=service status=skipped reason=not_found id={id}");
            return Ok(false);
        }

        let next = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        self.commit("note_delete", id, next)?;
        Ok(true)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        filter_notes(&self.notes, query)
    }

    fn commit(&mut self, event: &'static str, id: NoteId, next: Vec<Note>) -> RepoResult<()> {
        if let Err(err) = self.repo.save_all(&next) {
            error!("event={event} module=service status=error id={id} error={err}");
            return Err(err);
        }
        self.notes = next;
        info!(
            "event={event} module=service status=ok id={id} count={}",
            self.notes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NoteListController;
    use crate::db::DbError;
    use crate::model::note::{Note, NotePatch};
    use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
    use crate::store::StoreError;

    /// Repository whose writes can be switched to fail.
    #[derive(Default)]
    struct FlakyRepo {
        saved: Vec<Note>,
        fail_writes: bool,
    }

    impl NoteRepository for FlakyRepo {
        fn load_all(&self) -> RepoResult<Vec<Note>> {
            Ok(self.saved.clone())
        }

        fn save_all(&mut self, notes: &[Note]) -> RepoResult<()> {
            if self.fail_writes {
                return Err(RepoError::Store(StoreError::Db(DbError::Sqlite(
                    rusqlite::Error::InvalidQuery,
                ))));
            }
            self.saved = notes.to_vec();
            Ok(())
        }
    }

    #[test]
    fn failed_write_keeps_memory_unchanged() {
        let mut controller = NoteListController::load(FlakyRepo::default()).unwrap();
        controller.create("a", "1").unwrap();

        controller.repo.fail_writes = true;
        assert!(controller.create("b", "2").is_err());
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.notes()[0].title, "a");

        let id = controller.notes()[0].id;
        assert!(controller.update(id, NotePatch::new("x", "y")).is_err());
        assert_eq!(controller.notes()[0].title, "a");
        assert!(controller.delete(id).is_err());
        assert_eq!(controller.len(), 1);
    }

    #[test]
    fn unknown_id_never_writes() {
        let mut controller = NoteListController::load(FlakyRepo::default()).unwrap();
        controller.repo.fail_writes = true;
        let stranger = Note::new("x", "y").id;
        assert!(!controller.update(stranger, NotePatch::new("a", "b")).unwrap());
        assert!(!controller.delete(stranger).unwrap());
    }
}
