//! Edit session for one existing note.
//!
//! Edits are committed as a whole-field patch; no validation applies here.

use crate::model::note::{Note, NoteId, NotePatch};
use crate::repo::note_repo::{NoteRepository, RepoResult};
use crate::service::note_list::NoteListController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditSession {
    note_id: NoteId,
    title: String,
    content: String,
    editing: bool,
}

impl NoteEditSession {
    /// Opens a read-only view seeded from `note`.
    pub fn open(note: &Note) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            editing: false,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Commits the draft and leaves editing mode.
    ///
    /// Returns `Ok(false)` when the note no longer exists.
    pub fn save<R: NoteRepository>(
        &mut self,
        notes: &mut NoteListController<R>,
    ) -> RepoResult<bool> {
        let patch = NotePatch::new(self.title.clone(), self.content.clone());
        let updated = notes.update(self.note_id, patch)?;
        self.editing = false;
        Ok(updated)
    }

    /// Deletes the note this session was opened for.
    pub fn delete<R: NoteRepository>(&self, notes: &mut NoteListController<R>) -> RepoResult<bool> {
        notes.delete(self.note_id)
    }
}

#[cfg(test)]
mod tests {
    use super::NoteEditSession;
    use crate::repo::note_repo::KvNoteRepository;
    use crate::service::note_list::NoteListController;
    use crate::store::MemoryStore;

    #[test]
    fn save_patches_fields_and_leaves_editing_mode() {
        let mut notes =
            NoteListController::load(KvNoteRepository::new(MemoryStore::new())).unwrap();
        let note = notes.create("Shopping", "Milk").unwrap();

        let mut session = NoteEditSession::open(&note);
        assert!(!session.is_editing());
        session.begin_edit();
        session.set_title("Groceries");
        session.set_content("");
        assert!(session.save(&mut notes).unwrap());
        assert!(!session.is_editing());

        let stored = notes.get(note.id).unwrap();
        assert_eq!(stored.title, "Groceries");
        assert_eq!(stored.content, "");
        assert_eq!(stored.created_at, note.created_at);
    }

    #[test]
    fn save_after_delete_reports_missing_note() {
        let mut notes =
            NoteListController::load(KvNoteRepository::new(MemoryStore::new())).unwrap();
        let note = notes.create("t", "c").unwrap();
        let mut session = NoteEditSession::open(&note);

        assert!(session.delete(&mut notes).unwrap());
        session.begin_edit();
        assert!(!session.save(&mut notes).unwrap());
        assert!(notes.is_empty());
    }
}
