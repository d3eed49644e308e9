//! Draft editors handing finished input to the note list controller.
//!
//! # Responsibility
//! - `note_editor`: capture a new note by typing or dictation.
//! - `edit_session`: edit or delete one existing note.

pub mod edit_session;
pub mod note_editor;
