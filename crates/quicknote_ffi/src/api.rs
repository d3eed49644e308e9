//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note list and draft editor use-cases to Dart via FRB.
//! - Relay host speech-recognition results into the core editor.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All state lives behind one process-wide mutex; calls are serialized.
//! - Speech support is reported once by the host in `app_init`.

use log::warn;
use quicknote_core::store::SqliteStore;
use quicknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditorError, EditorState, KeyValueStore, KvNoteRepository, Note, NoteEditor,
    NoteListController, NotePatch, NotesConfig, TranscriptionMode, RecognitionConfig, RecognitionResult, RecognitionSession,
    SpeechAlternative, SpeechCapability, SpeechError, SpeechRecognizer, SpeechResultEvent,
};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

type HostStore = Box<dyn KeyValueStore + Send>;

struct AppState {
    notes: NoteListController<KvNoteRepository<HostStore>>,
    editor: NoteEditor,
}

static APP_STATE: Mutex<Option<AppState>> = Mutex::new(None);

/// Recognizer whose audio capture runs in the host.
///
/// The host starts its platform recognizer with the config returned by
/// `editor_start_recording` and stops it when a snapshot reports
/// `recording == false`.
struct HostRecognizer;

struct HostSession;

impl SpeechRecognizer for HostRecognizer {
    fn start(
        &self,
        _config: &RecognitionConfig,
    ) -> Result<Box<dyn RecognitionSession>, SpeechError> {
        Ok(Box::new(HostSession))
    }
}

impl RecognitionSession for HostSession {
    fn stop(&mut self) {}
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected note ID, when the action targets one note.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// One note as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub created_at_ms: i64,
}

impl From<&Note> for NoteItem {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at.to_rfc3339(),
            created_at_ms: note.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Draft editor state as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// `onboarding|editing_text|recording`.
    pub state: String,
    pub title: String,
    pub content: String,
    pub recording: bool,
    /// `replace|append` while recording, empty otherwise.
    pub transcription_mode: String,
}

/// Recognizer settings the host must apply when recording starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingStartResponse {
    pub ok: bool,
    /// `true` when the host lacks speech support; show a blocking alert.
    pub unavailable: bool,
    pub message: String,
    pub lang: String,
    pub continuous: bool,
    pub max_alternatives: u32,
    pub interim_results: bool,
}

impl RecordingStartResponse {
    fn failure(unavailable: bool, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            unavailable,
            message: message.into(),
            lang: String::new(),
            continuous: false,
            max_alternatives: 0,
            interim_results: false,
        }
    }
}

/// One recognition result forwarded by the host (top alternative only).
#[derive(Debug, Clone, PartialEq)]
pub struct HostSpeechResult {
    pub transcript: String,
    pub confidence: f32,
    pub is_final: bool,
}

/// Opens the note store and builds app state.
///
/// `speech_available` is the host's one-time speech capability probe.
/// `config_json` optionally overrides `NotesConfig` fields (JSON object).
/// Calling again replaces the state (and discards any draft).
#[flutter_rust_bridge::frb(sync)]
pub fn app_init(
    db_path: String,
    speech_available: bool,
    config_json: Option<String>,
) -> ActionResponse {
    let config = match config_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match NotesConfig::from_json_str(raw) {
            Ok(config) => config,
            Err(err) => return ActionResponse::failure(format!("app_init failed: {err}")),
        },
        _ => NotesConfig::default(),
    };
    let store = match SqliteStore::open(db_path.trim()) {
        Ok(store) => store,
        Err(err) => return ActionResponse::failure(format!("app_init failed: {err}")),
    };
    let repo = KvNoteRepository::with_config(Box::new(store) as HostStore, &config);
    let notes = match NoteListController::load(repo) {
        Ok(notes) => notes,
        Err(err) => return ActionResponse::failure(format!("app_init failed: {err}")),
    };
    let capability = if speech_available {
        SpeechCapability::available(HostRecognizer)
    } else {
        SpeechCapability::Unavailable
    };

    let count = notes.len();
    *lock_state() = Some(AppState {
        notes,
        editor: NoteEditor::with_config(capability, config),
    });
    ActionResponse::success(format!("Loaded {count} note(s)."), None)
}

/// Lists notes filtered by `query` (empty query lists everything).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(query: String) -> NotesListResponse {
    match with_state(|state| {
        Ok(state
            .notes
            .search(&query)
            .into_iter()
            .map(NoteItem::from)
            .collect::<Vec<_>>())
    }) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesListResponse { items, message }
        }
        Err(message) => NotesListResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {message}"),
        },
    }
}

/// Creates a note directly, without draft validation.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, content: String) -> ActionResponse {
    match with_state(|state| state.notes.create(title, content).map_err(|err| err.to_string())) {
        Ok(note) => ActionResponse::success("Note created.", Some(note.id.to_string())),
        Err(message) => ActionResponse::failure(format!("note_create failed: {message}")),
    }
}

/// Replaces title and content of one note; unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(note_id: String, title: String, content: String) -> ActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_state(|state| {
        state
            .notes
            .update(id, NotePatch::new(title, content))
            .map_err(|err| err.to_string())
    }) {
        Ok(true) => ActionResponse::success("Note updated.", Some(note_id)),
        Ok(false) => ActionResponse::success("Note not found; nothing changed.", None),
        Err(message) => ActionResponse::failure(format!("note_update failed: {message}")),
    }
}

/// Deletes one note; unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_state(|state| state.notes.delete(id).map_err(|err| err.to_string())) {
        Ok(true) => ActionResponse::success("Note deleted.", Some(note_id)),
        Ok(false) => ActionResponse::success("Note not found; nothing changed.", None),
        Err(message) => ActionResponse::failure(format!("note_delete failed: {message}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_snapshot() -> EditorSnapshot {
    editor_call(|_| {})
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_start_text() -> EditorSnapshot {
    editor_call(NoteEditor::start_text_entry)
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_title(title: String) -> EditorSnapshot {
    editor_call(|editor| editor.set_title(title))
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_content(content: String) -> EditorSnapshot {
    editor_call(|editor| editor.set_content(content))
}

/// Starts recording and returns the recognizer settings for the host.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_start_recording() -> RecordingStartResponse {
    let mut guard = lock_state();
    let Some(state) = guard.as_mut() else {
        return RecordingStartResponse::failure(false, NOT_INITIALIZED);
    };

    match state.editor.start_recording() {
        Ok(_) => match state.editor.recognition_config() {
            Some(config) => RecordingStartResponse {
                ok: true,
                unavailable: false,
                message: "Recording started.".to_string(),
                lang: config.lang.clone(),
                continuous: config.continuous,
                max_alternatives: config.max_alternatives,
                interim_results: config.interim_results,
            },
            None => RecordingStartResponse::failure(false, "recording did not start"),
        },
        Err(err) => RecordingStartResponse::failure(
            matches!(err, EditorError::SpeechUnavailable),
            err.to_string(),
        ),
    }
}

/// Forwards one host recognition event (all results so far, oldest first).
///
/// Events arriving after `editor_stop_recording` are dropped.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_push_speech_result(results: Vec<HostSpeechResult>) -> EditorSnapshot {
    let event = SpeechResultEvent::new(
        results
            .into_iter()
            .map(|result| RecognitionResult {
                alternatives: vec![SpeechAlternative {
                    transcript: result.transcript,
                    confidence: result.confidence,
                }],
                is_final: result.is_final,
            })
            .collect(),
    );
    editor_call(|editor| {
        editor.apply_speech_event(&event);
    })
}

/// Stops recording; safe to call when nothing is recording.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_stop_recording() -> EditorSnapshot {
    editor_call(NoteEditor::stop_recording)
}

/// Validates and saves the draft as a new note.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_save() -> ActionResponse {
    match with_state(|state| {
        state
            .editor
            .save(&mut state.notes)
            .map_err(|err| err.to_string())
    }) {
        Ok(note) => ActionResponse::success("Note created.", Some(note.id.to_string())),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Drops the draft and any active recording.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_discard() -> EditorSnapshot {
    editor_call(NoteEditor::discard)
}

const NOT_INITIALIZED: &str = "app state is not initialized; call app_init first";

fn lock_state() -> MutexGuard<'static, Option<AppState>> {
    // A panic while holding the lock cannot leave notes half-written: every
    // mutation persists before it swaps the in-memory list.
    APP_STATE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_state<T>(f: impl FnOnce(&mut AppState) -> Result<T, String>) -> Result<T, String> {
    let mut guard = lock_state();
    match guard.as_mut() {
        Some(state) => f(state),
        None => Err(NOT_INITIALIZED.to_string()),
    }
}

fn editor_call(f: impl FnOnce(&mut NoteEditor)) -> EditorSnapshot {
    let mut guard = lock_state();
    match guard.as_mut() {
        Some(state) => {
            f(&mut state.editor);
            snapshot(&state.editor)
        }
        None => {
            warn!("event=editor_call module=ffi status=error error_code=not_initialized");
            EditorSnapshot {
                state: state_label(EditorState::Onboarding).to_string(),
                title: String::new(),
                content: String::new(),
                recording: false,
                transcription_mode: String::new(),
            }
        }
    }
}

fn snapshot(editor: &NoteEditor) -> EditorSnapshot {
    EditorSnapshot {
        state: state_label(editor.state()).to_string(),
        title: editor.title().to_string(),
        content: editor.content().to_string(),
        recording: editor.is_recording(),
        transcription_mode: editor
            .transcription_mode()
            .map(mode_label)
            .unwrap_or_default()
            .to_string(),
    }
}

fn mode_label(mode: TranscriptionMode) -> &'static str {
    match mode {
        TranscriptionMode::Replace => "replace",
        TranscriptionMode::Append => "append",
    }
}

fn state_label(state: EditorState) -> &'static str {
    match state {
        EditorState::Onboarding => "onboarding",
        EditorState::EditingText => "editing_text",
        EditorState::Recording => "recording",
    }
}

fn parse_note_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid note id `{value}`"))
}
