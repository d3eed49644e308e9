//! New-note editor with optional speech capture.
//!
//! # Responsibility
//! - Hold the transient draft (title, content) and the editor state.
//! - Drive one recognition subscription at a time.
//! - Validate and commit the draft through `NoteListController::create`.
//!
//! # Invariants
//! - At most one subscription is active; starting a new one stops the old.
//! - Events arriving after `stop_recording` never change the draft.
//! - A rejected save leaves the draft, the state and the store untouched.
//! - Save validation is an exact empty-string check; nothing is trimmed.

use crate::config::NotesConfig;
use crate::model::note::Note;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::service::note_list::NoteListController;
use crate::speech::{
    RecognitionConfig, SpeechCapability, SpeechError, SpeechResultEvent, Subscription,
    Transcription, TranscriptionMode,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visible editor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No draft started yet.
    Onboarding,
    EditingText,
    Recording,
}

/// Draft field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
}

#[derive(Debug)]
pub enum EditorError {
    /// Required field is empty; shown as a transient notice.
    Validation(DraftField),
    /// Host has no speech support; shown as a blocking alert.
    SpeechUnavailable,
    Speech(SpeechError),
    Repo(RepoError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(DraftField::Title) => write!(f, "note title must not be empty"),
            Self::Validation(DraftField::Content) => write!(f, "note content must not be empty"),
            Self::SpeechUnavailable => write!(f, "speech recognition is not supported on this host"),
            Self::Speech(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Speech(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Validation(_) | Self::SpeechUnavailable => None,
        }
    }
}

impl From<RepoError> for EditorError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SpeechError> for EditorError {
    fn from(value: SpeechError) -> Self {
        Self::Speech(value)
    }
}

struct Recording {
    subscription: Subscription,
    transcription: Transcription,
    config: RecognitionConfig,
}

/// Editor for one new note.
pub struct NoteEditor {
    capability: SpeechCapability,
    config: NotesConfig,
    title: String,
    content: String,
    onboarding: bool,
    recording: Option<Recording>,
}

impl NoteEditor {
    pub fn new(capability: SpeechCapability) -> Self {
        Self::with_config(capability, NotesConfig::default())
    }

    pub fn with_config(capability: SpeechCapability, config: NotesConfig) -> Self {
        Self {
            capability,
            config,
            title: String::new(),
            content: String::new(),
            onboarding: true,
            recording: None,
        }
    }

    pub fn state(&self) -> EditorState {
        if self.recording.is_some() {
            EditorState::Recording
        } else if self.onboarding {
            EditorState::Onboarding
        } else {
            EditorState::EditingText
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn speech_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Mode of the active recording, if any.
    pub fn transcription_mode(&self) -> Option<TranscriptionMode> {
        self.recording
            .as_ref()
            .map(|recording| recording.transcription.mode())
    }

    /// Recognizer settings of the active recording, if any.
    pub fn recognition_config(&self) -> Option<&RecognitionConfig> {
        self.recording.as_ref().map(|recording| &recording.config)
    }

    /// Leaves onboarding for manual typing.
    pub fn start_text_entry(&mut self) {
        self.onboarding = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Applies a user edit of the content.
    ///
    /// Clearing the content stops any recording and returns to onboarding.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        if self.content.is_empty() {
            self.stop_recording();
            self.onboarding = true;
        } else {
            self.onboarding = false;
        }
    }

    /// Starts a recognition session for the current draft.
    ///
    /// # Errors
    /// - `EditorError::SpeechUnavailable` when the host lacks speech support.
    /// - `EditorError::Speech` when the recognizer refuses to start.
    pub fn start_recording(&mut self) -> Result<TranscriptionMode, EditorError> {
        if !self.capability.is_available() {
            warn!("event=recording_start module=editor status=error error_code=speech_unavailable");
            return Err(EditorError::SpeechUnavailable);
        }
        self.stop_recording();

        let transcription = Transcription::for_draft(&self.content);
        let config = transcription.recognition_config(&self.config);
        let session = match self.capability.recognizer() {
            Some(recognizer) => recognizer.start(&config).map_err(|err| {
                warn!("event=recording_start module=editor status=error error={err}");
                err
            })?,
            None => return Err(EditorError::SpeechUnavailable),
        };

        let mode = transcription.mode();
        info!(
            "event=recording_start module=editor status=ok mode={mode:?} continuous={}",
            config.continuous
        );
        self.recording = Some(Recording {
            subscription: Subscription::new(session),
            transcription,
            config,
        });
        self.onboarding = false;
        Ok(mode)
    }

    /// Stops the active recording; a no-op when nothing is recording.
    pub fn stop_recording(&mut self) {
        if let Some(mut recording) = self.recording.take() {
            recording.subscription.stop();
            info!("event=recording_stop module=editor status=ok");
        }
    }

    /// Applies one recognition event from the host.
    ///
    /// Returns whether the draft content changed.
    pub fn apply_speech_event(&mut self, event: &SpeechResultEvent) -> bool {
        let Some(recording) = self.recording.as_mut() else {
            return false;
        };
        if !recording.subscription.is_active() {
            return false;
        }
        match recording.transcription.apply(event) {
            Some(content) => {
                self.content = content;
                true
            }
            None => false,
        }
    }

    /// Validates the draft and creates the note.
    ///
    /// On success the draft is cleared and the editor returns to onboarding.
    pub fn save<R: NoteRepository>(
        &mut self,
        notes: &mut NoteListController<R>,
    ) -> Result<Note, EditorError> {
        if self.title.is_empty() {
            return Err(EditorError::Validation(DraftField::Title));
        }
        if self.content.is_empty() {
            return Err(EditorError::Validation(DraftField::Content));
        }

        self.stop_recording();
        let note = notes.create(self.title.clone(), self.content.clone())?;
        self.reset();
        Ok(note)
    }

    /// Drops the draft and any recording.
    pub fn discard(&mut self) {
        self.stop_recording();
        self.reset();
    }

    fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
        self.onboarding = true;
    }
}
