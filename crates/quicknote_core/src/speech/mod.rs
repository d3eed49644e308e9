//! Host speech-recognition capability.
//!
//! # Responsibility
//! - Describe the recognizer contract the host platform supplies.
//! - Model result delivery as a cancellable subscription.
//! - Turn result events into draft content (see `transcription`).
//!
//! # Invariants
//! - Capability presence is resolved once, when the editor is built.
//! - No event is applied after its subscription was stopped.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod subscription;
pub mod transcription;

pub use subscription::Subscription;
pub use transcription::{Transcription, TranscriptionMode};

/// Recognizer settings requested when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub lang: String,
    /// `false` asks for single-utterance sessions.
    pub continuous: bool,
    pub max_alternatives: u32,
    pub interim_results: bool,
}

/// One candidate transcript for a recognized segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechAlternative {
    pub transcript: String,
    pub confidence: f32,
}

impl SpeechAlternative {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            confidence: 1.0,
        }
    }
}

/// One recognized segment with its ordered alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub alternatives: Vec<SpeechAlternative>,
    /// Final results are never revised by the platform.
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            alternatives: vec![SpeechAlternative::new(transcript)],
            is_final: false,
        }
    }

    pub fn finalized(transcript: impl Into<String>) -> Self {
        Self {
            alternatives: vec![SpeechAlternative::new(transcript)],
            is_final: true,
        }
    }

    /// Transcript of the top-ranked alternative, if any.
    pub fn top_transcript(&self) -> Option<&str> {
        self.alternatives
            .first()
            .map(|alternative| alternative.transcript.as_str())
    }
}

/// Result event: every result of the session so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeechResultEvent {
    pub results: Vec<RecognitionResult>,
}

impl SpeechResultEvent {
    pub fn new(results: Vec<RecognitionResult>) -> Self {
        Self { results }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Platform refused to start a recognition session.
    StartFailed(String),
}

impl Display for SpeechError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartFailed(message) => write!(f, "speech recognition failed to start: {message}"),
        }
    }
}

impl Error for SpeechError {}

/// Host recognizer factory.
pub trait SpeechRecognizer: Send {
    fn start(&self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionSession>, SpeechError>;
}

/// A running recognition session.
pub trait RecognitionSession: Send {
    /// Stops capturing audio. Must tolerate repeated calls.
    fn stop(&mut self);
}

/// Speech support as detected on the host.
pub enum SpeechCapability {
    Available(Box<dyn SpeechRecognizer>),
    Unavailable,
}

impl SpeechCapability {
    pub fn available(recognizer: impl SpeechRecognizer + 'static) -> Self {
        Self::Available(Box::new(recognizer))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn recognizer(&self) -> Option<&dyn SpeechRecognizer> {
        match self {
            Self::Available(recognizer) => Some(recognizer.as_ref()),
            Self::Unavailable => None,
        }
    }
}

impl std::fmt::Debug for SpeechCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("SpeechCapability::Available"),
            Self::Unavailable => f.write_str("SpeechCapability::Unavailable"),
        }
    }
}
