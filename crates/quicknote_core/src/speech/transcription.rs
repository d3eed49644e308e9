//! Draft content accumulation from recognition events.
//!
//! # Invariants
//! - The mode is fixed when recording starts and never changes mid-session.
//! - `Replace` rewrites the whole content on every event, interim or final.
//! - `Append` only ever grows the content, one final utterance at a time.

use super::{RecognitionConfig, SpeechResultEvent};
use crate::config::NotesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionMode {
    /// Recording started from empty content: live text, continuous session.
    Replace,
    /// Recording resumed over existing content: finals only, one utterance.
    Append,
}

/// Per-session accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    mode: TranscriptionMode,
    continuous: bool,
    accumulated: String,
}

impl Transcription {
    /// Chooses the mode from the draft content at recording start.
    ///
    /// Any non-empty content selects `Append`, whitespace included. The
    /// session stays continuous while the trimmed content is blank.
    pub fn for_draft(content: &str) -> Self {
        let trimmed = content.trim();
        let mode = if content.is_empty() {
            TranscriptionMode::Replace
        } else {
            TranscriptionMode::Append
        };
        Self {
            mode,
            continuous: trimmed.is_empty(),
            accumulated: trimmed.to_string(),
        }
    }

    pub fn mode(&self) -> TranscriptionMode {
        self.mode
    }

    /// Recognizer settings for this session.
    pub fn recognition_config(&self, config: &NotesConfig) -> RecognitionConfig {
        RecognitionConfig {
            lang: config.speech_lang.clone(),
            continuous: self.continuous,
            max_alternatives: config.max_alternatives,
            interim_results: true,
        }
    }

    /// Folds one event in; returns the new draft content when it changes.
    pub fn apply(&mut self, event: &SpeechResultEvent) -> Option<String> {
        match self.mode {
            TranscriptionMode::Replace => {
                let text = event
                    .results
                    .iter()
                    .filter_map(|result| result.top_transcript())
                    .collect::<String>();
                Some(text)
            }
            TranscriptionMode::Append => {
                let last = event.results.last()?;
                if !last.is_final {
                    return None;
                }
                let utterance = last.top_transcript()?.trim();
                if utterance.is_empty() {
                    return None;
                }
                self.accumulated.push(' ');
                self.accumulated.push_str(utterance);
                Some(self.accumulated.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Transcription, TranscriptionMode};
    use crate::config::NotesConfig;
    use crate::speech::{RecognitionResult, SpeechResultEvent};

    fn event(results: Vec<RecognitionResult>) -> SpeechResultEvent {
        SpeechResultEvent::new(results)
    }

    #[test]
    fn mode_follows_untrimmed_draft_content() {
        assert_eq!(Transcription::for_draft("").mode(), TranscriptionMode::Replace);
        assert_eq!(
            Transcription::for_draft(" \n ").mode(),
            TranscriptionMode::Append
        );
        assert_eq!(
            Transcription::for_draft("hello").mode(),
            TranscriptionMode::Append
        );
    }

    #[test]
    fn whitespace_draft_appends_finals_in_a_continuous_session() {
        let mut transcription = Transcription::for_draft("   ");
        assert!(
            transcription
                .recognition_config(&NotesConfig::default())
                .continuous
        );
        assert_eq!(
            transcription.apply(&event(vec![RecognitionResult::interim("ola")])),
            None
        );
        assert_eq!(
            transcription
                .apply(&event(vec![RecognitionResult::finalized("ola mundo")]))
                .as_deref(),
            Some(" ola mundo")
        );
    }

    #[test]
    fn config_depends_on_mode() {
        let defaults = NotesConfig::default();
        let replace = Transcription::for_draft("").recognition_config(&defaults);
        assert!(replace.continuous);
        assert!(replace.interim_results);
        assert_eq!(replace.lang, "pt-BR");
        assert_eq!(replace.max_alternatives, 1);

        let append = Transcription::for_draft("x").recognition_config(&defaults);
        assert!(!append.continuous);
    }

    #[test]
    fn replace_mode_concatenates_every_result_and_rewrites() {
        let mut transcription = Transcription::for_draft("");
        assert_eq!(
            transcription
                .apply(&event(vec![RecognitionResult::interim("compra")]))
                .as_deref(),
            Some("compra")
        );
        assert_eq!(
            transcription
                .apply(&event(vec![
                    RecognitionResult::finalized("comprar leite"),
                    RecognitionResult::interim(" e ovos"),
                ]))
                .as_deref(),
            Some("comprar leite e ovos")
        );
    }

    #[test]
    fn append_mode_ignores_interim_and_blank_finals() {
        let mut transcription = Transcription::for_draft("  Milk ");
        assert_eq!(
            transcription.apply(&event(vec![RecognitionResult::interim("eggs")])),
            None
        );
        assert_eq!(
            transcription.apply(&event(vec![RecognitionResult::finalized("   ")])),
            None
        );
        assert_eq!(transcription.apply(&event(Vec::new())), None);
        assert_eq!(
            transcription
                .apply(&event(vec![RecognitionResult::finalized(" eggs ")]))
                .as_deref(),
            Some("Milk eggs")
        );
        assert_eq!(
            transcription
                .apply(&event(vec![
                    RecognitionResult::finalized("eggs"),
                    RecognitionResult::finalized("bread"),
                ]))
                .as_deref(),
            Some("Milk eggs bread")
        );
    }

    #[test]
    fn append_mode_only_looks_at_the_last_result() {
        let mut transcription = Transcription::for_draft("a");
        let applied = transcription.apply(&event(vec![
            RecognitionResult::finalized("b"),
            RecognitionResult::interim("c"),
        ]));
        assert_eq!(applied, None);
    }
}
