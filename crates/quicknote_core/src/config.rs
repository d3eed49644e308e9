//! Runtime configuration for the notes core.
//!
//! # Invariants
//! - Missing fields fall back to `NotesConfig::default()`.
//! - Unknown fields are rejected so typos do not pass silently.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key holding the serialized note collection.
pub const DEFAULT_STORAGE_KEY: &str = "notes";
/// Recognition language requested from the speech capability.
pub const DEFAULT_SPEECH_LANG: &str = "pt-BR";
pub const DEFAULT_MAX_ALTERNATIVES: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotesConfig {
    pub storage_key: String,
    pub speech_lang: String,
    pub max_alternatives: u32,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyField(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid notes config: {err}"),
            Self::EmptyField(field) => write!(f, "notes config field `{field}` must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyField(_) => None,
        }
    }
}

impl NotesConfig {
    /// Parses a JSON object of overrides.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyField("storage_key"));
        }
        if self.speech_lang.trim().is_empty() {
            return Err(ConfigError::EmptyField("speech_lang"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotesConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = NotesConfig::from_json_str("{}").unwrap();
        assert_eq!(config, NotesConfig::default());
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.speech_lang, "pt-BR");
        assert_eq!(config.max_alternatives, 1);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = NotesConfig::from_json_str(r#"{"speech_lang":"en-US"}"#).unwrap();
        assert_eq!(config.speech_lang, "en-US");
        assert_eq!(config.storage_key, "notes");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = NotesConfig::from_json_str(r#"{"lang":"en-US"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let err = NotesConfig::from_json_str(r#"{"storage_key":"  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("storage_key")));
    }
}
