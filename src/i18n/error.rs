//! Error types for bundle loading and string lookup.

use std::path::PathBuf;
use thiserror::Error;

/// What part of a lookup could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// The language code is not registered or has no bundle loaded
    Language,
    /// The key path does not exist in the bundle
    Key,
    /// The key path stops at a section instead of a string
    Section,
}

#[derive(Debug, Error)]
pub enum I18nError {
    /// A language code or key path does not resolve to a string.
    #[error("missing translation: {}", describe_missing(.language, .key, .missing))]
    MissingTranslation {
        language: String,
        key: Option<String>,
        missing: Missing,
    },

    /// A bundle source is not a valid nested string mapping.
    #[error("invalid bundle for '{language}': {reason}")]
    InvalidBundle { language: String, reason: String },

    /// A bundle file could not be read from disk.
    #[error("failed to read bundle {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl I18nError {
    pub(crate) fn missing_language(language: &str) -> Self {
        I18nError::MissingTranslation {
            language: language.to_string(),
            key: None,
            missing: Missing::Language,
        }
    }

    pub(crate) fn unsupported_language(language: &str, key: &str) -> Self {
        I18nError::MissingTranslation {
            language: language.to_string(),
            key: Some(key.to_string()),
            missing: Missing::Language,
        }
    }

    pub(crate) fn missing_key(language: &str, key: &str, missing: Missing) -> Self {
        I18nError::MissingTranslation {
            language: language.to_string(),
            key: Some(key.to_string()),
            missing,
        }
    }

    /// Returns `true` for the lookup failure, as opposed to load failures.
    pub fn is_missing_translation(&self) -> bool {
        matches!(self, I18nError::MissingTranslation { .. })
    }
}

fn describe_missing(language: &str, key: &Option<String>, missing: &Missing) -> String {
    match (missing, key) {
        (Missing::Language, Some(key)) => {
            format!("unsupported language '{}' (key '{}')", language, key)
        }
        (Missing::Language, None) => format!("unsupported language '{}'", language),
        (Missing::Section, Some(key)) => {
            format!("'{}' in '{}' is a section, not a string", key, language)
        }
        (_, Some(key)) => format!("no key '{}' in '{}'", key, language),
        (_, None) => format!("no key in '{}'", language),
    }
}
