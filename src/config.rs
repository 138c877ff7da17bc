use crate::i18n::Language;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub default_language: Language,
    pub fallback_language: Option<Language>,

    // Bundles
    pub locales_dir: Option<PathBuf>,
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: Language::canonical(),
            fallback_language: None,
            locales_dir: None,
            strict: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source (the environment
    /// in production, a map in tests).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_language = match var("I18N_DEFAULT_LANGUAGE") {
            Some(code) => Language::from_code(code.trim())
                .context("I18N_DEFAULT_LANGUAGE is not a supported language")?,
            None => Language::canonical(),
        };

        let fallback_language = var("I18N_FALLBACK_LANGUAGE")
            .filter(|code| !code.trim().is_empty())
            .map(|code| Language::from_code(code.trim()))
            .transpose()
            .context("I18N_FALLBACK_LANGUAGE is not a supported language")?;

        Ok(Self {
            default_language,
            fallback_language,

            locales_dir: var("I18N_LOCALES_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            strict: var("I18N_STRICT")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
