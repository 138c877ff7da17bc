//! Supported languages and their display metadata.
//!
//! The registry is built once behind a `OnceLock` and never changes. Its order
//! is the order bundles are loaded in and languages are listed by the CLI.

use std::sync::OnceLock;

/// Metadata for one language the app ships strings for.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 code, also the bundle file stem (`locales/<code>.json`)
    pub code: &'static str,

    /// English name, e.g. "Portuguese"
    pub name: &'static str,

    /// Name in the language itself, e.g. "Português"
    pub native_name: &'static str,

    /// Reference bundle the others are validated against
    pub is_canonical: bool,
}

/// Registry of supported languages.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: vec![
                LanguageConfig {
                    code: "es",
                    name: "Spanish",
                    native_name: "Español",
                    is_canonical: true,
                },
                LanguageConfig {
                    code: "en",
                    name: "English",
                    native_name: "English",
                    is_canonical: false,
                },
                LanguageConfig {
                    code: "pt",
                    name: "Portuguese",
                    native_name: "Português",
                    is_canonical: false,
                },
            ],
        })
    }

    /// Look up a language by its exact (lowercase) code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Every supported language, in registry order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The reference language for shape validation.
    ///
    /// # Panics
    /// Panics unless exactly one registered language is canonical.
    pub fn canonical(&self) -> &LanguageConfig {
        let mut canonical = self.languages.iter().filter(|lang| lang.is_canonical);
        match (canonical.next(), canonical.next()) {
            (Some(lang), None) => lang,
            (None, _) => panic!("No canonical language found in registry"),
            (Some(_), Some(_)) => panic!("Multiple canonical languages found in registry"),
        }
    }
}
