//! Embedded locale sources.
//!
//! Each supported language ships as a JSON document under `locales/`, compiled
//! into the binary so lookups never touch the filesystem. The documents must
//! all have the same key-path shape; see `BundleValidator`.

/// Spanish strings (canonical)
pub const SPANISH_SOURCE: &str = include_str!("../../locales/es.json");

/// English strings
pub const ENGLISH_SOURCE: &str = include_str!("../../locales/en.json");

/// Portuguese strings
pub const PORTUGUESE_SOURCE: &str = include_str!("../../locales/pt.json");

/// Get the embedded JSON source for a language code.
///
/// # Returns
/// * `Some(&str)` for "es", "en" and "pt"
/// * `None` for any other code
pub fn embedded_source(code: &str) -> Option<&'static str> {
    match code {
        "es" => Some(SPANISH_SOURCE),
        "en" => Some(ENGLISH_SOURCE),
        "pt" => Some(PORTUGUESE_SOURCE),
        _ => None,
    }
}
