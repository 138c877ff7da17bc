//! Bundle validation module.
//!
//! Checks that a bundle can stand in for the reference bundle: same key
//! paths, no empty strings, and the same `{placeholders}` per key.

use crate::i18n::format::placeholders;
use crate::i18n::{Catalog, LanguageBundle};
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Language code of the validated bundle
    pub language: String,

    /// Problems that break lookups (missing/extra keys, empty strings)
    pub errors: Vec<String>,

    /// Problems that degrade rendering (placeholder drift)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for bundle shape and content.
pub struct BundleValidator;

impl BundleValidator {
    /// Validate `candidate` against `reference`.
    ///
    /// Errors:
    /// - key paths present in the reference but missing from the candidate
    /// - key paths present only in the candidate
    /// - empty strings in the candidate
    ///
    /// Warnings:
    /// - keys whose placeholder sets differ between the two bundles
    pub fn validate(reference: &LanguageBundle, candidate: &LanguageBundle) -> ValidationReport {
        let mut report = ValidationReport::new(candidate.code());

        let reference_keys: BTreeSet<String> = reference.key_paths().into_iter().collect();
        let candidate_keys: BTreeSet<String> = candidate.key_paths().into_iter().collect();

        for key in reference_keys.difference(&candidate_keys) {
            report.errors.push(format!(
                "Missing key '{}' (present in '{}')",
                key,
                reference.code()
            ));
        }
        for key in candidate_keys.difference(&reference_keys) {
            report.errors.push(format!(
                "Extra key '{}' (absent from '{}')",
                key,
                reference.code()
            ));
        }

        for (key, value) in candidate.entries() {
            if value.trim().is_empty() {
                report.errors.push(format!("Empty value for '{}'", key));
            }
        }

        for key in reference_keys.intersection(&candidate_keys) {
            let (Ok(expected), Ok(actual)) = (reference.get(key), candidate.get(key)) else {
                continue;
            };
            let expected: BTreeSet<String> = placeholders(expected).into_iter().collect();
            let actual: BTreeSet<String> = placeholders(actual).into_iter().collect();
            if expected != actual {
                report.warnings.push(format!(
                    "Placeholder mismatch for '{}': '{}' has {:?}, '{}' has {:?}",
                    key,
                    reference.code(),
                    expected,
                    candidate.code(),
                    actual
                ));
            }
        }

        report
    }

    /// Validate every bundle in the catalog against the canonical one.
    ///
    /// The canonical bundle is itself checked for empty strings. A catalog
    /// without a canonical bundle yields a single error report for it.
    pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationReport> {
        let canonical = catalog.canonical_code();
        let Ok(reference) = catalog.bundle(canonical) else {
            let mut report = ValidationReport::new(canonical);
            report
                .errors
                .push(format!("Canonical bundle '{}' is not loaded", canonical));
            return vec![report];
        };

        catalog
            .bundles()
            .map(|bundle| Self::validate(reference, bundle))
            .collect()
    }
}
