//! The catalog: every loaded language bundle, plus the lookup API.
//!
//! `Catalog::global()` holds the bundles embedded at build time and is what
//! `get_string` resolves against. A catalog can also be built from a
//! directory of `<code>.json` files (see `Config::locales_dir`).
//!
//! Lookups are counted in `LookupMetrics::global()` unless the catalog was
//! given its own counters with `Catalog::with_metrics`.

use crate::config::Config;
use crate::i18n::format::interpolate;
use crate::i18n::strings::embedded_source;
use crate::i18n::{
    BundleValidator, I18nError, Language, LanguageBundle, LanguageRegistry, LookupMetrics,
};
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, warn};

/// All bundles available for lookup, keyed by language code.
#[derive(Debug, Clone)]
pub struct Catalog {
    bundles: BTreeMap<String, LanguageBundle>,
    canonical: &'static str,
    metrics: Option<Arc<LookupMetrics>>,
}

/// Global catalog instance (initialized lazily from the embedded sources)
static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Get the global catalog built from the embedded locale sources.
    ///
    /// # Panics
    /// Panics if an embedded source is not a valid bundle. The sources are
    /// compiled in and covered by tests, so this indicates a broken build.
    pub fn global() -> &'static Catalog {
        CATALOG.get_or_init(|| Catalog::embedded().expect("embedded locale bundles should parse"))
    }

    /// Build a catalog from the sources compiled into the binary, one bundle
    /// per language in the registry.
    pub fn embedded() -> Result<Catalog, I18nError> {
        let mut bundles = Vec::new();
        for config in LanguageRegistry::get().list() {
            let source =
                embedded_source(config.code).ok_or_else(|| I18nError::InvalidBundle {
                    language: config.code.to_string(),
                    reason: "no embedded source".to_string(),
                })?;
            bundles.push(LanguageBundle::from_json(config.code, source)?);
        }
        Ok(Catalog::from_bundles(bundles))
    }

    /// Build a catalog by reading `<dir>/<code>.json` for every
    /// language in the registry.
    pub fn from_dir(dir: &Path) -> Result<Catalog, I18nError> {
        let mut bundles = Vec::new();
        for config in LanguageRegistry::get().list() {
            let path = dir.join(format!("{}.json", config.code));
            let source = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
                path: path.clone(),
                source,
            })?;
            bundles.push(LanguageBundle::from_json(config.code, &source)?);
        }
        Ok(Catalog::from_bundles(bundles))
    }

    /// Build a catalog from already parsed bundles. A later bundle with the
    /// same code replaces an earlier one.
    pub fn from_bundles(bundles: impl IntoIterator<Item = LanguageBundle>) -> Catalog {
        let bundles: BTreeMap<String, LanguageBundle> = bundles
            .into_iter()
            .map(|bundle| (bundle.code().to_string(), bundle))
            .collect();

        for bundle in bundles.values() {
            debug!(
                language = bundle.code(),
                strings = bundle.len(),
                "Loaded language bundle"
            );
        }

        Catalog {
            bundles,
            canonical: Language::canonical().code(),
            metrics: None,
        }
    }

    /// Count this catalog's lookups in `metrics` instead of the global
    /// counters.
    pub fn with_metrics(mut self, metrics: Arc<LookupMetrics>) -> Catalog {
        self.metrics = Some(metrics);
        self
    }

    /// Counters this catalog records lookups into.
    pub fn metrics(&self) -> &LookupMetrics {
        self.metrics.as_deref().unwrap_or_else(|| LookupMetrics::global())
    }

    /// Read the bundles the configuration points at without validating them:
    /// `locales_dir` when set, the embedded sources otherwise.
    pub fn load(config: &Config) -> Result<Catalog, I18nError> {
        match &config.locales_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "Loading locale bundles from directory");
                Catalog::from_dir(dir)
            }
            None => Catalog::embedded(),
        }
    }

    /// Load the catalog described by the configuration.
    ///
    /// Every bundle is validated against the canonical one. Errors are logged
    /// at `error` and warnings at `warn`. In strict mode any validation error
    /// aborts the load.
    pub fn from_config(config: &Config) -> Result<Catalog> {
        let catalog = Catalog::load(config)?;

        let mut error_count = 0;
        for report in BundleValidator::validate_catalog(&catalog) {
            for warning in &report.warnings {
                warn!(language = %report.language, "{}", warning);
            }
            for err in &report.errors {
                error!(language = %report.language, "{}", err);
            }
            error_count += report.errors.len();
        }

        if config.strict && error_count > 0 {
            bail!(
                "Locale bundles failed validation with {} error(s)",
                error_count
            );
        }

        Ok(catalog)
    }

    /// Code of the reference bundle used for validation.
    pub fn canonical_code(&self) -> &'static str {
        self.canonical
    }

    /// Loaded language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    /// All loaded bundles, sorted by language code.
    pub fn bundles(&self) -> impl Iterator<Item = &LanguageBundle> {
        self.bundles.values()
    }

    /// Get the bundle for a language code.
    ///
    /// # Errors
    /// `MissingTranslation` if no bundle is loaded for the code.
    pub fn bundle(&self, code: &str) -> Result<&LanguageBundle, I18nError> {
        self.bundles
            .get(code)
            .ok_or_else(|| I18nError::missing_language(code))
    }

    /// Resolve a key path in one language. Never falls back.
    ///
    /// # Errors
    /// `MissingTranslation` if the language is not loaded or the key path does
    /// not resolve to a string.
    pub fn get_string(&self, code: &str, key_path: &str) -> Result<&str, I18nError> {
        let result = self.resolve(code, key_path);

        let metrics = self.metrics();
        match &result {
            Ok(_) => metrics.record_hit(),
            Err(_) => metrics.record_miss(),
        }
        result
    }

    /// Resolve a key path, trying `fallback` when the primary language
    /// cannot answer.
    ///
    /// # Errors
    /// The primary language's `MissingTranslation` if neither language
    /// resolves the key path.
    pub fn get_with_fallback(
        &self,
        code: &str,
        key_path: &str,
        fallback: &str,
    ) -> Result<&str, I18nError> {
        let metrics = self.metrics();
        let err = match self.resolve(code, key_path) {
            Ok(text) => {
                metrics.record_hit();
                return Ok(text);
            }
            Err(err) => err,
        };

        if fallback != code {
            if let Some(text) = self
                .bundles
                .get(fallback)
                .and_then(|bundle| bundle.get(key_path).ok())
            {
                warn!(
                    language = code,
                    fallback = fallback,
                    key = key_path,
                    "Falling back to another language"
                );
                metrics.record_fallback();
                return Ok(text);
            }
        }

        metrics.record_miss();
        Err(err)
    }

    fn resolve(&self, code: &str, key_path: &str) -> Result<&str, I18nError> {
        match self.bundles.get(code) {
            Some(bundle) => bundle.get(key_path),
            None => Err(I18nError::unsupported_language(code, key_path)),
        }
    }

    /// Resolve a key path and substitute `{placeholder}` arguments.
    pub fn translate(
        &self,
        code: &str,
        key_path: &str,
        args: &[(&str, &str)],
    ) -> Result<String, I18nError> {
        self.get_string(code, key_path)
            .map(|template| interpolate(template, args))
    }
}

/// Resolve a key path against the global catalog.
///
/// ```ignore
/// assert_eq!(get_string("en", "common.save")?, "Save Changes");
/// ```
pub fn get_string(code: &str, key_path: &str) -> Result<&'static str, I18nError> {
    Catalog::global().get_string(code, key_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Missing;

    fn small_catalog() -> Catalog {
        Catalog::from_bundles([
            LanguageBundle::from_json("es", r#"{"a": {"b": "uno", "c": "dos"}}"#).unwrap(),
            LanguageBundle::from_json("en", r#"{"a": {"b": "one"}}"#).unwrap(),
        ])
    }

    // ==================== Embedded Catalog Tests ====================

    #[test]
    fn test_embedded_has_all_languages() {
        let catalog = Catalog::embedded().expect("Should load");
        let codes: Vec<_> = catalog.languages().collect();
        assert_eq!(codes, vec!["en", "es", "pt"]);
        assert_eq!(catalog.canonical_code(), "es");
    }

    #[test]
    fn test_global_returns_same_instance() {
        assert!(std::ptr::eq(Catalog::global(), Catalog::global()));
    }

    #[test]
    fn test_spot_checks() {
        assert_eq!(get_string("en", "common.save").unwrap(), "Save Changes");
        assert_eq!(get_string("es", "auth.loginTitle").unwrap(), "Bienvenido de nuevo");
        assert_eq!(get_string("pt", "dashboard.actions.redeem").unwrap(), "Resgatar");
        assert_eq!(
            get_string("en", "pricing.features.customers100").unwrap(),
            "Up to 100 customers"
        );
    }

    #[test]
    fn test_unsupported_language() {
        let err = get_string("xx", "common.save").unwrap_err();
        assert!(matches!(
            err,
            I18nError::MissingTranslation {
                missing: Missing::Language,
                ..
            }
        ));
    }

    #[test]
    fn test_nonexistent_path() {
        let err = get_string("en", "nonexistent.path").unwrap_err();
        assert!(err.is_missing_translation());
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_get_string_does_not_fall_back() {
        let catalog = small_catalog();
        assert!(catalog.get_string("en", "a.c").is_err());
    }

    #[test]
    fn test_get_with_fallback_prefers_primary() {
        let catalog = small_catalog();
        assert_eq!(catalog.get_with_fallback("en", "a.b", "es").unwrap(), "one");
    }

    #[test]
    fn test_get_with_fallback_uses_fallback() {
        let catalog = small_catalog();
        assert_eq!(catalog.get_with_fallback("en", "a.c", "es").unwrap(), "dos");
    }

    #[test]
    fn test_get_with_fallback_unknown_language() {
        let catalog = small_catalog();
        assert_eq!(catalog.get_with_fallback("pt", "a.b", "en").unwrap(), "one");
    }

    #[test]
    fn test_get_with_fallback_reports_primary_error() {
        let catalog = small_catalog();
        let err = catalog.get_with_fallback("en", "a.z", "es").unwrap_err();
        match err {
            I18nError::MissingTranslation { language, key, .. } => {
                assert_eq!(language, "en");
                assert_eq!(key.as_deref(), Some("a.z"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_with_metrics_counts_locally() {
        let metrics = Arc::new(LookupMetrics::new());
        let catalog = small_catalog().with_metrics(Arc::clone(&metrics));

        catalog.get_string("es", "a.b").unwrap();
        let _ = catalog.get_string("es", "a.z");
        catalog.get_with_fallback("en", "a.c", "es").unwrap();

        assert!(std::ptr::eq(catalog.metrics(), metrics.as_ref()));
        assert_eq!(metrics.hits(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.fallbacks(), 1);
    }

    #[test]
    fn test_metrics_default_to_global() {
        assert!(std::ptr::eq(small_catalog().metrics(), LookupMetrics::global()));
    }

    #[test]
    fn test_clone_shares_metrics() {
        let metrics = Arc::new(LookupMetrics::new());
        let catalog = small_catalog().with_metrics(Arc::clone(&metrics));
        let copy = catalog.clone();

        copy.get_string("en", "a.b").unwrap();
        assert_eq!(catalog.metrics().hits(), 1);
    }

    // ==================== Other Tests ====================

    #[test]
    fn test_bundle_lookup() {
        let catalog = small_catalog();
        assert_eq!(catalog.bundle("es").unwrap().len(), 2);
        assert!(catalog.bundle("pt").is_err());
    }

    #[test]
    fn test_translate_interpolates() {
        let text = Catalog::global()
            .translate("en", "card.stamps", &[("current", "3"), ("total", "10")])
            .unwrap();
        assert_eq!(text, "3 of 10 stamps");
    }

    #[test]
    fn test_from_bundles_later_replaces_earlier() {
        let catalog = Catalog::from_bundles([
            LanguageBundle::from_json("en", r#"{"a": "old"}"#).unwrap(),
            LanguageBundle::from_json("en", r#"{"a": "new"}"#).unwrap(),
        ]);
        assert_eq!(catalog.get_string("en", "a").unwrap(), "new");
    }
}
