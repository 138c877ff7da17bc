//! `loyalty-i18n` command-line tool
//!
//! Usage:
//!   loyalty-i18n get <key> [--lang <code>] [name=value ...]   # Print one string
//!   loyalty-i18n keys [--lang <code>]                          # List key paths
//!   loyalty-i18n export [--lang <code>]                        # Print a bundle as JSON
//!   loyalty-i18n check                                         # Validate all bundles
//!   loyalty-i18n languages                                     # List supported languages
//!
//! Optional environment variables:
//! - I18N_DEFAULT_LANGUAGE (defaults to es)
//! - I18N_FALLBACK_LANGUAGE (unset: lookups never fall back)
//! - I18N_LOCALES_DIR (unset: use the bundles compiled into the binary)
//! - I18N_STRICT (defaults to true, ignored by `check`)

use anyhow::{bail, Context, Result};
use loyalty_i18n::config::Config;
use loyalty_i18n::i18n::{format::interpolate, BundleValidator, Catalog, Language};
use std::io::Write;
use tracing::{debug, info};

const USAGE: &str = "Usage: loyalty-i18n <get|keys|export|check|languages> [args]";

/// Parsed command-line arguments.
struct Args {
    command: String,
    lang: Option<String>,
    positional: Vec<String>,
}

impl Args {
    fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut raw = raw.into_iter();
        let command = raw.next().context(USAGE)?;
        let mut lang = None;
        let mut positional = Vec::new();

        while let Some(arg) = raw.next() {
            if arg == "--lang" {
                lang = Some(raw.next().context("--lang requires a language code")?);
            } else {
                positional.push(arg);
            }
        }

        Ok(Self {
            command,
            lang,
            positional,
        })
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("loyalty_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let args = Args::parse(std::env::args().skip(1))?;

    // `check` prints its own report, so it must not be stopped by strict loading
    let catalog = if args.command == "check" {
        Catalog::load(&config)?
    } else {
        Catalog::from_config(&config)?
    };

    run(&config, &catalog, &args, &mut std::io::stdout().lock())
}

/// Execute one command against a loaded catalog, writing its output to `out`.
fn run(config: &Config, catalog: &Catalog, args: &Args, out: &mut impl Write) -> Result<()> {
    let language = match &args.lang {
        Some(code) => Language::from_code(code)?,
        None => config.default_language,
    };

    match args.command.as_str() {
        "get" => {
            let (key, rest) = args
                .positional
                .split_first()
                .context("Usage: loyalty-i18n get <key> [--lang <code>] [name=value ...]")?;
            let pairs = parse_pairs(rest)?;

            let template = match config.fallback_language {
                Some(fallback) => catalog.get_with_fallback(language.code(), key, fallback.code())?,
                None => catalog.get_string(language.code(), key)?,
            };
            writeln!(out, "{}", interpolate(template, &pairs))?;

            debug!(
                "Lookup metrics: {}",
                serde_json::to_string(&catalog.metrics().report())?
            );
        }
        "keys" => {
            for key in catalog.bundle(language.code())?.key_paths() {
                writeln!(out, "{}", key)?;
            }
        }
        "export" => {
            writeln!(out, "{}", catalog.bundle(language.code())?.to_json()?)?;
        }
        "check" => {
            let reports = BundleValidator::validate_catalog(catalog);
            let mut errors = 0;
            for report in &reports {
                for error in &report.errors {
                    writeln!(out, "[{}] error: {}", report.language, error)?;
                }
                for warning in &report.warnings {
                    writeln!(out, "[{}] warning: {}", report.language, warning)?;
                }
                errors += report.errors.len();
            }
            if errors > 0 {
                bail!("{} validation error(s)", errors);
            }
            info!(
                "All {} bundles share the same {} key paths",
                reports.len(),
                catalog.bundle(catalog.canonical_code())?.len()
            );
        }
        "languages" => {
            for lang in Language::all() {
                let marker = if lang.is_canonical() { " (canonical)" } else { "" };
                writeln!(
                    out,
                    "{}\t{}\t{}{}",
                    lang,
                    lang.name(),
                    lang.native_name(),
                    marker
                )?;
            }
        }
        other => bail!("Unknown command '{}'. {}", other, USAGE),
    }

    Ok(())
}

/// Parse `name=value` placeholder arguments.
fn parse_pairs(raw: &[String]) -> Result<Vec<(&str, &str)>> {
    raw.iter()
        .map(|arg| {
            arg.split_once('=')
                .with_context(|| format!("Expected name=value, got '{}'", arg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loyalty_i18n::i18n::{LanguageBundle, LookupMetrics};
    use std::sync::Arc;

    fn args(raw: &[&str]) -> Result<Args> {
        Args::parse(raw.iter().map(|s| s.to_string()))
    }

    /// Portuguese is missing `common.cancel`.
    fn drifted_catalog() -> Catalog {
        let full = r#"{"common": {"save": "Save Changes", "cancel": "Cancel"}}"#;
        Catalog::from_bundles([
            LanguageBundle::from_json("es", full).unwrap(),
            LanguageBundle::from_json("en", full).unwrap(),
            LanguageBundle::from_json("pt", r#"{"common": {"save": "Salvar"}}"#).unwrap(),
        ])
        .with_metrics(Arc::new(LookupMetrics::new()))
    }

    fn run_command(config: &Config, catalog: &Catalog, raw: &[&str]) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run(config, catalog, &args(raw).unwrap(), &mut out);
        (result, String::from_utf8(out).expect("Output should be UTF-8"))
    }

    // ==================== Argument Tests ====================

    #[test]
    fn test_args_parse_lang_anywhere() {
        let parsed = args(&["get", "card.stamps", "--lang", "pt", "current=3"]).unwrap();
        assert_eq!(parsed.command, "get");
        assert_eq!(parsed.lang.as_deref(), Some("pt"));
        assert_eq!(parsed.positional, vec!["card.stamps", "current=3"]);
    }

    #[test]
    fn test_args_parse_requires_command() {
        assert!(args(&[]).is_err());
    }

    #[test]
    fn test_args_parse_lang_requires_value() {
        assert!(args(&["keys", "--lang"]).is_err());
    }

    #[test]
    fn test_parse_pairs() {
        let raw = vec!["current=3".to_string(), "total=10".to_string()];
        assert_eq!(
            parse_pairs(&raw).unwrap(),
            vec![("current", "3"), ("total", "10")]
        );
    }

    #[test]
    fn test_parse_pairs_value_may_contain_equals() {
        let raw = vec!["name=a=b".to_string()];
        assert_eq!(parse_pairs(&raw).unwrap(), vec![("name", "a=b")]);
    }

    #[test]
    fn test_parse_pairs_rejects_bare_word() {
        let raw = vec!["oops".to_string()];
        assert!(parse_pairs(&raw).is_err());
    }

    // ==================== get Tests ====================

    #[test]
    fn test_get_interpolates() {
        let (result, out) = run_command(
            &Config::default(),
            Catalog::global(),
            &["get", "card.stamps", "--lang", "en", "current=3", "total=10"],
        );
        result.expect("Should resolve");
        assert_eq!(out, "3 of 10 stamps\n");
    }

    #[test]
    fn test_get_uses_default_language() {
        let (result, out) = run_command(
            &Config::default(),
            Catalog::global(),
            &["get", "auth.loginTitle"],
        );
        result.expect("Should resolve");
        assert_eq!(out, "Bienvenido de nuevo\n");
    }

    #[test]
    fn test_get_takes_fallback_path() {
        let catalog = drifted_catalog();
        let config = Config {
            fallback_language: Some(Language::ENGLISH),
            ..Config::default()
        };

        let (result, out) = run_command(&config, &catalog, &["get", "common.cancel", "--lang", "pt"]);
        result.expect("Should fall back to English");
        assert_eq!(out, "Cancel\n");
        assert_eq!(catalog.metrics().fallbacks(), 1);
    }

    #[test]
    fn test_get_without_fallback_fails() {
        let catalog = drifted_catalog();
        let (result, out) = run_command(
            &Config::default(),
            &catalog,
            &["get", "common.cancel", "--lang", "pt"],
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing translation"), "{}", err);
        assert!(out.is_empty());
    }

    #[test]
    fn test_get_requires_key() {
        let (result, _) = run_command(&Config::default(), Catalog::global(), &["get"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_lang_flag_fails() {
        let (result, _) = run_command(
            &Config::default(),
            Catalog::global(),
            &["keys", "--lang", "xx"],
        );
        assert!(result.is_err());
    }

    // ==================== check Tests ====================

    #[test]
    fn test_check_reports_drift_and_fails() {
        let (result, out) = run_command(&Config::default(), &drifted_catalog(), &["check"]);

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "1 validation error(s)");
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["[pt] error: Missing key 'common.cancel' (present in 'es')"]
        );
    }

    #[test]
    fn test_check_clean_catalog() {
        let (result, out) = run_command(&Config::default(), Catalog::global(), &["check"]);
        result.expect("Embedded bundles should validate");
        assert!(out.is_empty(), "{}", out);
    }

    // ==================== Other Command Tests ====================

    #[test]
    fn test_keys_lists_key_paths() {
        let (result, out) = run_command(
            &Config::default(),
            &drifted_catalog(),
            &["keys", "--lang", "en"],
        );
        result.expect("Should list keys");
        assert_eq!(out, "common.cancel\ncommon.save\n");
    }

    #[test]
    fn test_export_reparses() {
        let (result, out) = run_command(
            &Config::default(),
            Catalog::global(),
            &["export", "--lang", "pt"],
        );
        result.expect("Should export");

        let reparsed = LanguageBundle::from_json("pt", &out).expect("Export should be valid JSON");
        assert_eq!(&reparsed, Catalog::global().bundle("pt").unwrap());
    }

    #[test]
    fn test_languages_lists_registry() {
        let (result, out) = run_command(&Config::default(), Catalog::global(), &["languages"]);
        result.expect("Should list languages");
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "es\tSpanish\tEspañol (canonical)",
                "en\tEnglish\tEnglish",
                "pt\tPortuguese\tPortuguês",
            ]
        );
    }

    #[test]
    fn test_unknown_command() {
        let (result, _) = run_command(&Config::default(), Catalog::global(), &["translate"]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Unknown command 'translate'"));
    }
}
