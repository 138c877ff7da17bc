//! Internationalization (i18n) module for the loyalty app's UI strings.
//!
//! Every supported language has one immutable bundle: a nested table of
//! sections and display strings, addressed by dot-delimited key paths.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` handle
//! - `bundle`: The nested string tree for one language and key-path lookup
//! - `strings`: Locale sources embedded at build time
//! - `catalog`: All loaded bundles and the lookup API
//! - `validator`: Shape and content checks between bundles
//! - `metrics`: Lookup counters
//! - `format`: `{placeholder}` substitution
//!
//! # Example
//!
//! ```rust,ignore
//! use loyalty_i18n::i18n::{get_string, Catalog};
//!
//! let save = get_string("en", "common.save")?;
//! let stamps = Catalog::global().translate("pt", "card.stamps", &[("current", "3"), ("total", "10")])?;
//! ```

mod bundle;
mod catalog;
mod error;
pub mod format;
mod language;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use bundle::{LanguageBundle, Node, KEY_SEPARATOR};
pub use catalog::{get_string, Catalog};
pub use error::{I18nError, Missing};
pub use language::Language;
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::embedded_source;
pub use validator::{BundleValidator, ValidationReport};
