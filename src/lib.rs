//! Localized UI strings for the loyalty web app (Spanish, English, Portuguese).
//!
//! See [`i18n`] for the lookup API and [`config`] for runtime settings.

pub mod config;
pub mod i18n;
