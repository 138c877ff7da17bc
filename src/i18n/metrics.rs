//! Lookup metrics and observability module.
//!
//! Tracks how string lookups resolve: hits, misses (MissingTranslation
//! returned to the caller), and fallbacks to a second language.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// String lookup counters.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups that resolved in the requested language
    hits: AtomicUsize,

    /// Lookups that failed with MissingTranslation
    misses: AtomicUsize,

    /// Lookups answered from the fallback language
    fallbacks: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<LookupMetrics> = OnceLock::new();

impl LookupMetrics {
    /// Create a standalone set of counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global lookup metrics instance used by `Catalog`.
    pub fn global() -> &'static LookupMetrics {
        METRICS.get_or_init(LookupMetrics::new)
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let fallbacks = self.fallbacks();
        let lookups = hits + misses + fallbacks;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            misses,
            fallbacks,
            hit_rate,
        }
    }

    /// Reset all counters to zero (useful for testing).
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
    }
}

/// Metrics report containing current lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total lookups recorded
    pub lookups: usize,

    pub hits: usize,

    pub misses: usize,

    pub fallbacks: usize,

    /// Share of lookups resolved in the requested language, as a percentage (0-100)
    pub hit_rate: f64,
}
