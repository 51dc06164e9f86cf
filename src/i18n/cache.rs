//! Caller-owned translation cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::bundle::TranslationBundle;
use super::language::LanguageCode;
use super::metrics::{LoadMetrics, MetricsReport};

/// Result of a load attempt: the bundle, or `None` for "tried, not found".
pub type CachedBundle = Option<Arc<TranslationBundle>>;

/// Maps languages to load results.
///
/// Entries are written once per language: the first stored result wins and
/// later stores return it instead. There is no background invalidation;
/// [`TranslationCache::clear`] drops everything at once.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: Mutex<HashMap<LanguageCode, CachedBundle>>,
    metrics: LoadMetrics,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<LanguageCode, CachedBundle>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The recorded result for `language`.
    ///
    /// The outer `Option` is whether an entry exists; the inner one whether
    /// the load found a bundle.
    pub fn get(&self, language: &LanguageCode) -> Option<CachedBundle> {
        self.entries().get(language).cloned()
    }

    /// Record `result` for `language` unless an entry already exists.
    ///
    /// Returns the entry now in the cache.
    pub fn insert(&self, language: LanguageCode, result: CachedBundle) -> CachedBundle {
        self.entries().entry(language).or_insert(result).clone()
    }

    pub fn contains(&self, language: &LanguageCode) -> bool {
        self.entries().contains_key(language)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every entry. Metrics are kept.
    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn metrics(&self) -> &LoadMetrics {
        &self.metrics
    }

    pub fn metrics_report(&self) -> MetricsReport {
        self.metrics.report()
    }
}
