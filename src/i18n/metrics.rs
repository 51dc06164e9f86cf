//! Bundle load metrics.
//!
//! Each [`TranslationCache`](super::TranslationCache) owns one of these, so
//! counters live exactly as long as the cache they describe.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for bundle loads through one cache.
#[derive(Debug, Default)]
pub struct LoadMetrics {
    /// Lookups answered from the cache (including recorded misses)
    cache_hits: AtomicUsize,

    /// Lookups that had to go to the source
    cache_misses: AtomicUsize,

    /// Requests made to the bundle source
    source_loads: AtomicUsize,

    /// Source requests that produced no bundle
    load_failures: AtomicUsize,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source_load(&self) {
        self.source_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn source_loads(&self) -> usize {
        self.source_loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let loads = self.source_loads();
        let failures = self.load_failures().min(loads);
        let load_success_rate = if loads > 0 {
            ((loads - failures) as f64 / loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            source_loads: loads,
            load_failures: failures,
            load_success_rate,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.source_loads.store(0, Ordering::Relaxed);
        self.load_failures.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of [`LoadMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub source_loads: usize,
    pub load_failures: usize,

    /// Share of source loads that produced a bundle, as a percentage (0-100)
    pub load_success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_cache_hit() {
        let metrics = LoadMetrics::new();

        assert_eq!(metrics.cache_hits(), 0);
        metrics.record_cache_hit();
        assert_eq!(metrics.cache_hits(), 1);
        metrics.record_cache_hit();
        assert_eq!(metrics.cache_hits(), 2);
    }

    #[test]
    fn test_record_cache_miss() {
        let metrics = LoadMetrics::new();

        metrics.record_cache_miss();
        assert_eq!(metrics.cache_misses(), 1);
    }

    #[test]
    fn test_record_source_load_and_failure() {
        let metrics = LoadMetrics::new();

        metrics.record_source_load();
        metrics.record_load_failure();
        assert_eq!(metrics.source_loads(), 1);
        assert_eq!(metrics.load_failures(), 1);
    }

    #[test]
    fn test_instances_are_independent() {
        let first = LoadMetrics::new();
        let second = LoadMetrics::new();

        first.record_cache_hit();
        assert_eq!(first.cache_hits(), 1);
        assert_eq!(second.cache_hits(), 0);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LoadMetrics::new().report();

        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_misses, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.source_loads, 0);
        assert_eq!(report.load_failures, 0);
        assert_eq!(report.load_success_rate, 0.0);
    }

    #[test]
    fn test_report_cache_hit_rate() {
        let metrics = LoadMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert_eq!(report.cache_hit_rate, 75.0);
    }

    #[test]
    fn test_report_load_success_rate() {
        let metrics = LoadMetrics::new();

        // 4 loads, 1 failure = 75% success rate
        for _ in 0..4 {
            metrics.record_source_load();
        }
        metrics.record_load_failure();

        let report = metrics.report();
        assert_eq!(report.source_loads, 4);
        assert_eq!(report.load_failures, 1);
        assert_eq!(report.load_success_rate, 75.0);
    }

    #[test]
    fn test_report_all_loads_failed() {
        let metrics = LoadMetrics::new();

        metrics.record_source_load();
        metrics.record_load_failure();
        metrics.record_source_load();
        metrics.record_load_failure();

        assert_eq!(metrics.report().load_success_rate, 0.0);
    }

    #[test]
    fn test_reset() {
        let metrics = LoadMetrics::new();
        metrics.record_cache_hit();
        metrics.record_source_load();

        metrics.reset();
        assert_eq!(metrics.report(), LoadMetrics::new().report());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let metrics = LoadMetrics::new();
        metrics.record_cache_hit();

        let json = serde_json::to_value(metrics.report()).expect("serialize");
        assert_eq!(json["cache_hits"], 1);
        assert_eq!(json["cache_hit_rate"], 100.0);
    }
}
