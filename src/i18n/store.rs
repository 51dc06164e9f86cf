//! Template store: cache-aware bundle loading with a fallback language.

use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::{CachedBundle, TranslationCache};
use super::language::LanguageCode;
use super::source::BundleSource;

/// Load the bundle for `language`.
///
/// A cache entry, including a recorded miss, is returned without touching
/// the source. Otherwise the source is asked once and the outcome is stored
/// in `cache` when one is given. Source errors never escape: they are
/// logged and reported as `None`.
pub async fn load_translations(
    source: &dyn BundleSource,
    language: &LanguageCode,
    cache: Option<&TranslationCache>,
) -> CachedBundle {
    if let Some(cache) = cache {
        if let Some(cached) = cache.get(language) {
            cache.metrics().record_cache_hit();
            debug!("Translations for {} served from cache", language);
            return cached;
        }
        cache.metrics().record_cache_miss();
        cache.metrics().record_source_load();
    }

    let result = match source.load(language).await {
        Ok(bundle) => {
            debug!("Loaded translations for {}", language);
            Some(Arc::new(bundle))
        }
        Err(e) => {
            if e.is_not_found() {
                debug!("{}", e);
            } else {
                warn!("Failed to load translations for {}: {}", language, e);
            }
            if let Some(cache) = cache {
                cache.metrics().record_load_failure();
            }
            None
        }
    };

    match cache {
        // A concurrent load may have stored first; converge on its result
        Some(cache) => cache.insert(language.clone(), result),
        None => result,
    }
}

/// Load `current`, falling back to `fallback` when `current` has no bundle.
///
/// The fallback is only tried when it is given and differs from `current`.
pub async fn load_translations_with_fallback(
    source: &dyn BundleSource,
    current: &LanguageCode,
    fallback: Option<&LanguageCode>,
    cache: Option<&TranslationCache>,
) -> CachedBundle {
    let loaded = load_translations(source, current, cache).await;
    if loaded.is_some() {
        return loaded;
    }

    match fallback {
        Some(fallback) if fallback != current => {
            debug!("No translations for {}, falling back to {}", current, fallback);
            load_translations(source, fallback, cache).await
        }
        _ => loaded,
    }
}
