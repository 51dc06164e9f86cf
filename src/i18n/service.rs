//! Hosting i18n service: owns the cache and the active bundle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::bundle::TranslationBundle;
use super::cache::{CachedBundle, TranslationCache};
use super::language::LanguageCode;
use super::metrics::MetricsReport;
use super::overrides::Overrides;
use super::source::BundleSource;
use super::store::load_translations_with_fallback;
use super::translator::{create_enhanced_translator, EnhancedTranslator};

/// Language settings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nOptions {
    /// Language to load first
    #[serde(default)]
    pub current_language: LanguageCode,

    /// Language to use when the current one has no bundle
    #[serde(default)]
    pub fallback_language: Option<LanguageCode>,
}

impl I18nOptions {
    pub fn new(current_language: impl Into<LanguageCode>) -> Self {
        Self {
            current_language: current_language.into(),
            fallback_language: None,
        }
    }

    pub fn with_fallback(mut self, fallback_language: impl Into<LanguageCode>) -> Self {
        self.fallback_language = Some(fallback_language.into());
        self
    }
}

#[derive(Debug)]
struct ActiveState {
    current: LanguageCode,
    fallback: Option<LanguageCode>,
    bundle: CachedBundle,
    /// Bumped by every `change_language` call; a load that finishes after a
    /// newer call started is discarded.
    generation: u64,
}

/// The i18n service a UI host creates once and shares.
///
/// Translators handed out by [`I18nService::translator`] keep the bundle
/// that was active when they were created.
pub struct I18nService {
    source: Arc<dyn BundleSource>,
    cache: Arc<TranslationCache>,
    state: RwLock<ActiveState>,
}

impl I18nService {
    /// Create the service with its own cache and load the initial bundle.
    pub async fn init(options: I18nOptions, source: Arc<dyn BundleSource>) -> Self {
        Self::with_cache(options, source, Arc::new(TranslationCache::new())).await
    }

    /// Create the service around a caller-provided cache.
    pub async fn with_cache(
        options: I18nOptions,
        source: Arc<dyn BundleSource>,
        cache: Arc<TranslationCache>,
    ) -> Self {
        let I18nOptions {
            current_language,
            fallback_language,
        } = options;
        let current = if current_language.is_empty() {
            LanguageCode::default()
        } else {
            current_language
        };
        let fallback = fallback_language.filter(|f| !f.is_empty());

        let bundle = load_translations_with_fallback(
            source.as_ref(),
            &current,
            fallback.as_ref(),
            Some(cache.as_ref()),
        )
        .await;

        if bundle.is_none() {
            warn!(
                "No translations available for {} (fallback: {:?}); keys will render as-is",
                current,
                fallback.as_ref().map(LanguageCode::as_str)
            );
        } else {
            info!("I18n initialized for {}", current);
        }

        Self {
            source,
            cache,
            state: RwLock::new(ActiveState {
                current,
                fallback,
                bundle,
                generation: 0,
            }),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ActiveState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ActiveState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build a translator for `namespace` against the active bundle.
    pub fn translator(&self, namespace: &str, overrides: Option<Overrides>) -> EnhancedTranslator {
        let bundle = self.read_state().bundle.clone();
        create_enhanced_translator(namespace, bundle, overrides)
    }

    /// Switch to `language`, optionally replacing the fallback language.
    ///
    /// When `new_fallback` is `None` the current fallback is kept. If another
    /// call starts while this one is loading, this call's result is dropped.
    /// Returns `true` if this call's result became active.
    pub async fn change_language(
        &self,
        language: impl Into<LanguageCode>,
        new_fallback: Option<LanguageCode>,
    ) -> bool {
        let language = Some(language.into())
            .filter(|l| !l.is_empty())
            .unwrap_or_default();
        let (generation, fallback) = {
            let mut state = self.write_state();
            state.generation += 1;
            let fallback = new_fallback
                .filter(|f| !f.is_empty())
                .or_else(|| state.fallback.clone());
            (state.generation, fallback)
        };

        debug!("Changing language to {} (generation {})", language, generation);
        let bundle = load_translations_with_fallback(
            self.source.as_ref(),
            &language,
            fallback.as_ref(),
            Some(self.cache.as_ref()),
        )
        .await;

        let mut state = self.write_state();
        if state.generation != generation {
            debug!(
                "Discarding stale load for {} (generation {}, now {})",
                language, generation, state.generation
            );
            return false;
        }

        if bundle.is_none() {
            warn!("No translations available for {}; keys will render as-is", language);
        } else {
            info!("Language changed to {}", language);
        }
        state.current = language;
        state.fallback = fallback;
        state.bundle = bundle;
        true
    }

    pub fn current_language(&self) -> LanguageCode {
        self.read_state().current.clone()
    }

    pub fn fallback_language(&self) -> Option<LanguageCode> {
        self.read_state().fallback.clone()
    }

    /// The bundle new translators will use, if any was found.
    pub fn active_bundle(&self) -> Option<Arc<TranslationBundle>> {
        self.read_state().bundle.clone()
    }

    pub fn source(&self) -> &Arc<dyn BundleSource> {
        &self.source
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn metrics_report(&self) -> MetricsReport {
        self.cache.metrics_report()
    }
}

impl std::fmt::Debug for I18nService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("I18nService")
            .field("current", &state.current)
            .field("fallback", &state.fallback)
            .field("has_bundle", &state.bundle.is_some())
            .field("generation", &state.generation)
            .finish()
    }
}
