//! Translation engine for embeddable UI components.
//!
//! Bundles are nested JSON documents of translated strings, one per
//! language. They are loaded through a [`BundleSource`], cached per
//! [`TranslationCache`], and read through namespace-bound translators that
//! substitute `${var}` placeholders and split `<tag>...</tag>` markup into
//! caller-supplied components.
//!
//! # Architecture
//!
//! - `language`: the `LanguageCode` newtype
//! - `bundle`: translation tree and bundle types
//! - `overrides`: per-translator replacement strings
//! - `source`: where bundles come from (memory, directory, HTTP)
//! - `cache` / `metrics`: caller-owned load cache and its counters
//! - `store`: cache-aware loading with a fallback language
//! - `path`: dotted key lookup
//! - `substitute` / `render`: variable substitution and component markup
//! - `translator`: the `t` / `trans` translators
//! - `service`: the hosting service that tracks the active language
//! - `validator`: bundle consistency checks
//!
//! # Example
//!
//! ```rust,ignore
//! use web_ui_i18n::i18n::{FsSource, I18nOptions, I18nService, Vars};
//!
//! let options = I18nOptions::new("es-ES").with_fallback("en-US");
//! let service = I18nService::init(options, Arc::new(FsSource::new("locales"))).await;
//!
//! let t = service.translator("mfa", None);
//! let greeting = t.t("welcome", Some(&Vars::new().with("name", "Ada")), None);
//! ```

mod bundle;
mod cache;
mod language;
mod metrics;
mod overrides;
mod path;
mod render;
mod service;
mod source;
mod store;
mod substitute;
mod translator;
mod validator;

pub use bundle::{TranslationBundle, TranslationNode};
pub use cache::{CachedBundle, TranslationCache};
pub use language::LanguageCode;
pub use metrics::{LoadMetrics, MetricsReport};
pub use overrides::Overrides;
pub use path::{get_nested_value, namespaced_key, resolve_template};
pub use render::{component_keys, render, Component, ComponentsMap, Segment, COMPONENT_PATTERN};
pub use service::{I18nOptions, I18nService};
pub use source::{BundleSource, FsSource, HttpSource, SourceError, StaticSource};
pub use store::{load_translations, load_translations_with_fallback};
pub use substitute::{placeholder_names, substitute, Vars, VAR_PATTERN};
pub use translator::{create_enhanced_translator, create_translator, EnhancedTranslator, TransOptions};
pub use validator::{BundleValidator, ValidationReport};
