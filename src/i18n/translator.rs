//! Namespace-bound translators.
//!
//! Lookup order for every call: overrides, then the bundle, then the
//! caller's fallback text, then the key itself. Substitution runs on
//! whichever string won, so fallbacks can use `${var}` too.

use std::sync::Arc;

use super::bundle::TranslationBundle;
use super::overrides::Overrides;
use super::path::resolve_template;
use super::render::{render, ComponentsMap, Segment};
use super::substitute::{substitute, Vars};

/// Options for [`EnhancedTranslator::trans`].
pub struct TransOptions<'a, T> {
    pub components: &'a ComponentsMap<T>,
    pub vars: Option<&'a Vars>,
    pub fallback: Option<&'a str>,
}

impl<'a, T> TransOptions<'a, T> {
    pub fn new(components: &'a ComponentsMap<T>) -> Self {
        Self {
            components,
            vars: None,
            fallback: None,
        }
    }

    pub fn vars(mut self, vars: &'a Vars) -> Self {
        self.vars = Some(vars);
        self
    }

    pub fn fallback(mut self, fallback: &'a str) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// Translator for one namespace, with an optional set of overrides.
///
/// Holds the bundle it was created with; later language changes in the
/// hosting service do not affect it. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct EnhancedTranslator {
    namespace: Arc<str>,
    bundle: Option<Arc<TranslationBundle>>,
    overrides: Option<Arc<Overrides>>,
}

impl EnhancedTranslator {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The bundle this translator resolves against, if any was loaded.
    pub fn bundle(&self) -> Option<&Arc<TranslationBundle>> {
        self.bundle.as_ref()
    }

    /// The raw template for `key`, falling back to `fallback` and then `key`.
    fn template<'s>(&'s self, key: &'s str, fallback: Option<&'s str>) -> &'s str {
        resolve_template(
            self.bundle.as_deref(),
            &self.namespace,
            key,
            self.overrides.as_deref(),
        )
        .or(fallback)
        .unwrap_or(key)
    }

    /// Translate `key` to plain text.
    pub fn t(&self, key: &str, vars: Option<&Vars>, fallback: Option<&str>) -> String {
        substitute(self.template(key, fallback), vars)
    }

    /// Translate `key` into text and component segments.
    pub fn trans<T: Clone>(&self, key: &str, options: TransOptions<'_, T>) -> Vec<Segment<T>> {
        let text = substitute(self.template(key, options.fallback), options.vars);
        render(&text, options.components)
    }
}

/// Build the rich translator for `namespace`.
pub fn create_enhanced_translator(
    namespace: &str,
    bundle: Option<Arc<TranslationBundle>>,
    overrides: Option<Overrides>,
) -> EnhancedTranslator {
    EnhancedTranslator {
        namespace: Arc::from(namespace),
        bundle,
        overrides: overrides.filter(|o| !o.is_empty()).map(Arc::new),
    }
}

/// Build a plain-text translator function for `namespace`.
///
/// The returned closure takes `(key, vars, fallback)`.
pub fn create_translator(
    namespace: &str,
    bundle: Option<Arc<TranslationBundle>>,
    overrides: Option<Overrides>,
) -> impl Fn(&str, Option<&Vars>, Option<&str>) -> String + Send + Sync + Clone {
    let translator = create_enhanced_translator(namespace, bundle, overrides);
    move |key, vars, fallback| translator.t(key, vars, fallback)
}
