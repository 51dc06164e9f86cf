//! Preview a translation from the configured bundle source.
//!
//! Usage: i18n-preview <namespace> <key> [name=value ...]
//!
//! Reads `I18N_*` settings from the environment (or `.env`), prints the plain
//! translation and its component segments, and checks the active bundle
//! against the fallback language's bundle.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use web_ui_i18n::config::Config;
use web_ui_i18n::i18n::{
    component_keys, load_translations, BundleValidator, ComponentsMap, I18nService, Segment,
    TransOptions, TranslationBundle, ValidationReport, Vars,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("web_ui_i18n=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("Usage: i18n-preview <namespace> <key> [name=value ...]");
    }
    let namespace = &args[0];
    let key = &args[1];
    let vars = parse_vars(&args[2..])?;

    // Load configuration from environment
    let config = Config::from_env()?;
    let source = config.source.build_source()?;
    info!("Loading translations from {:?}", config.source);

    let service = I18nService::init(config.i18n_options(), source).await;
    let translator = service.translator(namespace, None);

    // Step 1: Plain translation
    let text = translator.t(key, Some(&vars), None);
    println!("t:     {}", text);

    // Step 2: Component segments, with every tag shown as [key: inner]
    let components = component_keys(&text)
        .into_iter()
        .fold(ComponentsMap::new(), |components, tag| {
            let label = tag.to_string();
            components.with_factory(tag, move |inner: &str| format!("[{}: {}]", label, inner))
        });
    let segments = translator.trans(key, TransOptions::new(&components).vars(&vars));
    let rendered: String = segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => text,
            Segment::Component(component) => component,
        })
        .collect();
    println!("trans: {}", rendered);

    // Step 3: Validate the active bundle against the fallback
    match (service.active_bundle(), service.fallback_language()) {
        (Some(active), Some(fallback)) => {
            let cache = service.cache().as_ref();
            let reference = load_translations(service.source().as_ref(), &fallback, Some(cache))
                .await
                .with_context(|| format!("No bundle for fallback language {}", fallback))?;
            match validate_against_fallback(&reference, &active) {
                None => info!("Active bundle is the {} bundle, skipping validation", fallback),
                Some(report) => {
                    for error in &report.errors {
                        warn!("{}", error);
                    }
                    for warning in &report.warnings {
                        warn!("{}", warning);
                    }
                    if report.is_clean() {
                        info!("Bundle for {} matches {}", service.current_language(), fallback);
                    }
                }
            }
        }
        (None, _) => warn!("No bundle loaded for {}", service.current_language()),
        (Some(_), None) => info!("No fallback language configured, skipping validation"),
    }

    // Step 4: Metrics
    let report = serde_json::to_string(&service.metrics_report())?;
    info!("Load metrics: {}", report);

    Ok(())
}

/// Validate the active bundle against the fallback bundle.
///
/// Returns `None` when the active bundle is the fallback bundle itself.
fn validate_against_fallback(
    reference: &Arc<TranslationBundle>,
    active: &Arc<TranslationBundle>,
) -> Option<ValidationReport> {
    if Arc::ptr_eq(reference, active) {
        return None;
    }
    Some(BundleValidator::validate(reference, active))
}

/// Parse `name=value` arguments into substitution variables.
fn parse_vars(args: &[String]) -> Result<Vars> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .with_context(|| format!("Expected name=value, got '{}'", arg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: serde_json::Value) -> Arc<TranslationBundle> {
        Arc::new(TranslationBundle::from_json_value(value).expect("valid bundle"))
    }

    #[test]
    fn test_validation_skipped_for_same_bundle() {
        let fallback = bundle(json!({"mfa": {"title": "Verify"}}));
        assert_eq!(validate_against_fallback(&fallback, &fallback.clone()), None);
    }

    #[test]
    fn test_validation_runs_for_distinct_bundles() {
        let fallback = bundle(json!({"mfa": {"title": "Verify"}}));
        let active = bundle(json!({"mfa": {}}));

        let report = validate_against_fallback(&fallback, &active).expect("should validate");
        assert_eq!(report.errors, vec!["Missing key: mfa.title".to_string()]);

        // Equal content in a separate allocation is still validated
        let copy = bundle(json!({"mfa": {"title": "Verify"}}));
        let report = validate_against_fallback(&fallback, &copy).expect("should validate");
        assert!(report.is_clean());
    }

    #[test]
    fn test_parse_vars() {
        let vars = parse_vars(&["name=Ada".to_string(), "count=3".to_string()]).expect("valid");
        assert_eq!(vars.get("name"), Some("Ada"));
        assert_eq!(vars.get("count"), Some("3"));
    }

    #[test]
    fn test_parse_vars_value_with_equals() {
        let vars = parse_vars(&["expr=a=b".to_string()]).expect("valid");
        assert_eq!(vars.get("expr"), Some("a=b"));
    }

    #[test]
    fn test_parse_vars_invalid() {
        assert!(parse_vars(&["oops".to_string()]).is_err());
    }
}
