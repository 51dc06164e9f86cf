//! Dot-notation key resolution against bundles and overrides.

use super::bundle::{TranslationBundle, TranslationNode};
use super::overrides::Overrides;

/// Walk `path` (split on `.`) through nested maps starting at `node`.
///
/// Returns `None` at the first missing segment, or when a leaf string is
/// reached before the path is exhausted. An empty path returns `node`.
pub fn get_nested_value<'a>(node: &'a TranslationNode, path: &str) -> Option<&'a TranslationNode> {
    if path.is_empty() {
        return Some(node);
    }

    path.split('.')
        .try_fold(node, |current, segment| current.as_map()?.get(segment))
}

/// Effective bundle lookup path for `key` inside `namespace`.
pub fn namespaced_key(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", namespace, key)
    }
}

/// Resolve the raw template string for `key`.
///
/// Overrides are consulted first with the unnamespaced key, then the bundle
/// with the namespaced key. Only leaf strings count; a key naming a sub-tree
/// resolves to `None`.
pub fn resolve_template<'a>(
    bundle: Option<&'a TranslationBundle>,
    namespace: &str,
    key: &str,
    overrides: Option<&'a Overrides>,
) -> Option<&'a str> {
    let from_overrides = overrides
        .and_then(|overrides| get_nested_value(overrides.root(), key))
        .and_then(TranslationNode::as_text);
    if from_overrides.is_some() {
        return from_overrides;
    }

    bundle
        .and_then(|bundle| get_nested_value(bundle.root(), &namespaced_key(namespace, key)))
        .and_then(TranslationNode::as_text)
}
