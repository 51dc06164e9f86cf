//! Per-translator overrides that take precedence over the loaded bundle.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use super::bundle::TranslationNode;

/// Translation overrides for one translator instance.
///
/// Keys are relative to the translator's namespace. Both nested maps and
/// dotted flat keys (`"sms.title"`) are accepted; dotted keys are expanded
/// into nested maps so lookups always use the nested-path algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TranslationNode")]
pub struct Overrides {
    root: TranslationNode,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            root: TranslationNode::empty_map(),
        }
    }
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `path` to `value`, creating intermediate maps as needed.
    ///
    /// A leaf sitting where a map is needed is replaced by the map, and a map
    /// sitting at `path` is replaced by the leaf. So in a JSON object holding
    /// both `"sms"` and `"sms.title"`, the flat `"sms"` string is dropped:
    /// keys are applied in sorted order and `"sms.title"` comes last.
    pub fn set(&mut self, path: &str, value: impl Into<String>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let TranslationNode::Map(root) = &mut self.root else {
            return;
        };
        let mut current = root;
        for segment in segments {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(TranslationNode::empty_map);
            if let Some(text) = entry.as_text() {
                debug!(path, segment, replaced = text, "Override leaf replaced by nested overrides");
                *entry = TranslationNode::empty_map();
            }
            let TranslationNode::Map(map) = entry else {
                return;
            };
            current = map;
        }
        let previous = current.insert(last.to_string(), TranslationNode::Text(value.into()));
        if matches!(previous, Some(TranslationNode::Map(_))) {
            debug!(path, "Nested overrides replaced by a leaf");
        }
    }

    /// Builder-style [`Overrides::set`].
    pub fn with(mut self, path: &str, value: impl Into<String>) -> Self {
        self.set(path, value);
        self
    }

    /// Parse overrides from a JSON object (nested, flat-dotted or mixed).
    pub fn from_json_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        self.root.as_map().map_or(true, BTreeMap::is_empty)
    }

    /// The expanded override tree, always a mapping.
    pub fn root(&self) -> &TranslationNode {
        &self.root
    }
}

impl From<TranslationNode> for Overrides {
    fn from(node: TranslationNode) -> Self {
        let mut overrides = Self::new();
        node.for_each_leaf(|path, text| {
            // A bare string at the root has no key to live under
            if !path.is_empty() {
                overrides.set(path, text);
            }
        });
        overrides
    }
}

impl<K, V> FromIterator<(K, V)> for Overrides
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (path, value) in iter {
            overrides.set(path.as_ref(), value);
        }
        overrides
    }
}
