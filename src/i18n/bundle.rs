//! Translation bundle: nested string data for one language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in a translation tree: either a leaf string or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Text(String),
    Map(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    /// An empty mapping node.
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// The leaf string, if this node is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Map(_) => None,
        }
    }

    /// The child mapping, if this node is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, TranslationNode>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Text(_) => None,
        }
    }

    /// Visit every leaf with its full dot-separated path, in key order.
    pub fn for_each_leaf<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &str),
    {
        fn walk<F: FnMut(&str, &str)>(node: &TranslationNode, prefix: &mut String, visit: &mut F) {
            match node {
                TranslationNode::Text(text) => visit(prefix, text),
                TranslationNode::Map(map) => {
                    for (key, child) in map {
                        let len = prefix.len();
                        if !prefix.is_empty() {
                            prefix.push('.');
                        }
                        prefix.push_str(key);
                        walk(child, prefix, visit);
                        prefix.truncate(len);
                    }
                }
            }
        }

        let mut prefix = String::new();
        walk(self, &mut prefix, &mut visit);
    }
}

impl From<&str> for TranslationNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The full translation data for one language.
///
/// Always rooted at a mapping. Treated as read-only once loaded and shared
/// between translators as `Arc<TranslationBundle>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, TranslationNode>", into = "BTreeMap<String, TranslationNode>")]
pub struct TranslationBundle {
    root: TranslationNode,
}

impl TranslationBundle {
    /// A bundle with no entries.
    pub fn empty() -> Self {
        Self {
            root: TranslationNode::empty_map(),
        }
    }

    /// Parse a bundle from JSON text.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build a bundle from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// The root mapping node.
    pub fn root(&self) -> &TranslationNode {
        &self.root
    }

    /// Returns `true` if the bundle has no top-level keys.
    pub fn is_empty(&self) -> bool {
        self.root.as_map().map_or(true, BTreeMap::is_empty)
    }
}

impl Default for TranslationBundle {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<String, TranslationNode>> for TranslationBundle {
    fn from(map: BTreeMap<String, TranslationNode>) -> Self {
        Self {
            root: TranslationNode::Map(map),
        }
    }
}

impl From<TranslationBundle> for BTreeMap<String, TranslationNode> {
    fn from(bundle: TranslationBundle) -> Self {
        match bundle.root {
            TranslationNode::Map(map) => map,
            TranslationNode::Text(_) => BTreeMap::new(),
        }
    }
}
