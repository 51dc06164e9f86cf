//! Component-safe rendering of `<key>text</key>` markers.
//!
//! A resolved template is split into plain text and opaque component values
//! produced by the caller. Nothing is ever parsed as HTML: the only markup
//! recognised is a paired `<key>inner</key>` tag (key made of word
//! characters, inner text free of `<` and `>`) or a self-closing `<key/>`.
//!
//! The scan is linear and non-recursive. Nested tags are not supported: an
//! outer tag whose inner text contains another tag does not match, so only
//! the innermost tag is rendered and the outer markers stay as plain text.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

/// Pattern for a component marker.
///
/// Groups 1-3 are the opening key, inner text and closing key of a paired
/// tag; group 4 is the key of a self-closing tag. The `regex` crate has no
/// backreferences, so matching opening and closing keys is checked in code.
pub const COMPONENT_PATTERN: &str = r"<(\w+)>([^<>]*?)</(\w+)>|<(\w+)\s*/>";

static COMPONENT_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn component_regex() -> &'static Regex {
    COMPONENT_REGEX
        .get_or_init(|| Regex::new(COMPONENT_PATTERN).expect("COMPONENT_PATTERN is a valid regex"))
}

type Factory<T> = Box<dyn Fn(&str) -> T + Send + Sync>;

/// What to render for a tag key.
pub enum Component<T> {
    /// A pre-built value, reused as-is for every occurrence. The tag's inner
    /// text is not passed to it.
    Value(T),
    /// Builds a value from the tag's inner text.
    Factory(Factory<T>),
}

impl<T> Component<T> {
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        Self::Factory(Box::new(factory))
    }
}

impl<T: fmt::Debug> fmt::Debug for Component<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Components available to one `trans` call, keyed by tag key.
pub struct ComponentsMap<T> {
    components: HashMap<String, Component<T>>,
}

impl<T> ComponentsMap<T> {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, component: Component<T>) {
        self.components.insert(key.into(), component);
    }

    /// Register a pre-built value for `key`.
    pub fn with_value(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, Component::Value(value));
        self
    }

    /// Register a factory for `key`.
    pub fn with_factory<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.insert(key, Component::factory(factory));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Component<T>> {
        self.components.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<T> Default for ComponentsMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ComponentsMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.components.iter()).finish()
    }
}

/// One piece of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<T> {
    Text(String),
    Component(T),
}

impl<T> Segment<T> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Component(_) => None,
        }
    }
}

/// A tag found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub key: &'t str,
    /// `None` for a self-closing tag.
    pub inner: Option<&'t str>,
}

impl TagMatch<'_> {
    fn from_captures<'t>(caps: &Captures<'t>) -> Option<TagMatch<'t>> {
        let whole = caps.get(0)?;
        if let Some(key) = caps.get(4) {
            return Some(TagMatch {
                start: whole.start(),
                end: whole.end(),
                key: key.as_str(),
                inner: None,
            });
        }

        let open = caps.get(1)?.as_str();
        let close = caps.get(3)?.as_str();
        if open != close {
            return None;
        }
        Some(TagMatch {
            start: whole.start(),
            end: whole.end(),
            key: open,
            inner: Some(caps.get(2).map_or("", |m| m.as_str())),
        })
    }
}

/// Every well-formed tag in `template`, left to right.
pub(crate) fn scan_tags(template: &str) -> Vec<TagMatch<'_>> {
    let regex = component_regex();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(caps) = regex.captures_at(template, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        match TagMatch::from_captures(&caps) {
            Some(tag) => {
                pos = tag.end;
                tags.push(tag);
            }
            // Mismatched keys: retry just past this `<`
            None => pos = whole.start() + 1,
        }
        if pos >= template.len() {
            break;
        }
    }

    tags
}

/// Keys of every well-formed tag in `template`, left to right.
pub fn component_keys(template: &str) -> Vec<&str> {
    scan_tags(template).into_iter().map(|tag| tag.key).collect()
}

/// Split `template` into text and component segments.
///
/// Unknown paired tags degrade to their inner text; unknown self-closing tags
/// are kept as literal text. A template without tags yields exactly one text
/// segment holding the whole template.
pub fn render<T: Clone>(template: &str, components: &ComponentsMap<T>) -> Vec<Segment<T>> {
    let tags = scan_tags(template);
    if tags.is_empty() {
        return vec![Segment::Text(template.to_string())];
    }

    let mut segments = Vec::with_capacity(tags.len() * 2 + 1);
    let mut cursor = 0;

    for tag in tags {
        if tag.start > cursor {
            segments.push(Segment::Text(template[cursor..tag.start].to_string()));
        }

        let children = tag.inner.unwrap_or("");
        let segment = match components.get(tag.key) {
            Some(Component::Factory(factory)) => Segment::Component(factory(children)),
            Some(Component::Value(value)) => Segment::Component(value.clone()),
            None => {
                debug!(key = tag.key, "No component registered for tag, rendering as text");
                match tag.inner {
                    Some(inner) => Segment::Text(inner.to_string()),
                    None => Segment::Text(template[tag.start..tag.end].to_string()),
                }
            }
        };
        segments.push(segment);
        cursor = tag.end;
    }

    if cursor < template.len() {
        segments.push(Segment::Text(template[cursor..].to_string()));
    }

    segments
}
