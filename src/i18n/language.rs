//! Language type: passthrough language code used to select a bundle.
//!
//! Codes are not validated against any registry. Whatever the host passes
//! (e.g. "en-US", "es-ES", "fr") is used verbatim, after trimming whitespace,
//! as the identity of a translation bundle.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A language code selecting a translation bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Default language used when the host does not configure one.
    pub const DEFAULT: &'static str = "en-US";

    /// Create a language code from any string-like value.
    ///
    /// Surrounding whitespace is trimmed; nothing else is checked.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the code can be used as a file name or URL path
    /// segment without leaving the bundle directory or base URL.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && !self.0.contains("..")
            && !self.0.contains(['/', '\\', '?', '#', '%'])
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&String> for LanguageCode {
    fn from(code: &String) -> Self {
        Self::new(code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}
