//! `${name}` variable substitution.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Pattern for a `${name}` placeholder; group 1 is the variable name.
pub const VAR_PATTERN: &str = r"\$\{(\w+)\}";

static VAR_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn var_regex() -> &'static Regex {
    VAR_REGEX.get_or_init(|| Regex::new(VAR_PATTERN).expect("VAR_PATTERN is a valid regex"))
}

/// Placeholder values supplied per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: HashMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, stringified with `Display`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Builder-style [`Vars::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

/// Replace every `${name}` in `template` whose name is defined in `vars`.
///
/// Undefined placeholders stay verbatim. Single pass: substituted text is
/// never re-scanned.
pub fn substitute(template: &str, vars: Option<&Vars>) -> String {
    let Some(vars) = vars.filter(|vars| !vars.is_empty()) else {
        return template.to_string();
    };

    var_regex()
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all `${name}` placeholders in `template`, in order of appearance.
pub fn placeholder_names(template: &str) -> Vec<String> {
    var_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_substitute_single_var() {
        let vars = Vars::new().with("name", "World");
        assert_eq!(substitute("Hello ${name}!", Some(&vars)), "Hello World!");
    }

    #[test]
    fn test_substitute_no_placeholders_unchanged() {
        let vars = Vars::new().with("name", "World");
        assert_eq!(substitute("No vars", Some(&vars)), "No vars");
    }

    #[test]
    fn test_substitute_missing_var_left_verbatim() {
        assert_eq!(substitute("Hi ${missing}", Some(&Vars::new())), "Hi ${missing}");
    }

    #[test]
    fn test_substitute_without_vars() {
        assert_eq!(substitute("Hi ${name}", None), "Hi ${name}");
    }

    #[test]
    fn test_substitute_mixed_defined_and_missing() {
        let vars = Vars::new().with("a", 1);
        assert_eq!(
            substitute("${a} and ${b} and ${a}", Some(&vars)),
            "1 and ${b} and 1"
        );
    }

    #[test]
    fn test_substitute_stringifies_values() {
        let vars = Vars::new().with("count", 3).with("ok", true).with("ratio", 0.5);
        assert_eq!(
            substitute("${count}/${ok}/${ratio}", Some(&vars)),
            "3/true/0.5"
        );
    }

    #[test]
    fn test_substitute_is_single_pass() {
        let vars = Vars::new().with("a", "${b}").with("b", "nope");
        assert_eq!(substitute("${a}", Some(&vars)), "${b}");
    }

    #[test]
    fn test_substitute_ignores_non_word_names() {
        let vars = Vars::new().with("first-name", "Ada");
        assert_eq!(substitute("${first-name}", Some(&vars)), "${first-name}");
    }

    #[test]
    fn test_substitute_ignores_other_brace_styles() {
        let vars = Vars::new().with("name", "Ada");
        assert_eq!(
            substitute("{name} $name ${ name }", Some(&vars)),
            "{name} $name ${ name }"
        );
    }

    #[test]
    fn test_substitute_adjacent_placeholders() {
        let vars = Vars::new().with("a", "x").with("b", "y");
        assert_eq!(substitute("${a}${b}", Some(&vars)), "xy");
    }

    #[test]
    fn test_vars_from_iterator() {
        let vars: Vars = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(vars.get("a"), Some("1"));
        assert_eq!(vars.get("b"), Some("2"));
        assert_eq!(vars.get("c"), None);
    }

    #[test]
    fn test_placeholder_names() {
        assert_eq!(
            placeholder_names("${a} ${b} ${a} {c}"),
            vec!["a".to_string(), "b".to_string(), "a".to_string()]
        );
        assert!(placeholder_names("plain").is_empty());
    }

    proptest! {
        #[test]
        fn prop_text_without_placeholders_is_unchanged(text in "[^$]{0,40}") {
            let vars = Vars::new().with("name", "value");
            prop_assert_eq!(substitute(&text, Some(&vars)), text);
        }

        #[test]
        fn prop_defined_var_is_substituted(
            prefix in "[a-z ]{0,10}",
            value in "[A-Za-z0-9 ]{0,10}",
            suffix in "[a-z ]{0,10}",
        ) {
            let vars = Vars::new().with("v", &value);
            let template = format!("{}${{v}}{}", prefix, suffix);
            prop_assert_eq!(
                substitute(&template, Some(&vars)),
                format!("{}{}{}", prefix, value, suffix)
            );
        }
    }
}
