//! Bundle validation.
//!
//! Compares a candidate bundle against a reference bundle (usually the
//! fallback language) and reports keys that went missing and translations
//! that lost or gained `${var}` placeholders or component tags.

use std::collections::BTreeMap;

use super::bundle::TranslationBundle;
use super::render::component_keys;
use super::substitute::placeholder_names;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys the candidate must have but does not
    pub errors: Vec<String>,

    /// Non-critical differences between the two bundles
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation bundles.
pub struct BundleValidator;

impl BundleValidator {
    /// Validate `candidate` against `reference`.
    ///
    /// This function checks that:
    /// - every reference leaf exists as a text leaf in the candidate (error)
    /// - the candidate has no leaves the reference lacks (warning)
    /// - each shared key uses the same `${var}` names, in any order (warning)
    /// - each shared key uses the same component tags in the same order (warning)
    pub fn validate(reference: &TranslationBundle, candidate: &TranslationBundle) -> ValidationReport {
        let mut report = ValidationReport::new();
        let reference = Self::leaves(reference);
        let candidate = Self::leaves(candidate);

        for (path, expected) in &reference {
            let Some(actual) = candidate.get(path) else {
                report.errors.push(format!("Missing key: {}", path));
                continue;
            };

            let mut expected_vars = placeholder_names(expected);
            let mut actual_vars = placeholder_names(actual);
            expected_vars.sort();
            actual_vars.sort();
            if expected_vars != actual_vars {
                report.warnings.push(format!(
                    "Placeholder mismatch in {}: reference has {:?}, candidate has {:?}",
                    path, expected_vars, actual_vars
                ));
            }

            let expected_tags = component_keys(expected);
            let actual_tags = component_keys(actual);
            if expected_tags != actual_tags {
                report.warnings.push(format!(
                    "Component tag mismatch in {}: reference has {:?}, candidate has {:?}",
                    path, expected_tags, actual_tags
                ));
            }
        }

        for path in candidate.keys().filter(|path| !reference.contains_key(*path)) {
            report.warnings.push(format!("Unexpected key: {}", path));
        }

        report
    }

    /// Every leaf of `bundle`, keyed by dotted path.
    fn leaves(bundle: &TranslationBundle) -> BTreeMap<String, String> {
        let mut leaves = BTreeMap::new();
        bundle.root().for_each_leaf(|path, text| {
            leaves.insert(path.to_string(), text.to_string());
        });
        leaves
    }
}
