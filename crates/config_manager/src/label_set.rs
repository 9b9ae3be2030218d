//! Declared label definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "label_set_tests.rs"]
mod tests;

/// Color given to labels that don't declare one.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

/// A label that should exist in every target repository.
///
/// # Example JSON
///
/// ```json
/// {"name": "bug", "color": "d73a4a", "description": "Something isn't working"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDefinition {
    /// Label name. Unique within a label set.
    pub name: String,

    /// Label color (hex code without #).
    #[serde(default = "default_color")]
    pub color: String,

    /// Label description.
    #[serde(default)]
    pub description: String,
}

fn default_color() -> String {
    DEFAULT_LABEL_COLOR.to_string()
}

impl LabelDefinition {
    /// Creates a definition with the default color and an empty description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: default_color(),
            description: String::new(),
        }
    }
}

/// The label set document: `{"labels": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub labels: Vec<LabelDefinition>,
}

impl LabelSet {
    /// Checks the rules serde can't express.
    ///
    /// # Validation Rules
    /// - Names are non-empty and unique
    /// - Colors are exactly six hexadecimal digits
    ///
    /// # Errors
    /// Returns `ConfigurationError::SchemaError` naming the first offending field.
    pub fn validate(&self, source: &str) -> ConfigurationResult<()> {
        let mut seen = HashSet::new();

        for (index, label) in self.labels.iter().enumerate() {
            if label.name.trim().is_empty() {
                return Err(ConfigurationError::schema(
                    source,
                    format!("labels[{}].name", index),
                    "label name must not be empty",
                ));
            }

            if !seen.insert(label.name.as_str()) {
                return Err(ConfigurationError::schema(
                    source,
                    format!("labels[{}].name", index),
                    format!("duplicate label name '{}'", label.name),
                ));
            }

            if !is_hex_color(&label.color) {
                return Err(ConfigurationError::schema(
                    source,
                    format!("labels[{}].color", index),
                    format!(
                        "'{}' is not a six digit hex color (omit the leading '#')",
                        label.color
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns true if a label with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit())
}
