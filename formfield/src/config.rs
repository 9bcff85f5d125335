//! Field registry configuration: markup vocabulary and error message templates.

use std::collections::HashMap;

use formdom::{ValidityFlag, ValidityState};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FormError;

/// Placeholder substituted with the field's label text.
pub const FIELD_NAME_PLACEHOLDER: &str = "{fieldName}";

/// Class and tag names a registry looks for and applies.
///
/// Loadable from JSON; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Class on the label while the field is focused or filled.
    pub active_label_class: String,
    /// Tag of the label element preceding the input.
    pub label_tag: String,
    /// Class of the reset control following the input.
    pub reset_class: String,
    /// Class of the form-field container enclosing the input.
    pub container_class: String,
    /// Class of the wrapper marking two containers as a linked pair.
    pub linked_class: String,

    /// Class on the input while it shows an error.
    pub error_class: String,
    /// Class of the inline error block appended to the container.
    pub error_container_class: String,
    pub error_text_classes: Vec<String>,
    pub error_icon_classes: Vec<String>,
    pub error_inner_text_class: String,

    pub messages: ErrorMessages,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            active_label_class: "field-label--active".to_string(),
            label_tag: "span".to_string(),
            reset_class: "field-reset".to_string(),
            container_class: "field-container".to_string(),
            linked_class: "linked-fields".to_string(),
            error_class: "field--error".to_string(),
            error_container_class: "field-error".to_string(),
            error_text_classes: vec![
                "field-error__text".to_string(),
                "field-error__text--invalid".to_string(),
            ],
            error_icon_classes: vec![
                "icon".to_string(),
                "icon-attention".to_string(),
                "icon--size-m".to_string(),
            ],
            error_inner_text_class: "icon-inner-text".to_string(),
            messages: ErrorMessages::default(),
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn active_label_class(mut self, class: impl Into<String>) -> Self {
        self.active_label_class = class.into();
        self
    }

    pub fn label_tag(mut self, tag: impl Into<String>) -> Self {
        self.label_tag = tag.into();
        self
    }

    pub fn container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    pub fn linked_class(mut self, class: impl Into<String>) -> Self {
        self.linked_class = class.into();
        self
    }

    pub fn reset_class(mut self, class: impl Into<String>) -> Self {
        self.reset_class = class.into();
        self
    }

    pub fn messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Error message templates keyed by validity flag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    /// Used when no set flag has a template of its own.
    pub default: String,
    /// Templates keyed by flag name (`valueMissing`, `patternMismatch`, ...).
    ///
    /// When loaded from JSON, entries are merged over the default table.
    #[serde(deserialize_with = "merge_default_flags")]
    pub flags: HashMap<String, String>,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::empty(r#""{fieldName}" is not valid"#)
            .with(ValidityFlag::ValueMissing, "Please fill in: {fieldName}")
            .with(
                ValidityFlag::PatternMismatch,
                r#"Please fill in "{fieldName}" in the expected format"#,
            )
    }
}

fn merge_default_flags<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut flags = ErrorMessages::default().flags;
    flags.extend(HashMap::<String, String>::deserialize(deserializer)?);
    Ok(flags)
}

impl ErrorMessages {
    /// A table with only a default template.
    pub fn empty(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            flags: HashMap::new(),
        }
    }

    /// Register (or replace) the template for a flag.
    pub fn with(mut self, flag: ValidityFlag, template: impl Into<String>) -> Self {
        self.flags.insert(flag.as_str().to_string(), template.into());
        self
    }

    pub fn get(&self, flag: ValidityFlag) -> Option<&str> {
        self.flags.get(flag.as_str()).map(String::as_str)
    }

    /// Pick the template for a validity state: the first set flag, in
    /// priority order, that has a template, else the default.
    pub fn select(&self, validity: &ValidityState) -> &str {
        validity
            .flags()
            .filter(|(_, set)| *set)
            .find_map(|(flag, _)| self.get(flag))
            .unwrap_or(self.default.as_str())
    }
}

/// Substitute the field name into a template.
///
/// Only the first placeholder is substituted. The label's trailing required
/// marker (`*`) is not part of the name.
pub fn format_error_message(template: &str, label_text: &str) -> String {
    let trimmed = label_text.trim_end();
    let name = trimmed.strip_suffix('*').unwrap_or(trimmed).trim_end();
    template.replacen(FIELD_NAME_PLACEHOLDER, name, 1)
}
