//! Drafts - caller-supplied, not-yet-persisted configs.
//!
//! A [`ConfigDraft`] is what the console submits for create and update. The validator
//! turns it into a [`ValidConfig`], which is the only shape the store adapter accepts.

use crate::entities::{ConfigCategory, system_config};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Config as entered by the operator, before validation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDraft {
    /// Target category; required
    pub category: Option<ConfigCategory>,
    /// Raw key as typed; normalized before comparison and persistence
    #[serde(default)]
    pub key: String,
    /// Payload; empty string when omitted
    pub value: Option<String>,
    /// Optional annotation
    pub description: Option<String>,
    /// Lifecycle flag; active when omitted
    pub is_active: Option<bool>,
}

impl ConfigDraft {
    /// Creates a draft with the two mandatory fields set.
    #[must_use]
    pub fn new(category: ConfigCategory, key: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the value payload.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lifecycle flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Prefills an edit form from a persisted record.
    #[must_use]
    pub fn from_model(model: &system_config::Model) -> Self {
        Self {
            category: Some(model.category),
            key: model.key.clone(),
            value: Some(model.value.clone()),
            description: model.description.clone(),
            is_active: Some(model.is_active),
        }
    }
}

// Values are frequently secrets; keep them out of debug output and traces.
impl fmt::Debug for ConfigDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDraft")
            .field("category", &self.category)
            .field("key", &self.key)
            .field("value", &self.value.as_ref().map(|_| "<hidden>"))
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// A draft that passed validation: key normalized, defaults applied.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidConfig {
    /// Recognized category
    pub category: ConfigCategory,
    /// Normalized, non-empty key
    pub key: String,
    /// Payload, possibly empty
    pub value: String,
    /// Annotation as entered, `None` when blank
    pub description: Option<String>,
    /// Lifecycle flag
    pub is_active: bool,
}

impl fmt::Debug for ValidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidConfig")
            .field("category", &self.category)
            .field("key", &self.key)
            .field("value", &"<hidden>")
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .finish()
    }
}
