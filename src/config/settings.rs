//! Registry settings loaded from a TOML file.
//!
//! Every section is optional. A missing file means defaults; a file that exists but
//! cannot be read or parsed is a configuration error.
//!
//! ```toml
//! [database]
//! url = "sqlite://consult_registry.sqlite?mode=rwc"
//!
//! [redaction]
//! mask = "••••••••••••••"
//! markers = ["KEY", "SECRET", "PASSWORD", "TOKEN"]
//!
//! [[seed]]
//! category = "payment_c2b"
//! key = "MPESA_BASE_URL"
//! value = "https://api.sandbox.vm.co.mz:18352"
//! ```

use super::database::{DEFAULT_DATABASE_URL, database_url_from_env};
use crate::{
    core::{
        ConfigDraft, RedactionPolicy,
        redaction::{DEFAULT_MASK, DEFAULT_SENSITIVE_MARKERS},
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "registry.toml";

/// Whole settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backing store connection
    pub database: DatabaseSettings,
    /// Secret masking policy
    pub redaction: RedactionSettings,
    /// Configs created at start-up when their key is absent
    pub seed: Vec<ConfigDraft>,
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL understood by `SeaORM`
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// `[redaction]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedactionSettings {
    /// Text shown instead of a sensitive value
    pub mask: String,
    /// Key substrings marking a value as sensitive (case-insensitive)
    pub markers: Vec<String>,
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            mask: DEFAULT_MASK.to_string(),
            markers: DEFAULT_SENSITIVE_MARKERS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Replaces the database URL when an override is given.
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            debug!("Database URL overridden from environment");
            self.database.url = url;
        }
        self
    }

    /// Checks values that deserialization alone cannot.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(Error::Config {
                message: "database.url cannot be empty".to_string(),
            });
        }
        if self.redaction.mask.is_empty() {
            return Err(Error::Config {
                message: "redaction.mask cannot be empty".to_string(),
            });
        }
        if self.redaction.markers.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::Config {
                message: "redaction.markers cannot contain blank entries".to_string(),
            });
        }
        Ok(())
    }

    /// Redaction policy described by the `[redaction]` section.
    #[must_use]
    pub fn redaction_policy(&self) -> RedactionPolicy {
        RedactionPolicy::new(&self.redaction.markers, self.redaction.mask.clone())
    }
}

/// Loads settings from `path`.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, is not valid TOML, or fails
/// validation.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    debug!("Loading settings from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path.display()),
    })?;
    Settings::from_toml(&contents)
}

/// Loads settings from `path`, or defaults when the file does not exist.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if path.exists() {
        load_settings(path)
    } else {
        info!("No settings file at {}, using defaults", path.display());
        Ok(Settings::default())
    }
}

/// Loads the application settings: file from `REGISTRY_CONFIG` (or `registry.toml`),
/// then `DATABASE_URL` applied on top.
pub fn load_app_settings() -> Result<Settings> {
    let path =
        std::env::var("REGISTRY_CONFIG").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let settings = load_settings_or_default(&path)?.with_database_url(database_url_from_env());
    settings.validate()?;
    Ok(settings)
}
