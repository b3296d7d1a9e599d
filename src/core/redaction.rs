//! Display-time redaction of secret-looking config values.
//!
//! Sensitivity is decided by substring matching on the key name. This is a heuristic:
//! a secret stored under an innocuous key (`MPESA_PIN`) is shown in clear, and a harmless
//! key that happens to contain a marker (`MONKEY_URL`) is masked. Extend the marker list
//! through settings when the naming conventions of a deployment call for it.

use crate::entities::system_config;

/// Mask shown in place of a sensitive value.
pub const DEFAULT_MASK: &str = "••••••••••••••";

/// Key substrings that mark a value as sensitive, matched case-insensitively.
pub const DEFAULT_SENSITIVE_MARKERS: [&str; 3] = ["KEY", "SECRET", "PASSWORD"];

/// Which keys get their values masked, and what the mask looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPolicy {
    markers: Vec<String>,
    mask: String,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_MARKERS, DEFAULT_MASK)
    }
}

impl RedactionPolicy {
    /// Builds a policy from marker substrings (blank markers are ignored) and a mask.
    pub fn new<I, M>(markers: I, mask: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = M>,
        M: AsRef<str>,
    {
        let mut policy = Self {
            markers: Vec::new(),
            mask: mask.into(),
        };
        for marker in markers {
            policy.push_marker(marker.as_ref());
        }
        policy
    }

    /// Adds one more sensitive marker.
    #[must_use]
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.push_marker(marker);
        self
    }

    fn push_marker(&mut self, marker: &str) {
        let marker = marker.trim().to_uppercase();
        if !marker.is_empty() && !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
    }

    /// Uppercased markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// The replacement text for sensitive values.
    #[must_use]
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Whether a key contains any marker, ignoring case.
    #[must_use]
    pub fn is_sensitive(&self, key: &str) -> bool {
        let key = key.to_uppercase();
        self.markers.iter().any(|marker| key.contains(marker.as_str()))
    }

    /// Copy of `config` with its value masked if the key is sensitive.
    /// The input, and therefore the stored record, is left untouched.
    #[must_use]
    pub fn redact(&self, config: &system_config::Model) -> system_config::Model {
        let mut shown = config.clone();
        if self.is_sensitive(&config.key) {
            shown.value.clone_from(&self.mask);
        }
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ConfigCategory;
    use sea_orm::prelude::Uuid;

    fn config(key: &str, value: &str) -> system_config::Model {
        system_config::Model {
            id: Uuid::new_v4(),
            category: ConfigCategory::ApiIntegration,
            key: key.to_string(),
            value: value.to_string(),
            description: None,
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_default_mask_is_fourteen_bullets() {
        assert_eq!(DEFAULT_MASK.chars().count(), 14);
        assert!(DEFAULT_MASK.chars().all(|c| c == '•'));
    }

    #[test]
    fn test_masks_iff_key_contains_marker() {
        let policy = RedactionPolicy::default();
        let cases = [
            ("MPESA_API_KEY", true),
            ("jwt_secret", true),
            ("DB_Password", true),
            ("SMTP_PASSWORD_HINT", true),
            ("DB_URL", false),
            ("MPESA_BASE_URL", false),
            ("SERVICE_PROVIDER_CODE", false),
        ];

        for (key, sensitive) in cases {
            let original = config(key, "plain");
            let shown = policy.redact(&original);
            assert_eq!(policy.is_sensitive(key), sensitive, "key {key}");
            if sensitive {
                assert_eq!(shown.value, DEFAULT_MASK);
                assert_eq!(original.value, "plain");
            } else {
                assert_eq!(shown, original);
            }
        }
    }

    #[test]
    fn test_custom_markers_extend_policy() {
        let policy = RedactionPolicy::default().with_marker("token").with_marker("  ");
        assert_eq!(policy.markers(), ["KEY", "SECRET", "PASSWORD", "TOKEN"]);
        assert!(policy.is_sensitive("GITHUB_TOKEN"));

        let policy = RedactionPolicy::new(["pin"], "***");
        assert!(policy.is_sensitive("MPESA_PIN"));
        assert!(!policy.is_sensitive("MPESA_API_KEY"));
        assert_eq!(policy.redact(&config("MPESA_PIN", "1234")).value, "***");
    }
}
