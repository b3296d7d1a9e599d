//! Config validation - checks run before any create or update reaches the store.
//!
//! [`validate_draft`] is pure. [`ensure_key_available`] is the create-time duplicate
//! lookup; it is a fast path for a readable error only, since two concurrent creates can
//! both pass it. The UNIQUE constraint on `system_configs.key` is the real guard.

use super::{
    draft::{ConfigDraft, ValidConfig},
    store::ConfigStore,
};
use crate::errors::{Error, Result};
use tracing::debug;

/// Normalizes a key: surrounding whitespace dropped, every whitespace run replaced by a
/// single underscore, letters uppercased.
///
/// `"mpesa api key"` becomes `"MPESA_API_KEY"`.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Checks required fields and applies defaults.
///
/// # Errors
/// Returns [`Error::Validation`] when the category is missing or the key is empty after
/// normalization.
pub fn validate_draft(draft: &ConfigDraft) -> Result<ValidConfig> {
    let category = draft
        .category
        .ok_or_else(|| Error::validation("Category is required"))?;

    let key = normalize_key(&draft.key);
    if key.is_empty() {
        return Err(Error::validation("Key is required"));
    }

    let description = draft
        .description
        .as_ref()
        .filter(|d| !d.trim().is_empty())
        .cloned();

    Ok(ValidConfig {
        category,
        key,
        value: draft.value.clone().unwrap_or_default(),
        description,
        is_active: draft.is_active.unwrap_or(true),
    })
}

/// Rejects a normalized key that is already stored.
///
/// # Errors
/// Returns [`Error::DuplicateKey`] if a row with this key exists, or the store error if
/// the lookup fails.
pub async fn ensure_key_available<S: ConfigStore>(store: &S, key: &str) -> Result<()> {
    if let Some(existing) = store.find_by_key(key).await? {
        debug!("Key '{}' already used by config {}", key, existing.id);
        return Err(Error::DuplicateKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ConfigCategory;
    use crate::test_utils::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("mpesa api key"), "MPESA_API_KEY");
        assert_eq!(normalize_key("  db   url\t"), "DB_URL");
        assert_eq!(normalize_key("Already_OK"), "ALREADY_OK");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let draft = ConfigDraft {
            key: "DB_URL".to_string(),
            ..ConfigDraft::default()
        };
        let result = validate_draft(&draft);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let draft = ConfigDraft::new(ConfigCategory::Database, " \t ");
        let result = validate_draft(&draft);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_defaults_are_applied() {
        let valid =
            validate_draft(&ConfigDraft::new(ConfigCategory::ApiIntegration, "maps url")).unwrap();
        assert_eq!(valid.key, "MAPS_URL");
        assert_eq!(valid.value, "");
        assert_eq!(valid.description, None);
        assert!(valid.is_active);
    }

    #[test]
    fn test_blank_description_becomes_none_and_others_are_kept() {
        let draft = ConfigDraft::new(ConfigCategory::Database, "DB_URL").with_description("   ");
        assert_eq!(validate_draft(&draft).unwrap().description, None);

        let draft = ConfigDraft::new(ConfigCategory::Database, "DB_URL")
            .with_description(" Primary DSN ");
        assert_eq!(
            validate_draft(&draft).unwrap().description.as_deref(),
            Some(" Primary DSN ")
        );
    }

    #[tokio::test]
    async fn test_ensure_key_available() -> Result<()> {
        let registry = setup_test_registry().await?;
        create_test_config(&registry, ConfigCategory::Database, "DB_URL", "postgres://x").await?;

        let result = ensure_key_available(registry.store(), "DB_URL").await;
        assert!(matches!(result, Err(Error::DuplicateKey { key }) if key == "DB_URL"));

        ensure_key_available(registry.store(), "DB_REPLICA_URL").await?;
        Ok(())
    }
}
