//! Shared test utilities for the registry.
//!
//! Helpers for setting up in-memory stores and creating configs with minimal ceremony.

use crate::{
    core::{ConfigDraft, ConfigRegistry, RedactionPolicy, SeaOrmConfigStore},
    entities::{ConfigCategory, system_config},
    errors::Result,
};

/// Opens a store over an in-memory `SQLite` database with tables created.
pub async fn setup_test_store() -> Result<SeaOrmConfigStore> {
    SeaOrmConfigStore::open("sqlite::memory:").await
}

/// Registry over a fresh in-memory store with the default redaction policy.
pub async fn setup_test_registry() -> Result<ConfigRegistry<SeaOrmConfigStore>> {
    let store = setup_test_store().await?;
    Ok(ConfigRegistry::new(store, RedactionPolicy::default()))
}

/// Creates an active config through the registry.
pub async fn create_test_config(
    registry: &ConfigRegistry<SeaOrmConfigStore>,
    category: ConfigCategory,
    key: &str,
    value: &str,
) -> Result<system_config::Model> {
    registry
        .create(ConfigDraft::new(category, key).with_value(value))
        .await
}
