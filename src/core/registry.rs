//! Config registry service - the public face of the registry.
//!
//! Orchestrates validation and store calls. Reads come back unredacted; callers that
//! render values for an operator go through [`ConfigRegistry::redact_for_display`].

use super::{
    draft::ConfigDraft,
    redaction::RedactionPolicy,
    store::{ConfigStore, DeleteOutcome},
    validator::{ensure_key_available, normalize_key, validate_draft},
};
use crate::{
    entities::{ConfigCategory, system_config},
    errors::{Error, Result},
};
use sea_orm::prelude::Uuid;
use tracing::{debug, info, instrument, warn};

/// Stateless CRUD facade over an injected [`ConfigStore`].
#[derive(Debug)]
pub struct ConfigRegistry<S> {
    store: S,
    redaction: RedactionPolicy,
}

impl<S: ConfigStore> ConfigRegistry<S> {
    /// Creates a registry over `store`, masking values according to `redaction`.
    #[must_use]
    pub const fn new(store: S, redaction: RedactionPolicy) -> Self {
        Self { store, redaction }
    }

    /// The injected store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back, so the owner can close it at shutdown.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// The active redaction policy.
    #[must_use]
    pub const fn redaction(&self) -> &RedactionPolicy {
        &self.redaction
    }

    /// All configs, ordered by category.
    pub async fn list_all(&self) -> Result<Vec<system_config::Model>> {
        self.store.list().await
    }

    /// Configs whose category satisfies `filter`, in store order.
    ///
    /// Pass [`ConsoleTab::includes`](super::ConsoleTab::includes) to reproduce a console tab.
    pub async fn list_by_category<F>(&self, filter: F) -> Result<Vec<system_config::Model>>
    where
        F: Fn(ConfigCategory) -> bool,
    {
        let mut configs = self.store.list().await?;
        configs.retain(|config| filter(config.category));
        Ok(configs)
    }

    /// Read path for display: a store failure is logged and yields an empty list.
    pub async fn list_or_empty<F>(&self, filter: F) -> Vec<system_config::Model>
    where
        F: Fn(ConfigCategory) -> bool,
    {
        match self.list_by_category(filter).await {
            Ok(configs) => {
                if configs.is_empty() {
                    debug!("No configs match the requested categories");
                }
                configs
            }
            Err(e @ Error::StoreUnavailable { .. }) => {
                warn!("Config store unavailable, showing no configs: {}", e);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to list configs, showing none: {}", e);
                Vec::new()
            }
        }
    }

    /// One config by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no row has this id.
    pub async fn get(&self, id: Uuid) -> Result<system_config::Model> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    /// Validates and persists a new config.
    ///
    /// # Errors
    /// - [`Error::Validation`] for a missing category or empty key
    /// - [`Error::DuplicateKey`] if the normalized key is taken, whether caught by the
    ///   pre-check or by the storage constraint during a concurrent create
    #[instrument(skip(self))]
    pub async fn create(&self, draft: ConfigDraft) -> Result<system_config::Model> {
        let config = validate_draft(&draft)?;
        ensure_key_available(&self.store, &config.key).await?;
        let created = self.store.insert(config).await?;
        info!(
            "Created config '{}' in {}",
            created.key,
            created.category.as_str()
        );
        Ok(created)
    }

    /// Replaces the fields of an existing config.
    ///
    /// The row's own key never counts as a duplicate; moving to a key held by another row
    /// is rejected.
    ///
    /// # Errors
    /// [`Error::Validation`], [`Error::NotFound`] or [`Error::DuplicateKey`].
    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, draft: ConfigDraft) -> Result<system_config::Model> {
        let config = validate_draft(&draft)?;
        self.get(id).await?;

        if let Some(holder) = self.store.find_by_key(&config.key).await?
            && holder.id != id
        {
            return Err(Error::DuplicateKey { key: config.key });
        }

        let updated = self.store.update(id, config).await?;
        info!("Updated config '{}'", updated.key);
        Ok(updated)
    }

    /// Activates or deactivates a config without touching its other fields.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no row has this id.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<system_config::Model> {
        self.store.set_active(id, is_active).await
    }

    /// Deletes a config. An id that is already gone counts as success.
    ///
    /// # Errors
    /// Only storage failures are reported.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        match self.store.delete(id).await? {
            DeleteOutcome::Deleted => info!("Deleted config {}", id),
            DeleteOutcome::AlreadyAbsent => debug!("Config {} was already absent", id),
        }
        Ok(())
    }

    /// Value of the active config stored under `key` (normalized before lookup).
    ///
    /// Inactive configs resolve to `None`: they are kept for reference only.
    pub async fn resolve_active(&self, key: &str) -> Result<Option<String>> {
        let key = normalize_key(key);
        Ok(self
            .store
            .find_by_key(&key)
            .await?
            .filter(|config| config.is_active)
            .map(|config| config.value))
    }

    /// Creates every seed whose key is not stored yet. Existing keys are left alone.
    ///
    /// Returns how many configs were created.
    ///
    /// # Errors
    /// Fails on the first invalid seed or storage failure.
    pub async fn seed(&self, seeds: &[ConfigDraft]) -> Result<usize> {
        let mut created = 0;
        for seed in seeds {
            match self.create(seed.clone()).await {
                Ok(_) => created += 1,
                Err(Error::DuplicateKey { key }) => {
                    debug!("Seed '{}' already present, skipping", key);
                }
                Err(e) => return Err(e),
            }
        }
        info!("Seeded {} of {} configs", created, seeds.len());
        Ok(created)
    }

    /// Copy of `config` safe to show: value masked when the key looks sensitive.
    #[must_use]
    pub fn redact_for_display(&self, config: &system_config::Model) -> system_config::Model {
        self.redaction.redact(config)
    }

    /// [`Self::redact_for_display`] over a slice.
    #[must_use]
    pub fn redact_all(&self, configs: &[system_config::Model]) -> Vec<system_config::Model> {
        configs
            .iter()
            .map(|config| self.redact_for_display(config))
            .collect()
    }
}
