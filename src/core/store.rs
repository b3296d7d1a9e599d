//! Config store adapter - the only code that talks to the `system_configs` table.
//!
//! [`ConfigStore`] is the seam the registry service is generic over. [`SeaOrmConfigStore`]
//! is the production implementation. Every call is a round trip; nothing is cached.

use super::draft::ValidConfig;
use crate::{
    config::database::create_tables,
    entities::{SystemConfig, system_config},
    errors::{Error, Result},
};
use sea_orm::{Database, QueryOrder, Set, SqlErr, prelude::*};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Result of a delete call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row was removed
    Deleted,
    /// No row had this id; nothing changed
    AlreadyAbsent,
}

/// Persistence operations over the config table.
pub trait ConfigStore: Send + Sync {
    /// Every stored config, ordered by category ascending (then key).
    fn list(&self) -> impl Future<Output = Result<Vec<system_config::Model>>> + Send;

    /// Looks a config up by its identifier.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<system_config::Model>>> + Send;

    /// Looks a config up by its normalized key.
    fn find_by_key(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<system_config::Model>>> + Send;

    /// Inserts a new row and returns it with its assigned id.
    ///
    /// A UNIQUE violation on `key` is reported as [`Error::DuplicateKey`].
    fn insert(
        &self,
        config: ValidConfig,
    ) -> impl Future<Output = Result<system_config::Model>> + Send;

    /// Replaces every mutable field of an existing row.
    ///
    /// Fails with [`Error::NotFound`] when no row has this id.
    fn update(
        &self,
        id: Uuid,
        config: ValidConfig,
    ) -> impl Future<Output = Result<system_config::Model>> + Send;

    /// Flips only the lifecycle flag of an existing row.
    fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> impl Future<Output = Result<system_config::Model>> + Send;

    /// Removes a row. Deleting an absent id is not an error.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<DeleteOutcome>> + Send;
}

/// `SeaORM`-backed store. Opened once at start-up and closed at shutdown.
#[derive(Debug, Clone)]
pub struct SeaOrmConfigStore {
    db: DatabaseConnection,
}

impl SeaOrmConfigStore {
    /// Connects to `database_url` and makes sure the config table exists.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] if the backend cannot be reached, or a database
    /// error if table creation fails.
    #[instrument(skip_all)]
    pub async fn open(database_url: &str) -> Result<Self> {
        debug!("Opening config store");
        let db = Database::connect(database_url).await?;
        create_tables(&db).await?;
        info!("Config store ready");
        Ok(Self { db })
    }

    /// Wraps an already-open connection. The caller is responsible for the schema.
    #[must_use]
    pub const fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying connection, for callers that need raw access (tests, tooling).
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Closes the connection pool.
    ///
    /// # Errors
    /// Returns an error if the driver fails while shutting the pool down.
    pub async fn close(self) -> Result<()> {
        self.db.close().await?;
        info!("Config store closed");
        Ok(())
    }
}

/// Maps a write failure, turning the storage-level uniqueness guard into `DuplicateKey`.
fn map_write_err(err: DbErr, key: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Unique constraint rejected key '{}': {}", key, detail);
            Error::DuplicateKey {
                key: key.to_string(),
            }
        }
        _ => err.into(),
    }
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound { id: id.to_string() }
}

impl ConfigStore for SeaOrmConfigStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<system_config::Model>> {
        let configs = SystemConfig::find()
            .order_by_asc(system_config::Column::Category)
            .order_by_asc(system_config::Column::Key)
            .all(&self.db)
            .await?;
        debug!("Fetched {} configs", configs.len());
        Ok(configs)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<system_config::Model>> {
        SystemConfig::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &str) -> Result<Option<system_config::Model>> {
        SystemConfig::find()
            .filter(system_config::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn insert(&self, config: ValidConfig) -> Result<system_config::Model> {
        let key = config.key.clone();
        let model = system_config::ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(config.category),
            key: Set(config.key),
            value: Set(config.value),
            description: Set(config.description),
            is_active: Set(config.is_active),
            created_at: Set(chrono::Utc::now()),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &key))?;
        info!("Inserted config '{}' ({})", inserted.key, inserted.id);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: Uuid, config: ValidConfig) -> Result<system_config::Model> {
        let mut model: system_config::ActiveModel = SystemConfig::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))?
            .into();

        let key = config.key.clone();
        model.category = Set(config.category);
        model.key = Set(config.key);
        model.value = Set(config.value);
        model.description = Set(config.description);
        model.is_active = Set(config.is_active);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, &key))?;
        info!("Updated config '{}' ({})", updated.key, updated.id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<system_config::Model> {
        let mut model: system_config::ActiveModel = SystemConfig::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))?
            .into();

        model.is_active = Set(is_active);
        model.update(&self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<DeleteOutcome> {
        let result = SystemConfig::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            debug!("No config with id {} to delete", id);
            Ok(DeleteOutcome::AlreadyAbsent)
        } else {
            info!("Deleted config {}", id);
            Ok(DeleteOutcome::Deleted)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ConfigCategory;
    use crate::test_utils::*;

    fn valid(category: ConfigCategory, key: &str, value: &str) -> ValidConfig {
        ValidConfig {
            category,
            key: key.to_string(),
            value: value.to_string(),
            description: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() -> Result<()> {
        let store = setup_test_store().await?;
        let before = chrono::Utc::now();

        let inserted = store
            .insert(valid(ConfigCategory::Database, "DB_URL", "postgres://x"))
            .await?;

        assert!(!inserted.id.is_nil());
        assert!(inserted.created_at >= before - chrono::Duration::seconds(1));
        assert_eq!(store.find_by_id(inserted.id).await?.unwrap(), inserted);
        Ok(())
    }

    #[tokio::test]
    async fn test_unique_constraint_reports_duplicate_key() -> Result<()> {
        let store = setup_test_store().await?;
        store
            .insert(valid(ConfigCategory::Database, "DB_URL", "a"))
            .await?;

        // Bypasses the validator's lookup, as a racing create would.
        let result = store
            .insert(valid(ConfigCategory::ApiIntegration, "DB_URL", "b"))
            .await;
        assert!(matches!(result, Err(Error::DuplicateKey { key }) if key == "DB_URL"));
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_category() -> Result<()> {
        let store = setup_test_store().await?;
        store
            .insert(valid(ConfigCategory::PaymentC2b, "MPESA_API_KEY", "a"))
            .await?;
        store
            .insert(valid(ConfigCategory::ApiIntegration, "MAPS_URL", "b"))
            .await?;
        store
            .insert(valid(ConfigCategory::Database, "DB_URL", "c"))
            .await?;

        let categories: Vec<_> = store.list().await?.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                ConfigCategory::ApiIntegration,
                ConfigCategory::Database,
                ConfigCategory::PaymentC2b
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() -> Result<()> {
        let store = setup_test_store().await?;
        let result = store
            .update(Uuid::new_v4(), valid(ConfigCategory::Database, "DB_URL", "x"))
            .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_active_only_touches_flag() -> Result<()> {
        let store = setup_test_store().await?;
        let inserted = store
            .insert(valid(ConfigCategory::Database, "DB_URL", "postgres://x"))
            .await?;

        let toggled = store.set_active(inserted.id, false).await?;
        assert!(!toggled.is_active);
        assert_eq!(toggled.value, inserted.value);
        assert_eq!(toggled.key, inserted.key);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reports_absent_rows() -> Result<()> {
        let store = setup_test_store().await?;
        let inserted = store
            .insert(valid(ConfigCategory::Database, "DB_URL", "x"))
            .await?;

        assert_eq!(store.delete(inserted.id).await?, DeleteOutcome::Deleted);
        assert_eq!(store.delete(inserted.id).await?, DeleteOutcome::AlreadyAbsent);
        assert!(store.find_by_id(inserted.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_from_connection_wraps_prepared_database() -> Result<()> {
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        let store = SeaOrmConfigStore::from_connection(db);

        let inserted = store
            .insert(valid(ConfigCategory::ApiIntegration, "MAPS_URL", "https://maps"))
            .await?;
        assert_eq!(store.find_by_key("MAPS_URL").await?, Some(inserted));
        store.close().await
    }

    #[tokio::test]
    async fn test_close_consumes_store() -> Result<()> {
        let store = setup_test_store().await?;
        store.close().await
    }
}
