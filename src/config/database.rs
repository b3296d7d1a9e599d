//! Database configuration for the registry.
//!
//! Resolves the connection URL and creates local tables from the entity definitions with
//! `SeaORM`'s `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. Creation is guarded with `IF NOT EXISTS` and is safe to repeat on every start.

use crate::entities::SystemConfig;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Schema};
use tracing::debug;

/// Connection URL used when neither settings nor `DATABASE_URL` provide one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://consult_registry.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, if it is set.
#[must_use]
pub fn database_url_from_env() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Creates the `system_configs` table (with its UNIQUE key column) if it is missing.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut config_table = schema.create_table_from_entity(SystemConfig);
    config_table.if_not_exists();

    debug!("Ensuring system_configs table exists");
    db.execute(builder.build(&config_table)).await?;

    Ok(())
}
