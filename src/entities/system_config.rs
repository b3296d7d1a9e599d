//! System config entity - one typed operational setting (payment key, DSN, API secret).
//!
//! The `key` column carries a UNIQUE constraint. That constraint is what actually
//! guarantees uniqueness; the registry's pre-insert lookup only gives a friendlier error.

use super::ConfigCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted configuration record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_configs")]
pub struct Model {
    /// Identifier assigned by the store adapter on insert
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Console section the config belongs to
    pub category: ConfigCategory,
    /// Normalized key (uppercase, underscores), unique across all categories
    #[sea_orm(unique)]
    pub key: String,
    /// Free-text payload: API key, DSN, URL or secret
    pub value: String,
    /// Optional operator annotation
    pub description: Option<String>,
    /// Inactive configs stay listed but must not be used by consumers
    pub is_active: bool,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
}

/// `SystemConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
