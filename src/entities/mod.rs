//! Entity module - SeaORM entity definitions for the registry tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod config_category;
pub mod system_config;

pub use config_category::ConfigCategory;
pub use system_config::{
    Column as SystemConfigColumn, Entity as SystemConfig, Model as SystemConfigModel,
};
