/// Database connection URL and local table creation
pub mod database;

/// Registry settings loaded from `registry.toml`
pub mod settings;
