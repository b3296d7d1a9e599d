//! Core registry logic - framework-agnostic store adapter, validation, service and
//! schema provisioning.

/// Draft and validated config shapes
pub mod draft;
/// Bootstrap script for the hosted backend
pub mod provisioner;
/// Display-time masking of sensitive values
pub mod redaction;
/// Validation and orchestration of config operations
pub mod registry;
/// Persistence gateway for the config table
pub mod store;
/// Console tab grouping of categories
pub mod tabs;
/// Draft checks and key normalization
pub mod validator;

pub use draft::{ConfigDraft, ValidConfig};
pub use provisioner::{BootstrapScript, bootstrap_script};
pub use redaction::RedactionPolicy;
pub use registry::ConfigRegistry;
pub use store::{ConfigStore, DeleteOutcome, SeaOrmConfigStore};
pub use tabs::ConsoleTab;
