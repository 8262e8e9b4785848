//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Environment variable overrides in [`environment`]
//!
//! # Example
//!
//! ```
//! use octomigrate::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".octomigrate");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(
//!     config_dir.join("config.yml"),
//!     "migrations:\n  prod:\n    project: Demo\n    variable_group: 7\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.migrations["prod"].variable_group, 7);
//! ```
//!
//! # Configuration File Locations
//!
//! Configuration is merged in this order:
//! 1. Project config (`.octomigrate/config.yml`)
//! 2. Local overrides (`.octomigrate/config.local.yml`)
//! 3. Environment variables (`OCTOPUS_*`, `AZURE_DEVOPS_*`)

pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{AzureDevOpsConfig, MigrateConfig, MigrationConfig, OctopusConfig};

pub use loader::{
    find_project_root, load_config, load_config_value, load_merged_config, ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_layers};

pub use validator::{into_result, validate, validate_config, validate_migration, ValidationError};

pub use environment::{apply_env_overrides, load_system_env};
