//! octomigrate - Migrate Octopus Deploy variables into Azure DevOps.
//!
//! Reads library variable sets and project variables from an Octopus
//! Deploy server, resolves them for one environment, and upserts the
//! result into an Azure DevOps variable group.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`migration`] - Selection resolution and the migration driver
//! - [`sink`] - Variable group destinations
//! - [`source`] - Variable set sources
//! - [`ui`] - Terminal output
//! - [`variables`] - Variable model, scope resolution, masking, and merging
//!
//! # Example
//!
//! ```
//! use octomigrate::variables::{merge, resolve, RawVariable};
//!
//! let library = resolve(
//!     &[
//!         RawVariable::new("LogLevel", "Info"),
//!         RawVariable::new("ApiKey", "hunter2").sensitive(),
//!     ],
//!     None,
//! );
//! let project = resolve(&[RawVariable::new("LogLevel", "Debug")], None);
//!
//! let merged = merge(&library, &project);
//! assert_eq!(merged[0].value, "[SECRET]");
//! assert_eq!(merged[1].value, "Debug");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod migration;
pub mod sink;
pub mod source;
pub mod ui;
pub mod variables;

pub use error::{MigrateError, Result};
