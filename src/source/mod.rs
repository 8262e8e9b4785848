//! Reading variable sets and environments from the source server.
//!
//! This module provides:
//! - [`VariableSource`] trait for the source boundary
//! - [`OctopusClient`] for the Octopus Deploy REST API
//! - [`InMemorySource`] for tests and offline use
//!
//! Every lookup by name is case-insensitive, and a missing name is a
//! [`MigrateError::NotFound`] raised here, before resolution runs.

pub mod memory;
pub mod octopus;

pub use memory::InMemorySource;
pub use octopus::{OctopusClient, OctopusSettings};

use crate::error::{MigrateError, ResourceKind, Result};
use crate::variables::order::names_match;
use crate::variables::{Environment, SetKind, VariableSet};

/// Source of raw variables and environments.
pub trait VariableSource {
    /// List every environment.
    fn list_environments(&self) -> Result<Vec<Environment>>;

    /// List every project name, sorted case-insensitively.
    fn list_project_names(&self) -> Result<Vec<String>>;

    /// Fetch the variable set owned by a named library set or project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no set of that kind has the given name.
    fn find_variable_set(&self, kind: SetKind, name: &str) -> Result<VariableSet>;

    /// Look up an environment by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no environment has the given name.
    fn find_environment_by_name(&self, name: &str) -> Result<Environment> {
        self.list_environments()?
            .into_iter()
            .find(|env| names_match(&env.name, name))
            .ok_or_else(|| MigrateError::not_found(ResourceKind::Environment, name))
    }
}

/// Resource kind reported when a set of `kind` is missing.
pub(crate) fn set_resource_kind(kind: SetKind) -> ResourceKind {
    match kind {
        SetKind::Library => ResourceKind::LibrarySet,
        SetKind::Project => ResourceKind::Project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_environment_ignores_case() {
        let source = InMemorySource::new()
            .with_environment("Environments-1", "Prod")
            .with_environment("Environments-2", "Test");

        let env = source.find_environment_by_name("prod").unwrap();
        assert_eq!(env.id, "Environments-1");
    }

    #[test]
    fn find_environment_missing_is_not_found() {
        let source = InMemorySource::new().with_environment("Environments-1", "Prod");

        let err = source.find_environment_by_name("Staging").unwrap_err();
        assert!(matches!(
            err,
            MigrateError::NotFound {
                kind: ResourceKind::Environment,
                ..
            }
        ));
    }

    #[test]
    fn set_kind_maps_to_resource_kind() {
        assert_eq!(set_resource_kind(SetKind::Library), ResourceKind::LibrarySet);
        assert_eq!(set_resource_kind(SetKind::Project), ResourceKind::Project);
    }
}
