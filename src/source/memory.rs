//! In-memory variable source.
//!
//! Holds environments and named variable sets in plain collections.
//! Used by tests and by callers that already have a snapshot of the
//! source server.
//!
//! # Example
//!
//! ```
//! use octomigrate::source::{InMemorySource, VariableSource};
//! use octomigrate::variables::{RawVariable, SetKind};
//!
//! let source = InMemorySource::new()
//!     .with_environment("Environments-1", "Prod")
//!     .with_library("demo-library", vec![RawVariable::new("Port", "8080")]);
//!
//! let set = source.find_variable_set(SetKind::Library, "DEMO-library").unwrap();
//! assert_eq!(set.variables.len(), 1);
//! ```

use crate::error::{MigrateError, Result};
use crate::variables::order::{names_match, sort_names};
use crate::variables::{Environment, RawVariable, SetKind, VariableSet};

use super::{set_resource_kind, VariableSource};

#[derive(Debug, Clone)]
struct NamedSet {
    kind: SetKind,
    name: String,
    set: VariableSet,
}

/// Variable source backed by in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    environments: Vec<Environment>,
    sets: Vec<NamedSet>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment.
    pub fn with_environment(mut self, id: &str, name: &str) -> Self {
        self.environments.push(Environment::new(id, name));
        self
    }

    /// Add a library variable set.
    pub fn with_library(self, name: &str, variables: Vec<RawVariable>) -> Self {
        self.with_set(SetKind::Library, name, variables)
    }

    /// Add a project and its variable set.
    pub fn with_project(self, name: &str, variables: Vec<RawVariable>) -> Self {
        self.with_set(SetKind::Project, name, variables)
    }

    fn with_set(mut self, kind: SetKind, name: &str, variables: Vec<RawVariable>) -> Self {
        let id = format!("variableset-{}", self.sets.len() + 1);
        self.sets.push(NamedSet {
            kind,
            name: name.to_string(),
            set: VariableSet { id, variables },
        });
        self
    }
}

impl VariableSource for InMemorySource {
    fn list_environments(&self) -> Result<Vec<Environment>> {
        Ok(self.environments.clone())
    }

    fn list_project_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .sets
            .iter()
            .filter(|s| s.kind == SetKind::Project)
            .map(|s| s.name.clone())
            .collect();
        sort_names(&mut names);
        Ok(names)
    }

    fn find_variable_set(&self, kind: SetKind, name: &str) -> Result<VariableSet> {
        self.sets
            .iter()
            .find(|s| s.kind == kind && names_match(&s.name, name))
            .map(|s| s.set.clone())
            .ok_or_else(|| MigrateError::not_found(set_resource_kind(kind), name))
    }
}
