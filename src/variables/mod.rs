//! Variable model and the scope resolution engine.
//!
//! This module contains:
//! - The raw and effective variable types in this file
//! - Sensitive value masking in [`mask`]
//! - Name ordering in [`order`]
//! - Environment scope resolution in [`resolver`]
//! - Library/project merging in [`merge`]
//!
//! # Example
//!
//! ```
//! use octomigrate::variables::{resolve, RawVariable};
//!
//! let variables = vec![
//!     RawVariable::new("Port", "8080"),
//!     RawVariable::new("Port", "9090").scoped_to(["Environments-1"]),
//!     RawVariable::new("Debug", "true"),
//! ];
//!
//! let resolved = resolve(&variables, Some("Environments-1"));
//! let names: Vec<_> = resolved.iter().map(|v| (v.name.as_str(), v.value.as_str())).collect();
//! assert_eq!(names, vec![("Debug", "true"), ("Port", "9090")]);
//! ```

pub mod mask;
pub mod merge;
pub mod order;
pub mod resolver;

pub use mask::{mask_value, SECRET_MARKER};
pub use merge::merge;
pub use order::{compare_names, names_match, sort_by_name, sort_names};
pub use resolver::resolve;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Where a variable applies.
///
/// A variable with no environment restriction (absent or empty) is
/// unscoped and applies to every environment. Other dimensions such as
/// roles or channels are kept for display but never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableScope {
    /// Environment ids the variable is restricted to.
    pub environments: Option<BTreeSet<String>>,
    /// Remaining scope dimensions, keyed by dimension name.
    pub other: BTreeMap<String, BTreeSet<String>>,
}

impl VariableScope {
    /// A scope that applies everywhere.
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// A scope restricted to the given environment ids.
    pub fn environments<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            environments: Some(ids.into_iter().map(Into::into).collect()),
            other: BTreeMap::new(),
        }
    }

    /// Whether the variable has no environment restriction.
    pub fn is_unscoped(&self) -> bool {
        self.environments.as_ref().is_none_or(|ids| ids.is_empty())
    }

    /// Whether the variable is restricted to environments and includes `environment_id`.
    pub fn applies_to(&self, environment_id: &str) -> bool {
        self.environments
            .as_ref()
            .is_some_and(|ids| ids.contains(environment_id))
    }
}

/// A variable as read from a source variable set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariable {
    pub name: String,
    pub value: String,
    pub is_sensitive: bool,
    pub scope: VariableScope,
}

impl RawVariable {
    /// Create an unscoped, non-sensitive variable.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_sensitive: false,
            scope: VariableScope::unscoped(),
        }
    }

    /// Mark the variable as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.is_sensitive = true;
        self
    }

    /// Restrict the variable to the given environment ids.
    pub fn scoped_to<I, S>(mut self, environment_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope.environments = Some(environment_ids.into_iter().map(Into::into).collect());
        self
    }
}

/// A deployment environment on the source server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
}

impl Environment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which kind of named variable set to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// A library variable set shared across projects.
    Library,
    /// The variable set owned by a project.
    Project,
}

/// A named variable set fetched from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    /// Source-side id of the variable set.
    pub id: String,
    pub variables: Vec<RawVariable>,
}

/// A resolved name/value pair, ready to be written to a variable group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveVariable {
    pub name: String,
    pub value: String,
    /// Set when the value was replaced by the secret marker.
    #[serde(skip)]
    masked: bool,
}

impl EffectiveVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            masked: false,
        }
    }

    /// A variable whose sensitive value has been replaced by [`SECRET_MARKER`].
    pub fn secret(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SECRET_MARKER.to_string(),
            masked: true,
        }
    }

    /// Whether the value came from a sensitive variable and was masked.
    pub fn is_masked(&self) -> bool {
        self.masked
    }
}

impl From<&RawVariable> for EffectiveVariable {
    fn from(raw: &RawVariable) -> Self {
        Self {
            name: raw.name.clone(),
            value: mask_value(raw),
            masked: raw.is_sensitive,
        }
    }
}

/// Convert a resolved list into the name/value mapping a sink accepts.
pub fn to_group_variables(variables: &[EffectiveVariable]) -> BTreeMap<String, String> {
    variables
        .iter()
        .map(|v| (v.name.clone(), v.value.clone()))
        .collect()
}
