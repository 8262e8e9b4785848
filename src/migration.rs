//! Migration orchestration.
//!
//! Looks up the requested library set, project, and environment on the
//! source, resolves each set for the environment, merges library and
//! project results, and upserts the outcome into a variable group.
//!
//! # Example
//!
//! ```
//! use octomigrate::migration::{Migration, MigrateOptions, Migrator, Selection};
//! use octomigrate::sink::InMemorySink;
//! use octomigrate::source::InMemorySource;
//! use octomigrate::variables::RawVariable;
//!
//! let source = InMemorySource::new()
//!     .with_environment("Environments-1", "Prod")
//!     .with_library("demo-library", vec![
//!         RawVariable::new("Port", "8080"),
//!         RawVariable::new("Port", "9090").scoped_to(["Environments-1"]),
//!     ]);
//! let sink = InMemorySink::new().with_group(123, [("Existing", "keep")]);
//!
//! let migration = Migration {
//!     selection: Selection::library("demo-library").in_environment("Prod"),
//!     variable_group: 123,
//!     exclude_secrets: false,
//! };
//! let report = Migrator::new(&source, &sink)
//!     .run(&migration, MigrateOptions::default())
//!     .unwrap();
//!
//! assert_eq!(report.written["Port"], "9090");
//! assert_eq!(sink.group(123).unwrap()["Existing"], "keep");
//! ```

use std::collections::BTreeMap;

use crate::error::{MigrateError, Result};
use crate::sink::VariableSink;
use crate::source::VariableSource;
use crate::variables::{
    merge, resolve, to_group_variables, EffectiveVariable, Environment, RawVariable, SetKind,
};

/// Which variable sets to read, and for which environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Library variable set name.
    pub library: Option<String>,
    /// Project name.
    pub project: Option<String>,
    /// Environment name; `None` resolves unscoped variables only.
    pub environment: Option<String>,
}

impl Selection {
    /// Select a library variable set.
    pub fn library(name: impl Into<String>) -> Self {
        Self {
            library: Some(name.into()),
            ..Self::default()
        }
    }

    /// Select a project variable set.
    pub fn project(name: impl Into<String>) -> Self {
        Self {
            project: Some(name.into()),
            ..Self::default()
        }
    }

    /// Also select a project, merged over the library.
    pub fn with_project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    /// Resolve for the named environment.
    pub fn in_environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Short human-readable description (e.g. `library 'x' + project 'y' @ Prod`).
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(library) = &self.library {
            parts.push(format!("library '{}'", library));
        }
        if let Some(project) = &self.project {
            parts.push(format!("project '{}'", project));
        }
        let mut description = parts.join(" + ");
        if let Some(env) = &self.environment {
            description.push_str(&format!(" @ {}", env));
        }
        description
    }
}

/// The result of resolving a [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The environment that was resolved, if any.
    pub environment: Option<Environment>,
    /// Effective variables, sorted by name.
    pub variables: Vec<EffectiveVariable>,
}

/// Resolve a selection against a source.
///
/// Named sets are looked up first, then the environment. Any missing name
/// fails with `NotFound` before resolution.
///
/// # Errors
///
/// Returns `ConfigValidationError` if neither a library nor a project is selected.
pub fn resolve_selection(source: &dyn VariableSource, selection: &Selection) -> Result<Resolution> {
    if selection.library.is_none() && selection.project.is_none() {
        return Err(MigrateError::ConfigValidationError {
            message: "select a library variable set, a project, or both".to_string(),
        });
    }

    let library = selection
        .library
        .as_deref()
        .map(|name| source.find_variable_set(SetKind::Library, name))
        .transpose()?;
    let project = selection
        .project
        .as_deref()
        .map(|name| source.find_variable_set(SetKind::Project, name))
        .transpose()?;
    let environment = selection
        .environment
        .as_deref()
        .map(|name| source.find_environment_by_name(name))
        .transpose()?;

    let environment_id = environment.as_ref().map(|env| env.id.as_str());
    let library = library.map(|set| resolve(&set.variables, environment_id));
    let project = project.map(|set| resolve(&set.variables, environment_id));

    let variables = match (library, project) {
        (Some(library), Some(project)) => merge(&library, &project),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => Vec::new(),
    };

    Ok(Resolution {
        environment,
        variables,
    })
}

/// Fetch every raw variable of a named set, without scoping.
pub fn list_raw_variables(
    source: &dyn VariableSource,
    kind: SetKind,
    name: &str,
) -> Result<Vec<RawVariable>> {
    Ok(source.find_variable_set(kind, name)?.variables)
}

/// A configured migration: what to read and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub selection: Selection,
    /// Destination variable group id.
    pub variable_group: u32,
    /// Leave masked values out of the destination.
    pub exclude_secrets: bool,
}

/// Options that apply to a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Resolve and report without writing.
    pub dry_run: bool,
}

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Destination variable group id.
    pub variable_group: u32,
    /// Name/value pairs sent (or, for a dry run, that would be sent).
    pub written: BTreeMap<String, String>,
    /// Names written with the secret marker as their value.
    pub masked: Vec<String>,
    /// Masked names left out of the write.
    pub excluded: Vec<String>,
    /// Whether the write was skipped.
    pub dry_run: bool,
}

/// Runs migrations from a source into a sink.
pub struct Migrator<'a> {
    source: &'a dyn VariableSource,
    sink: &'a dyn VariableSink,
}

impl<'a> Migrator<'a> {
    /// Create a migrator.
    pub fn new(source: &'a dyn VariableSource, sink: &'a dyn VariableSink) -> Self {
        Self { source, sink }
    }

    /// Resolve a migration's selection and upsert it into its variable group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing set or environment, and
    /// `RemoteWriteFailure` if the group update fails. Nothing is retried.
    pub fn run(&self, migration: &Migration, options: MigrateOptions) -> Result<MigrationReport> {
        let resolution = resolve_selection(self.source, &migration.selection)?;

        let (secret, plain): (Vec<EffectiveVariable>, Vec<EffectiveVariable>) = resolution
            .variables
            .into_iter()
            .partition(EffectiveVariable::is_masked);
        let secret_names: Vec<String> = secret.iter().map(|v| v.name.clone()).collect();

        let (written, masked, excluded) = if migration.exclude_secrets {
            (to_group_variables(&plain), Vec::new(), secret_names)
        } else {
            for name in &secret_names {
                tracing::debug!(
                    "'{}' is sensitive and will be written to group {} as the literal placeholder",
                    name,
                    migration.variable_group
                );
            }
            let mut all = plain;
            all.extend(secret);
            (to_group_variables(&all), secret_names, Vec::new())
        };

        if options.dry_run {
            tracing::info!(
                "Dry run: {} variables from {} not written to group {}",
                written.len(),
                migration.selection.describe(),
                migration.variable_group
            );
        } else {
            self.sink
                .upsert_variable_group(migration.variable_group, &written)?;
            tracing::info!(
                "Migrated {} variables from {} into group {}",
                written.len(),
                migration.selection.describe(),
                migration.variable_group
            );
        }

        Ok(MigrationReport {
            variable_group: migration.variable_group,
            written,
            masked,
            excluded,
            dry_run: options.dry_run,
        })
    }
}
