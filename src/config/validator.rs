//! Configuration validation rules.
//!
//! This module validates configured migrations:
//! - Each migration reads a library set, a project, or both
//! - A library-only migration names an environment
//! - The destination group id is non-zero
//! - Names are not blank

use crate::config::schema::{MigrateConfig, MigrationConfig};
use crate::error::{MigrateError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Migration name
    pub migration: String,
}

/// Validate a configuration and return all errors.
///
/// All errors are collected rather than stopping at the first one.
pub fn validate_config(config: &MigrateConfig) -> Vec<ValidationError> {
    config
        .migrations
        .iter()
        .flat_map(|(name, migration)| validate_migration(name, migration))
        .collect()
}

/// Validate a single migration, configured or built from CLI flags.
pub fn validate_migration(name: &str, migration: &MigrationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let error = |rule: &str, message: String| ValidationError {
        rule: rule.to_string(),
        message,
        migration: name.to_string(),
    };

    if migration.library.is_none() && migration.project.is_none() {
        errors.push(error(
            "missing-source",
            format!("Migration '{}' must set 'library', 'project', or both", name),
        ));
    }

    if migration.library.is_some() && migration.project.is_none() && migration.environment.is_none()
    {
        errors.push(error(
            "missing-environment",
            format!(
                "Migration '{}' reads a library set and must set 'environment'",
                name
            ),
        ));
    }

    if migration.variable_group == 0 {
        errors.push(error(
            "invalid-group",
            format!("Migration '{}' must set a non-zero 'variable_group'", name),
        ));
    }

    let fields = [
        ("library", &migration.library),
        ("project", &migration.project),
        ("environment", &migration.environment),
    ];
    for (field, value) in fields {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.push(error(
                "blank-name",
                format!("Migration '{}' has a blank '{}'", name, field),
            ));
        }
    }

    errors
}

/// Turn collected errors into a single `ConfigValidationError`.
pub fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        Err(MigrateError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &MigrateConfig) -> Result<()> {
    into_result(validate_config(config))
}
