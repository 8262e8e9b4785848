//! Error types for octomigrate operations.
//!
//! This module defines [`MigrateError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Lookups of named resources on the source side fail with `NotFound`
//!   before any resolution happens; the resolver itself never fails
//! - A failed variable group write is reported as `RemoteWriteFailure`
//!   and is never retried
//! - Use `anyhow::Error` (via `MigrateError::Other`) for unexpected errors

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of named resource looked up on the source server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A library variable set.
    LibrarySet,
    /// A project (and its variable set).
    Project,
    /// A deployment environment.
    Environment,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibrarySet => write!(f, "Library variable set"),
            Self::Project => write!(f, "Project"),
            Self::Environment => write!(f, "Environment"),
        }
    }
}

/// Core error type for octomigrate operations.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// A named library set, project, or environment does not exist.
    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: ResourceKind, name: String },

    /// Reading from a remote server failed.
    #[error("Request to {url} failed: {message}")]
    RemoteReadFailure { url: String, message: String },

    /// Writing a variable group failed.
    #[error("Failed to update variable group {group_id}: {message}")]
    RemoteWriteFailure { group_id: u32, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Referenced migration is not defined in the config.
    #[error("Unknown migration: {name}")]
    UnknownMigration { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MigrateError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type alias for octomigrate operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_kind_and_name() {
        let err = MigrateError::not_found(ResourceKind::LibrarySet, "demo-library");
        assert_eq!(
            err.to_string(),
            "Library variable set 'demo-library' does not exist"
        );
    }

    #[test]
    fn not_found_environment() {
        let err = MigrateError::not_found(ResourceKind::Environment, "Prod");
        assert_eq!(err.to_string(), "Environment 'Prod' does not exist");
    }

    #[test]
    fn remote_write_failure_displays_group_and_message() {
        let err = MigrateError::RemoteWriteFailure {
            group_id: 123,
            message: "HTTP 403 Forbidden".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("123"));
        assert!(msg.contains("HTTP 403 Forbidden"));
    }

    #[test]
    fn remote_read_failure_displays_url() {
        let err = MigrateError::RemoteReadFailure {
            url: "https://octopus.local/api/environments/all".into(),
            message: "timed out".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/api/environments/all"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = MigrateError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_migration_displays_name() {
        let err = MigrateError::UnknownMigration {
            name: "nightly".into(),
        };
        assert!(err.to_string().contains("nightly"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MigrateError = io_err.into();
        assert!(matches!(err, MigrateError::Io(_)));
    }
}
