//! Configuration schema definitions for octomigrate.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.
//!
//! ```yaml
//! octopus:
//!   url: https://octopus.contoso.local
//!   api_key: API-XXXXXXXXXXXXXXXX
//! azure_devops:
//!   organization_url: https://dev.azure.com/contoso
//!   project: NewProject
//! migrations:
//!   prod-library:
//!     library: demo-library
//!     environment: Prod
//!     variable_group: 123
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{MigrateError, Result};
use crate::migration::{Migration, Selection};
use crate::sink::AzureDevOpsSettings;
use crate::source::OctopusSettings;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Source server connection.
    pub octopus: OctopusConfig,

    /// Destination organization connection.
    pub azure_devops: AzureDevOpsConfig,

    /// Named migrations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub migrations: BTreeMap<String, MigrationConfig>,
}

/// Octopus Deploy connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctopusConfig {
    /// Server base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API key (prefer the `OCTOPUS_API_KEY` environment variable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Space id on multi-space servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OctopusConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            space: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OctopusConfig {
    /// Build client settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the URL or API key is missing.
    pub fn settings(&self) -> Result<OctopusSettings> {
        Ok(OctopusSettings {
            url: required(&self.url, "octopus.url", "OCTOPUS_URL")?,
            api_key: required(&self.api_key, "octopus.api_key", "OCTOPUS_API_KEY")?,
            space: self.space.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Azure DevOps connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureDevOpsConfig {
    /// Organization URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,

    /// Project that owns the variable groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Personal access token (prefer the `AZURE_DEVOPS_PAT` environment variable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pat: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AzureDevOpsConfig {
    fn default() -> Self {
        Self {
            organization_url: None,
            project: None,
            pat: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AzureDevOpsConfig {
    /// Build client settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the URL, project, or token is missing.
    pub fn settings(&self) -> Result<AzureDevOpsSettings> {
        Ok(AzureDevOpsSettings {
            organization_url: required(
                &self.organization_url,
                "azure_devops.organization_url",
                "AZURE_DEVOPS_URL",
            )?,
            project: required(&self.project, "azure_devops.project", "AZURE_DEVOPS_PROJECT")?,
            pat: required(&self.pat, "azure_devops.pat", "AZURE_DEVOPS_PAT")?,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// A named migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Library variable set to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Project whose variables are read (merged over the library if both are set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Environment to resolve for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Destination variable group id
    pub variable_group: u32,

    /// Leave sensitive variables out of the destination
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclude_secrets: bool,
}

impl MigrationConfig {
    /// Convert into a runnable migration.
    pub fn to_migration(&self) -> Migration {
        Migration {
            selection: Selection {
                library: self.library.clone(),
                project: self.project.clone(),
                environment: self.environment.clone(),
            },
            variable_group: self.variable_group,
            exclude_secrets: self.exclude_secrets,
        }
    }
}

fn required(value: &Option<String>, key: &str, env_var: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| MigrateError::ConfigValidationError {
            message: format!("'{}' is not set (config key or {})", key, env_var),
        })
}

fn default_timeout_secs() -> u64 {
    30
}

fn is_false(b: &bool) -> bool {
    !*b
}
