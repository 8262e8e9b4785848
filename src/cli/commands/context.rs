//! Shared state for commands that talk to remote servers.

use std::path::{Path, PathBuf};

use crate::config::{apply_env_overrides, load_config, load_system_env, MigrateConfig};
use crate::error::Result;
use crate::sink::AzureDevOpsClient;
use crate::source::OctopusClient;

/// Where a command finds its configuration.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config_override,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load config files and apply environment overrides on top.
    pub fn load_config(&self) -> Result<MigrateConfig> {
        let mut config = load_config(&self.project_root, self.config_override.as_deref())?;
        apply_env_overrides(&mut config, &load_system_env());
        Ok(config)
    }

    /// Build the Octopus client from the loaded config.
    pub fn octopus(&self, config: &MigrateConfig) -> Result<OctopusClient> {
        OctopusClient::new(config.octopus.settings()?)
    }

    /// Build the Azure DevOps client from the loaded config.
    pub fn azure_devops(&self, config: &MigrateConfig) -> Result<AzureDevOpsClient> {
        AzureDevOpsClient::new(config.azure_devops.settings()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_override_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("migrate.yml");
        fs::write(&path, "octopus: { space: Spaces-7 }").unwrap();

        let context = CommandContext::new(temp.path().to_path_buf(), Some(path));
        let config = context.load_config().unwrap();

        assert_eq!(config.octopus.timeout_secs, 30);
        assert!(config.migrations.is_empty());
    }

    #[test]
    fn missing_override_is_reported() {
        let temp = TempDir::new().unwrap();
        let context =
            CommandContext::new(temp.path().to_path_buf(), Some(temp.path().join("nope.yml")));

        assert!(matches!(
            context.load_config(),
            Err(MigrateError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn azure_client_requires_settings() {
        let context = CommandContext::new(PathBuf::from("."), None);
        let err = context
            .azure_devops(&MigrateConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("azure_devops.organization_url"));
    }
}
