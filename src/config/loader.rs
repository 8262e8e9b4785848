//! Configuration file discovery and loading.
//!
//! Config lives in `.octomigrate/config.yml` under the project root, with
//! optional personal overrides in `.octomigrate/config.local.yml`.

use crate::config::merger::merge_layers;
use crate::config::schema::MigrateConfig;
use crate::error::{MigrateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config files.
pub const CONFIG_DIR: &str = ".octomigrate";

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .octomigrate/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .octomigrate/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(&self.project_local).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.octomigrate` directory, then falls back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MigrateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MigrateError::Io(e)
        }
    })?;

    // An empty file is an empty mapping, not a null document.
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| MigrateError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the discovered config files for a project.
///
/// Returns the default (empty) config when no file exists, so connection
/// settings can come from the environment alone.
///
/// # Errors
///
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<MigrateConfig> {
    let paths = ConfigPaths::discover(project_root);

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    if layers.is_empty() {
        tracing::debug!("No config files under {}", project_root.display());
        return Ok(MigrateConfig::default());
    }

    let merged = merge_layers(&layers);

    serde_yaml::from_value(merged).map_err(|e| MigrateError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the override file doesn't exist.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<MigrateConfig> {
    match config_override {
        Some(path) => {
            let value = load_config_value(path)?;
            serde_yaml::from_value(value).map_err(|e| MigrateError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, file: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        write_config(temp.path(), "config.local.yml", "");

        let paths = ConfigPaths::discover(temp.path());

        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        let all = paths.all_existing();
        assert!(all[0].ends_with("config.yml"));
        assert!(all[1].ends_with("config.local.yml"));
    }

    #[test]
    fn missing_files_give_default_config() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, MigrateConfig::default());
    }

    #[test]
    fn local_file_overrides_project_file() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            r#"
octopus:
  url: https://octopus.contoso.local
migrations:
  prod:
    library: shared
    environment: Prod
    variable_group: 1
"#,
        );
        write_config(
            temp.path(),
            "config.local.yml",
            r#"
octopus:
  api_key: API-LOCAL
migrations:
  prod:
    variable_group: 99
"#,
        );

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(
            config.octopus.url.as_deref(),
            Some("https://octopus.contoso.local")
        );
        assert_eq!(config.octopus.api_key.as_deref(), Some("API-LOCAL"));
        assert_eq!(config.migrations["prod"].variable_group, 99);
        assert_eq!(config.migrations["prod"].library.as_deref(), Some("shared"));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "octopus: [unclosed");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, MigrateError::ConfigParseError { .. }));
    }

    #[test]
    fn override_path_skips_discovery() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "octopus: { url: https://ignored }");
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, "octopus: { url: https://custom }").unwrap();

        let config = load_config(temp.path(), Some(&custom)).unwrap();

        assert_eq!(config.octopus.url.as_deref(), Some("https://custom"));
    }

    #[test]
    fn missing_override_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, MigrateError::ConfigNotFound { .. }));
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
