//! Environment variable overrides.
//!
//! Connection settings, especially credentials, can come from the process
//! environment instead of config files. Non-empty environment values
//! replace whatever the files set.

use std::collections::HashMap;

use super::schema::MigrateConfig;

pub const OCTOPUS_URL: &str = "OCTOPUS_URL";
pub const OCTOPUS_API_KEY: &str = "OCTOPUS_API_KEY";
pub const OCTOPUS_SPACE: &str = "OCTOPUS_SPACE";
pub const AZURE_DEVOPS_URL: &str = "AZURE_DEVOPS_URL";
pub const AZURE_DEVOPS_PROJECT: &str = "AZURE_DEVOPS_PROJECT";
pub const AZURE_DEVOPS_PAT: &str = "AZURE_DEVOPS_PAT";

/// Load environment variables from the current process.
pub fn load_system_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Apply environment overrides to a loaded config.
pub fn apply_env_overrides(config: &mut MigrateConfig, env: &HashMap<String, String>) {
    let get = |key: &str| {
        env.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    };

    let overrides = [
        (&mut config.octopus.url, OCTOPUS_URL),
        (&mut config.octopus.api_key, OCTOPUS_API_KEY),
        (&mut config.octopus.space, OCTOPUS_SPACE),
        (&mut config.azure_devops.organization_url, AZURE_DEVOPS_URL),
        (&mut config.azure_devops.project, AZURE_DEVOPS_PROJECT),
        (&mut config.azure_devops.pat, AZURE_DEVOPS_PAT),
    ];

    for (field, key) in overrides {
        if let Some(value) = get(key) {
            tracing::debug!("Using {} from environment", key);
            *field = Some(value);
        }
    }
}
