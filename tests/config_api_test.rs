//! Integration tests for config module public API.

use octomigrate::config::{
    apply_env_overrides, load_config, load_merged_config, validate, MigrateConfig,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn project_with(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".octomigrate");
    fs::create_dir_all(&config_dir).unwrap();
    for (name, content) in files {
        fs::write(config_dir.join(name), content).unwrap();
    }
    temp
}

#[test]
fn full_config_workflow() {
    let temp = project_with(&[(
        "config.yml",
        r#"
octopus:
  url: https://octopus.contoso.local
azure_devops:
  organization_url: https://dev.azure.com/contoso
  project: NewProject
migrations:
  prod:
    library: demo-library
    environment: Prod
    variable_group: 123
"#,
    )]);

    let mut config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    let env: HashMap<String, String> = [
        ("OCTOPUS_API_KEY", "API-ENV"),
        ("AZURE_DEVOPS_PAT", "pat-env"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    apply_env_overrides(&mut config, &env);

    let octopus = config.octopus.settings().unwrap();
    assert_eq!(octopus.api_key, "API-ENV");
    let azure = config.azure_devops.settings().unwrap();
    assert_eq!(azure.pat, "pat-env");

    let migration = config.migrations["prod"].to_migration();
    assert_eq!(migration.variable_group, 123);
    assert_eq!(migration.selection.environment.as_deref(), Some("Prod"));
}

#[test]
fn config_merge_workflow() {
    let temp = project_with(&[
        (
            "config.yml",
            r#"
octopus:
  url: https://octopus.contoso.local
  space: Spaces-1
migrations:
  prod:
    project: Demo
    variable_group: 1
"#,
        ),
        (
            "config.local.yml",
            r#"
octopus:
  space: null
migrations:
  prod:
    exclude_secrets: true
  scratch:
    project: Sandbox
    variable_group: 2
"#,
        ),
    ]);

    let config = load_merged_config(temp.path()).unwrap();

    assert_eq!(config.octopus.space, None);
    assert!(config.migrations["prod"].exclude_secrets);
    assert_eq!(config.migrations.len(), 2);
}

#[test]
fn invalid_migration_fails_validation() {
    let temp = project_with(&[(
        "config.yml",
        r#"
migrations:
  broken:
    library: demo-library
    variable_group: 5
"#,
    )]);

    let config = load_merged_config(temp.path()).unwrap();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("'environment'"));
}

#[test]
fn override_file_replaces_discovery() {
    let temp = project_with(&[("config.yml", "migrations: { a: { project: A, variable_group: 1 } }")]);
    let custom = temp.path().join("other.yml");
    fs::write(&custom, "{}").unwrap();

    let config = load_config(temp.path(), Some(&custom)).unwrap();
    assert_eq!(config, MigrateConfig::default());
}
