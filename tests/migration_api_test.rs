//! End-to-end resolution and migration through the public API, using the
//! in-memory source and sink.

use octomigrate::error::{MigrateError, ResourceKind};
use octomigrate::migration::{resolve_selection, MigrateOptions, Migration, Migrator, Selection};
use octomigrate::sink::InMemorySink;
use octomigrate::source::InMemorySource;
use octomigrate::variables::{merge, resolve, EffectiveVariable, RawVariable, SECRET_MARKER};

const PROD: &str = "Environments-1";
const DEV: &str = "Environments-2";

fn source() -> InMemorySource {
    InMemorySource::new()
        .with_environment(PROD, "Prod")
        .with_environment(DEV, "Dev")
        .with_library(
            "demo-library",
            vec![
                RawVariable::new("ConnectionString", "Server=dev").scoped_to([DEV]),
                RawVariable::new("ConnectionString", "Server=prod").scoped_to([PROD]),
                RawVariable::new("LogLevel", "Info"),
                RawVariable::new("ApiKey", "hunter2").sensitive(),
            ],
        )
        .with_project(
            "Demo",
            vec![
                RawVariable::new("LogLevel", "Debug").scoped_to([DEV]),
                RawVariable::new("FeatureFlag", "on"),
            ],
        )
}

fn pairs(variables: &[EffectiveVariable]) -> Vec<(&str, &str)> {
    variables
        .iter()
        .map(|v| (v.name.as_str(), v.value.as_str()))
        .collect()
}

#[test]
fn scoped_value_beats_unscoped_for_matching_environment() {
    let variables = vec![
        RawVariable::new("Port", "8080"),
        RawVariable::new("Port", "9090").scoped_to([PROD]),
    ];

    assert_eq!(pairs(&resolve(&variables, Some(PROD))), vec![("Port", "9090")]);
    assert_eq!(pairs(&resolve(&variables, Some(DEV))), vec![("Port", "8080")]);
    assert_eq!(pairs(&resolve(&variables, None)), vec![("Port", "8080")]);
}

#[test]
fn project_wins_over_library_on_merge() {
    let library = vec![
        EffectiveVariable::new("LogLevel", "Info"),
        EffectiveVariable::new("Shared", "yes"),
    ];
    let project = vec![EffectiveVariable::new("loglevel", "Debug")];

    let merged = merge(&library, &project);

    // Names are case-sensitive keys, so both spellings survive.
    assert_eq!(
        pairs(&merged),
        vec![("LogLevel", "Info"), ("loglevel", "Debug"), ("Shared", "yes")]
    );
}

#[test]
fn selection_resolves_library_and_project_for_environment() {
    let resolution = resolve_selection(
        &source(),
        &Selection::library("DEMO-LIBRARY")
            .with_project("demo")
            .in_environment("dev"),
    )
    .unwrap();

    assert_eq!(resolution.environment.unwrap().name, "Dev");
    assert_eq!(
        pairs(&resolution.variables),
        vec![
            ("ApiKey", SECRET_MARKER),
            ("ConnectionString", "Server=dev"),
            ("FeatureFlag", "on"),
            ("LogLevel", "Debug"),
        ]
    );
}

#[test]
fn missing_environment_is_not_found() {
    let err = resolve_selection(
        &source(),
        &Selection::library("demo-library").in_environment("Staging"),
    )
    .unwrap_err();

    match err {
        MigrateError::NotFound { kind, name } => {
            assert_eq!(kind, ResourceKind::Environment);
            assert_eq!(name, "Staging");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn migration_upserts_without_touching_other_keys() {
    let source = source();
    let sink = InMemorySink::new().with_group(77, [("Untouched", "1"), ("LogLevel", "Warn")]);
    let migration = Migration {
        selection: Selection::library("demo-library").in_environment("Prod"),
        variable_group: 77,
        exclude_secrets: false,
    };

    let report = Migrator::new(&source, &sink)
        .run(&migration, MigrateOptions::default())
        .unwrap();

    assert_eq!(report.masked, vec!["ApiKey"]);
    let group = sink.group(77).unwrap();
    assert_eq!(group["Untouched"], "1");
    assert_eq!(group["LogLevel"], "Info");
    assert_eq!(group["ConnectionString"], "Server=prod");
    assert_eq!(group["ApiKey"], SECRET_MARKER);
}

#[test]
fn rerunning_a_migration_is_idempotent() {
    let source = source();
    let sink = InMemorySink::new().with_group(5, std::iter::empty::<(&str, &str)>());
    let migration = Migration {
        selection: Selection::project("Demo").in_environment("Dev"),
        variable_group: 5,
        exclude_secrets: true,
    };
    let migrator = Migrator::new(&source, &sink);

    migrator.run(&migration, MigrateOptions::default()).unwrap();
    let first = sink.group(5).unwrap();
    migrator.run(&migration, MigrateOptions::default()).unwrap();

    assert_eq!(sink.group(5).unwrap(), first);
    assert_eq!(sink.write_count(), 2);
}
