//! The `migrate` command.
//!
//! Runs one configured migration, every configured migration in name
//! order, or a single ad-hoc migration described by flags. The first
//! failure stops the run; groups already written stay written.

use crate::cli::args::MigrateArgs;
use crate::config::{into_result, validate_migration, MigrateConfig, MigrationConfig};
use crate::error::{MigrateError, Result};
use crate::migration::{MigrateOptions, Migration, MigrationReport, Migrator};
use crate::sink::{InMemorySink, VariableSink};
use crate::source::VariableSource;
use crate::ui::{Table, UserInterface};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

const AD_HOC: &str = "ad-hoc";

/// The migrate command implementation.
pub struct MigrateCommand {
    context: CommandContext,
    args: MigrateArgs,
}

impl MigrateCommand {
    pub fn new(context: CommandContext, args: MigrateArgs) -> Self {
        Self { context, args }
    }

    /// Work out which migrations to run, validated.
    pub fn planned_migrations(&self, config: &MigrateConfig) -> Result<Vec<(String, Migration)>> {
        if let Some(group) = self.args.group {
            let ad_hoc = MigrationConfig {
                library: self.args.library.clone(),
                project: self.args.project.clone(),
                environment: self.args.env.clone(),
                variable_group: group,
                exclude_secrets: self.args.exclude_secrets,
            };
            into_result(validate_migration(AD_HOC, &ad_hoc))?;
            return Ok(vec![(AD_HOC.to_string(), ad_hoc.to_migration())]);
        }

        let selected: Vec<(&String, &MigrationConfig)> = match &self.args.name {
            Some(name) => {
                let entry = config.migrations.get_key_value(name).ok_or_else(|| {
                    MigrateError::UnknownMigration { name: name.clone() }
                })?;
                vec![entry]
            }
            None => config.migrations.iter().collect(),
        };

        if selected.is_empty() {
            return Err(MigrateError::ConfigValidationError {
                message: "No migrations configured; add one under 'migrations' or pass --group"
                    .to_string(),
            });
        }

        into_result(
            selected
                .iter()
                .flat_map(|(name, migration)| validate_migration(name, migration))
                .collect(),
        )?;

        Ok(selected
            .into_iter()
            .map(|(name, entry)| {
                let mut migration = entry.to_migration();
                migration.exclude_secrets |= self.args.exclude_secrets;
                (name.clone(), migration)
            })
            .collect())
    }

    /// Run against already constructed endpoints.
    pub fn run_with(
        &self,
        config: &MigrateConfig,
        source: &dyn VariableSource,
        sink: &dyn VariableSink,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let migrations = self.planned_migrations(config)?;
        let options = MigrateOptions {
            dry_run: self.args.dry_run,
        };
        let migrator = Migrator::new(source, sink);

        for (name, migration) in &migrations {
            ui.message(&format!(
                "{}: {} -> group {}",
                name,
                migration.selection.describe(),
                migration.variable_group
            ));
            let report = migrator.run(migration, options)?;
            show_report(ui, &report);
        }

        Ok(CommandResult::success())
    }
}

fn show_report(ui: &mut dyn UserInterface, report: &MigrationReport) {
    for name in &report.masked {
        ui.warning(&format!(
            "'{}' is sensitive; group {} receives a placeholder value",
            name, report.variable_group
        ));
    }
    for name in &report.excluded {
        ui.detail(&format!("Skipped sensitive '{}'", name));
    }

    if report.dry_run {
        let mut table = Table::new(&["Name", "Value"]);
        for (name, value) in &report.written {
            table.add_row([name.as_str(), value.as_str()]);
        }
        ui.output(&table.render());
        ui.success(&format!(
            "Dry run: {} variable(s) would be written to group {}",
            report.written.len(),
            report.variable_group
        ));
        return;
    }

    for name in report.written.keys() {
        ui.detail(&format!("  {}", name));
    }
    ui.success(&format!(
        "Variable group {} updated with {} variable(s)",
        report.variable_group,
        report.written.len()
    ));
}

impl Command for MigrateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let source = self.context.octopus(&config)?;

        // A dry run never writes, so it works without destination credentials.
        let sink: Box<dyn VariableSink> = if self.args.dry_run {
            Box::new(InMemorySink::new())
        } else {
            Box::new(self.context.azure_devops(&config)?)
        };

        self.run_with(&config, &source, sink.as_ref(), ui)
    }
}
