//! The `show` command.
//!
//! Prints the effective variables for a library set, a project, or both
//! merged, optionally for one environment. With `--raw` it lists every
//! variable of each selected set with its scope instead.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Context;
use serde::Serialize;

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::migration::{list_raw_variables, resolve_selection, Selection};
use crate::source::VariableSource;
use crate::ui::{Table, UserInterface};
use crate::variables::{compare_names, mask_value, EffectiveVariable, RawVariable, SetKind};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Resolved variables as printed by `show --json`.
#[derive(Debug, Serialize)]
struct ResolvedOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    variables: &'a [EffectiveVariable],
}

/// One row of `show --raw`.
#[derive(Debug, Serialize)]
struct RawRow {
    set: String,
    name: String,
    value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    environments: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    other_scopes: BTreeMap<String, BTreeSet<String>>,
}

impl RawRow {
    fn scope_label(&self) -> String {
        let mut parts = Vec::new();
        if !self.environments.is_empty() {
            parts.push(self.environments.join(", "));
        }
        for (dimension, values) in &self.other_scopes {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            parts.push(format!("{}: {}", dimension, values.join(", ")));
        }
        parts.join("; ")
    }
}

/// The show command implementation.
pub struct ShowCommand {
    context: CommandContext,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(context: CommandContext, args: ShowArgs) -> Self {
        Self { context, args }
    }

    fn selection(&self) -> Selection {
        Selection {
            library: self.args.library.clone(),
            project: self.args.project.clone(),
            environment: self.args.env.clone(),
        }
    }

    /// Run against an already constructed source.
    pub fn run_with(
        &self,
        source: &dyn VariableSource,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if self.args.raw {
            self.show_raw(source, ui)
        } else {
            self.show_resolved(source, ui)
        }
    }

    fn show_resolved(
        &self,
        source: &dyn VariableSource,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let selection = self.selection();
        let resolution = resolve_selection(source, &selection)?;

        if self.args.json {
            let output = ResolvedOutput {
                library: selection.library.as_deref(),
                project: selection.project.as_deref(),
                environment: resolution.environment.as_ref().map(|env| env.name.as_str()),
                variables: &resolution.variables,
            };
            let json = serde_json::to_string_pretty(&output)
                .context("Failed to serialize variables")?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&selection.describe());
        if resolution.environment.is_none() {
            ui.detail("No environment given; showing unscoped variables only");
        }

        if resolution.variables.is_empty() {
            ui.message("No variables");
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["Name", "Value"]);
        for variable in &resolution.variables {
            table.add_row([variable.name.as_str(), variable.value.as_str()]);
        }
        ui.output(&table.render());

        let masked = resolution
            .variables
            .iter()
            .filter(|v| v.is_masked())
            .count();
        if masked > 0 {
            ui.show_hint(&format!(
                "{} sensitive value(s) shown as their placeholder",
                masked
            ));
        }

        Ok(CommandResult::success())
    }

    fn show_raw(
        &self,
        source: &dyn VariableSource,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let sets: Vec<(SetKind, &str)> = [
            (SetKind::Library, self.args.library.as_deref()),
            (SetKind::Project, self.args.project.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, name)| name.map(|name| (kind, name)))
        .collect();

        let mut fetched = Vec::with_capacity(sets.len());
        for (kind, name) in sets {
            fetched.push((name, list_raw_variables(source, kind, name)?));
        }

        let environment_names: HashMap<String, String> = source
            .list_environments()?
            .into_iter()
            .map(|env| (env.id, env.name))
            .collect();

        let rows: Vec<RawRow> = fetched
            .iter()
            .flat_map(|(set, variables)| raw_rows(set, variables, &environment_names))
            .collect();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&rows).context("Failed to serialize variables")?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if rows.is_empty() {
            ui.message("No variables");
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["Set", "Name", "Value", "Scope"]);
        for row in &rows {
            table.add_row([
                row.set.clone(),
                row.name.clone(),
                row.value.clone(),
                row.scope_label(),
            ]);
        }
        ui.output(&table.render());

        Ok(CommandResult::success())
    }
}

/// Rows for one set, masked, in name order. Duplicates keep their source order.
fn raw_rows(
    set: &str,
    variables: &[RawVariable],
    environment_names: &HashMap<String, String>,
) -> Vec<RawRow> {
    let mut sorted: Vec<&RawVariable> = variables.iter().collect();
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));

    sorted
        .into_iter()
        .map(|variable| {
            let mut environments: Vec<String> = variable
                .scope
                .environments
                .iter()
                .flatten()
                .map(|id| environment_names.get(id).cloned().unwrap_or_else(|| id.clone()))
                .collect();
            environments.sort_by(|a, b| compare_names(a, b));

            RawRow {
                set: set.to_string(),
                name: variable.name.clone(),
                value: mask_value(variable),
                environments,
                other_scopes: variable.scope.other.clone(),
            }
        })
        .collect()
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let client = self.context.octopus(&config)?;
        self.run_with(&client, ui)
    }
}
