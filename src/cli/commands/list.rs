//! The `environments` and `projects` commands.

use anyhow::Context;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::source::VariableSource;
use crate::ui::UserInterface;
use crate::variables::sort_names;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// What to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Environments,
    Projects,
}

impl ListKind {
    fn label(self) -> &'static str {
        match self {
            Self::Environments => "environments",
            Self::Projects => "projects",
        }
    }
}

/// Lists environment or project names, sorted case-insensitively.
pub struct ListCommand {
    context: CommandContext,
    kind: ListKind,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(context: CommandContext, kind: ListKind, args: ListArgs) -> Self {
        Self {
            context,
            kind,
            args,
        }
    }

    /// Run against an already constructed source.
    pub fn run_with(
        &self,
        source: &dyn VariableSource,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let mut names = match self.kind {
            ListKind::Environments => source
                .list_environments()?
                .into_iter()
                .map(|env| env.name)
                .collect(),
            ListKind::Projects => source.list_project_names()?,
        };
        sort_names(&mut names);

        if self.args.json {
            let json = serde_json::to_string_pretty(&names)
                .with_context(|| format!("Failed to serialize {}", self.kind.label()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if names.is_empty() {
            ui.message(&format!("No {} found", self.kind.label()));
            return Ok(CommandResult::success());
        }

        for name in &names {
            ui.output(name);
        }
        ui.detail(&format!("{} {}", names.len(), self.kind.label()));

        Ok(CommandResult::success())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let client = self.context.octopus(&config)?;
        self.run_with(&client, ui)
    }
}
