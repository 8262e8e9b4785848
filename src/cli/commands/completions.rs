//! Shell completions generation.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "octomigrate";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Render the completion script for the configured shell.
    pub fn render(&self) -> Result<String> {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, &mut buf);
        String::from_utf8(buf).map_err(|e| anyhow::Error::from(e).into())
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.output(self.render()?.trim_end());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap_complete::Shell;

    fn render(shell: Shell) -> String {
        CompletionsCommand::new(CompletionsArgs { shell })
            .render()
            .unwrap()
    }

    #[test]
    fn bash_completions_mention_subcommands() {
        let output = render(Shell::Bash);
        assert!(output.contains("octomigrate"));
        assert!(output.contains("complete"));
        assert!(output.contains("migrate"));
    }

    #[test]
    fn zsh_and_fish_completions_render() {
        assert!(render(Shell::Zsh).contains("octomigrate"));
        assert!(render(Shell::Fish).contains("octomigrate"));
    }

    #[test]
    fn execute_writes_script() {
        let mut ui = MockUI::new();
        CompletionsCommand::new(CompletionsArgs { shell: Shell::Bash })
            .execute(&mut ui)
            .unwrap();
        assert!(ui.output_text().contains("octomigrate"));
    }
}
