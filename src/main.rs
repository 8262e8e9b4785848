//! octomigrate CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use octomigrate::cli::{Cli, CommandDispatcher};
use octomigrate::config::find_project_root;
use octomigrate::error::MigrateError;
use octomigrate::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("octomigrate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("octomigrate=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn hint_for(error: &MigrateError) -> Option<&'static str> {
    match error {
        MigrateError::ConfigValidationError { .. } => {
            Some("Settings come from .octomigrate/config.yml or OCTOPUS_*/AZURE_DEVOPS_* variables")
        }
        MigrateError::UnknownMigration { .. } => {
            Some("Configured migrations are listed under 'migrations' in the config file")
        }
        MigrateError::NotFound { .. } => {
            Some("Names are matched case-insensitively; try `octomigrate projects` or `octomigrate environments`")
        }
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("octomigrate starting with command: {:?}", cli.command);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let mut ui = create_ui(output_mode, cli.no_color);

    let project_root = match &cli.project_root {
        Some(root) => root.clone(),
        None => {
            let cwd = std::env::current_dir().unwrap_or_default();
            find_project_root(&cwd).unwrap_or(cwd)
        }
    };

    let dispatcher = CommandDispatcher::new(project_root, cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            if let Some(hint) = hint_for(&e) {
                ui.show_hint(hint);
            }
            ExitCode::from(1)
        }
    }
}
