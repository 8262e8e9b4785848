//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Migrate Octopus Deploy variables into Azure DevOps variable groups.
#[derive(Debug, Parser)]
#[command(name = "octomigrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .octomigrate/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List environments on the Octopus server
    Environments(ListArgs),

    /// List projects on the Octopus server
    Projects(ListArgs),

    /// Show the effective variables for a library set and/or project
    Show(ShowArgs),

    /// Write effective variables into Azure DevOps variable groups
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `environments` and `projects` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["library", "project"])
))]
pub struct ShowArgs {
    /// Library variable set name
    #[arg(long, value_name = "NAME")]
    pub library: Option<String>,

    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Environment to resolve for (unscoped variables only if omitted)
    #[arg(long, value_name = "ENV", conflicts_with = "raw")]
    pub env: Option<String>,

    /// List every variable with its scope instead of resolving
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `migrate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MigrateArgs {
    /// Configured migration to run (all configured migrations if omitted)
    #[arg(value_name = "NAME", conflicts_with_all = ["library", "project", "env", "group"])]
    pub name: Option<String>,

    /// Ad-hoc: library variable set name
    #[arg(long, value_name = "NAME", requires = "group")]
    pub library: Option<String>,

    /// Ad-hoc: project name
    #[arg(long, value_name = "NAME", requires = "group")]
    pub project: Option<String>,

    /// Ad-hoc: environment name
    #[arg(long, value_name = "ENV", requires = "group")]
    pub env: Option<String>,

    /// Ad-hoc: destination variable group id
    #[arg(long, value_name = "ID")]
    pub group: Option<u32>,

    /// Resolve and print without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Leave sensitive variables out of the destination
    #[arg(long)]
    pub exclude_secrets: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
