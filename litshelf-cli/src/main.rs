// SPDX-License-Identifier: MIT

//! `litshelf` — create, open and list project workspaces.
//!
//! Success prints pretty JSON on stdout; typed failures print an
//! `{"error", "diagnostic"}` object on stderr and exit with code 2.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use litshelf_schema::{CANONICAL_SCHEMA_SQL, expected_schema};
use litshelf_workspace::{ProjectConfig, create_project, list_projects, open_project};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod error;

use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "litshelf", version, about = "Project workspace manager for literature libraries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new project workspace
    Create {
        /// project_name (lowercase snake_case)
        #[arg(long)]
        name: String,
        /// Topic prompt
        #[arg(long)]
        topic: String,
        /// Base projects directory (default from config, else ./projects)
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Sources (v1: pmc biorxiv)
        #[arg(long, num_args = 1..)]
        sources: Option<Vec<String>>,
        /// Optional notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Open an existing project (validate manifest + schema)
    Open {
        /// Path to the project directory
        #[arg(long)]
        project_dir: PathBuf,
    },
    /// List projects under the base directory
    List {
        /// Base projects directory (default from config, else ./projects)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let payload = serde_json::json!({
                "error": err.message(),
                "diagnostic": err.diagnostic(),
            });
            eprintln!("{}", to_pretty(&payload));
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let defaults = Config::load()?;
    debug!("default base directory: {}", defaults.base_dir.display());

    match cli.command {
        Command::Create {
            name,
            topic,
            base_dir,
            sources,
            notes,
        } => {
            let mut project = ProjectConfig::new(
                name,
                topic,
                base_dir.unwrap_or_else(|| defaults.base_dir.clone()),
            );
            project.sources = sources.unwrap_or_else(|| defaults.sources.clone());
            project.notes = notes;

            let info = create_project(&project, &expected_schema(), CANONICAL_SCHEMA_SQL)?;
            println!("{}", to_pretty(&info));
        }
        Command::Open { project_dir } => {
            let info = open_project(&project_dir, &expected_schema(), CANONICAL_SCHEMA_SQL)?;
            println!("{}", to_pretty(&info));
        }
        Command::List { base_dir } => {
            let base = base_dir.unwrap_or_else(|| defaults.base_dir.clone());
            let projects = list_projects(&base)?;
            println!("{}", to_pretty(&projects));
        }
    }
    Ok(())
}

fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
