//! grailx - Grail prompt and plugin helper
//!
//! Aggregates the project manifest and its plugins into a prompt for an AI
//! agent working in a terminal.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grailx::commands::{self, OutputFormat, PluginOperation};
use grailx::config::ProjectPaths;

const USAGE: &str = "usage: grailx prompt | grailx run --agent '<command>' | grailx plugins [list|add|rm]";
const PLUGINS_USAGE: &str = "usage: grailx plugins [list|add|rm]";

#[derive(Parser)]
#[command(name = "grailx")]
#[command(author, version, about = "Grail prompt and plugin helper for terminal AI agents")]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "GRAIL_ROOT")]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the agent prompt built from all manifests
    Prompt {
        /// Print the aggregated manifest as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt, then the agent command to run
    Run {
        /// Agent command line
        #[arg(long, default_value = "")]
        agent: String,
    },

    /// Manage registered plugins
    Plugins {
        #[command(subcommand)]
        operation: PluginOperationCli,
    },
}

#[derive(Subcommand)]
enum PluginOperationCli {
    /// List registered plugins in merge order
    List {
        /// Also show the manifest path each entry resolves to
        #[arg(long)]
        resolved: bool,
    },

    /// Register a plugin by name or manifest path
    Add {
        /// Plugin name or path to a .json manifest
        entry: Option<String>,
    },

    /// Unregister a plugin
    Rm {
        /// Plugin name or path, exactly as registered
        entry: Option<String>,
    },
}

impl From<PluginOperationCli> for PluginOperation {
    fn from(op: PluginOperationCli) -> Self {
        match op {
            PluginOperationCli::List { resolved } => PluginOperation::List { resolved },
            PluginOperationCli::Add { entry } => PluginOperation::Add {
                entry: entry.unwrap_or_default(),
            },
            PluginOperationCli::Rm { entry } => PluginOperation::Remove {
                entry: entry.unwrap_or_default(),
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GRAIL_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{}", usage_for(std::env::args().skip(1)));
            std::process::exit(2);
        }
    }
}

/// Usage line for a rejected command line, picked by its first subcommand word
fn usage_for(args: impl IntoIterator<Item = String>) -> &'static str {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            // value of the global flag, not a subcommand
            "--root" => {
                args.next();
            }
            flag if flag.starts_with('-') => {}
            "plugins" => return PLUGINS_USAGE,
            _ => return USAGE,
        }
    }
    USAGE
}

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let paths = match cli.root {
        Some(root) => ProjectPaths::new(root),
        None => ProjectPaths::from_cwd()?,
    };
    tracing::debug!(root = %paths.root.display(), "project root");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Prompt { json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Prompt
            };
            commands::prompt(&paths, format, &mut stdout)?;
        }
        Commands::Run { agent } => {
            commands::run(&paths, &agent, &mut stdout)?;
        }
        Commands::Plugins { operation } => {
            commands::plugins(&paths, operation.into(), &mut stdout)?;
        }
    }

    Ok(())
}
