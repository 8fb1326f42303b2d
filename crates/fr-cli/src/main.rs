use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fr_cli::tracing_init::init_tracing;
use fr_cli::{cmd_check, cmd_order};
use fr_config::CheckConfig;
use fr_lang::{CheckMode, Options};

#[derive(Parser)]
#[command(name = "franca-check", about = "Semantic validation for linked Franca IDL models")]
struct Cli {
    /// Path to franca-check.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a linked model snapshot and print its diagnostics
    Check {
        /// Model snapshot (JSON)
        model: PathBuf,
        /// Override validation.mode (fast, normal, expensive)
        #[arg(long)]
        mode: Option<CheckMode>,
        /// Exit with failure on warnings as well as errors
        #[arg(long)]
        deny_warnings: bool,
        /// Print diagnostics as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Print the types of a model in dependency order
    Order {
        /// Model snapshot (JSON)
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, base_dir) = match &cli.config {
        Some(path) => {
            let config = CheckConfig::load(path)?;
            let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (config, base_dir)
        }
        None => (CheckConfig::default(), std::env::current_dir()?),
    };
    let guard = init_tracing(&config.logging, &base_dir)?;

    let passed = match cli.command {
        Commands::Check {
            model,
            mode,
            deny_warnings,
            json,
        } => {
            let mut options = Options::from(config.validation);
            if let Some(mode) = mode {
                options.mode = mode;
            }
            let deny = deny_warnings || config.validation.deny_warnings;
            cmd_check::run(&model, options, deny, json)?
        }
        Commands::Order { model } => {
            cmd_order::run(&model)?;
            true
        }
    };

    // Flush the file writer before a failing exit.
    drop(guard);
    if !passed {
        process::exit(1);
    }
    Ok(())
}
