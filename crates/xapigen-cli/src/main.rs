//! xapigen CLI - XenAPI binding generator
//!
//! Commands:
//! - `xapigen generate` - Generate bindings from a description document
//! - `xapigen classify` - Show how a type-expression is parsed and bound

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xapigen_cli::generate;
use xapigen_core::prelude::*;

#[derive(Parser)]
#[command(name = "xapigen")]
#[command(author, version, about = "Generate typed XenAPI client bindings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings from a description document
    Generate {
        /// Path to xapigen.toml (default: ./xapigen.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Description document (overrides the config file)
        #[arg(short, long)]
        description: Option<PathBuf>,

        /// Output location, replaced on every run (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory of hand-written extensions (overrides the config file)
        #[arg(short, long)]
        extras: Option<PathBuf>,

        /// Fail when any message is skipped for an unsupported type-expression
        #[arg(long)]
        strict: bool,

        /// Print the planned output tree instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how a type-expression is parsed and bound
    Classify {
        /// Type-expression, e.g. "(string -> VM ref) map"
        expr: String,

        /// Object type owning the message (decides record bindability)
        #[arg(long, default_value = "VM")]
        owner: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            description,
            output,
            extras,
            strict,
            dry_run,
            verbose,
        } => {
            let mut config = load_config(config)?;
            if let Some(description) = description {
                config.generator.description = description;
            }
            if let Some(output) = output {
                config.generator.output = output;
            }
            if let Some(extras) = extras {
                config.generator.extras = extras;
            }
            config.generator.strict |= strict;
            config.validate()?;

            let level = if verbose {
                "debug"
            } else {
                config.generator.log_level.as_str()
            };
            init_logging(level);

            generate::run(&config, dry_run)?;
        }
        Commands::Classify { expr, owner } => {
            let parsed = TypeExpr::parse(&expr);
            println!("expression: {parsed:?}");
            if !parsed.is_supported() {
                println!("            (outside the type-expression grammar)");
            }
            println!("parameter:  {:?}", ParamShape::classify(&parsed));
            println!("result:     {:?}", ResultShape::classify(&parsed, &owner));
        }
    }

    Ok(())
}

/// Load the config file, or the defaults when none is given and `xapigen.toml`
/// is absent.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => {
            let default = PathBuf::from("xapigen.toml");
            if default.is_file() {
                Ok(Config::from_file(default)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}
