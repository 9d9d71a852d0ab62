//! # cubetrack
//!
//! CLI for the cubetrack cube model, scramble tracker and CFOP analyzer.
//!
//! ## Commands
//!
//! - `apply`: Apply a move sequence to a solved cube
//! - `analyze`: Classify a cube state into a CFOP stage
//! - `track`: Follow a scramble through moves read from stdin
//! - `init-config`: Write the default configuration file
//!
//! ## Example
//!
//! ```bash
//! # Show the cube after a sequence
//! cubetrack apply "R U R' U'"
//!
//! # Classify a state given as 54 color letters
//! cubetrack analyze --facelets "WWWWWWWWW YYYYYYYYY ..."
//!
//! # Follow a scramble; type moves as the cube reports them
//! cubetrack track --scramble "R U2 F' L"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{analyze, apply, init_config, track};
use config::Config;

/// Smart cube scramble tracker and CFOP analyzer.
#[derive(Parser, Debug)]
#[command(name = "cubetrack")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: config.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a move sequence to a solved cube and show the result
    Apply {
        /// Moves in standard notation, e.g. "R U R' U'"
        moves: String,
    },

    /// Classify a cube state into a CFOP stage
    Analyze {
        /// Moves applied to a solved cube
        #[arg(long, conflicts_with = "facelets", required_unless_present = "facelets")]
        moves: Option<String>,

        /// 54 color letters (W Y R O B G), faces in U D F B L R order
        #[arg(long, conflicts_with = "moves")]
        facelets: Option<String>,
    },

    /// Follow a scramble through moves read from stdin
    Track {
        /// The scramble to follow
        #[arg(long, short)]
        scramble: String,

        /// Accept two quarter turns for an expected half turn
        #[arg(long)]
        split_half_turns: bool,
    },

    /// Write the default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig = cli.command {
        let path = match cli.config {
            Some(path) => path,
            None => config::default_path().context("Could not determine home directory")?,
        };
        return init_config::run(&path).await;
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging.filter);
    let json = cli.json || config.output.json;
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Apply { moves } => {
            apply::run(&moves, json, &mut out)?;
        }
        Commands::Analyze { moves, facelets } => {
            let state = if let Some(text) = facelets {
                analyze::state_from_facelets(&text)?
            } else if let Some(text) = moves {
                analyze::state_from_moves(&text)?
            } else {
                anyhow::bail!("Must specify either --moves or --facelets");
            };
            analyze::run(&state, json, &mut out)?;
        }
        Commands::Track {
            scramble,
            split_half_turns,
        } => {
            let mut tracker_config = config.tracker.tracker_config();
            tracker_config.split_half_turns |= split_half_turns;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            track::run(tracker_config, &scramble, stdin, json, &mut out).await?;
        }
        // Runs before the configuration is loaded.
        Commands::InitConfig => {}
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the configured filter.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
