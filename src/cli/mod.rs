//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod demo;
mod sprites;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// mazecast - Render maze-chase demo media from a text map
#[derive(Parser)]
#[command(name = "mazecast")]
#[command(about = "mazecast - Render a maze-chase demo (screenshot, strip, GIF) from a text map")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the demo animation and its stills
    Demo {
        /// Config file (default: mazecast.toml found by walking up from the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Map file to render
        #[arg(long)]
        map: Option<PathBuf>,

        /// Directory of sprite PNGs
        #[arg(long, conflicts_with = "procedural")]
        sprites: Option<PathBuf>,

        /// Draw sprites procedurally, ignoring any configured sprite directory
        #[arg(long)]
        procedural: bool,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Frame delay in milliseconds
        #[arg(long, value_name = "MS")]
        delay: Option<u32>,
    },

    /// Draw the default sprite set and write it as PNG files
    Sprites {
        /// Output directory
        #[arg(short, long, default_value = "maze")]
        out: PathBuf,
    },
}

/// Log level for a `-v` count.
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn init_tracing(verbose: u8) {
    // A subscriber may already be installed when embedded; keep it
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Demo { config, map, sprites, procedural, out, delay } => {
            let overrides = crate::config::CliOverrides { map, sprites, procedural, out, delay_ms: delay };
            demo::run_demo_command(config.as_deref(), &overrides)
        }
        Commands::Sprites { out } => sprites::run_sprites(&out),
    }
}
