//! CLI for mapturner.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_check, run_turn, TurnOptions};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mapturner")]
#[command(about = "Turn shapefiles, GeoJSON and CSV into one TopoJSON map file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build the merged TopoJSON file described by a config.
    Turn {
        /// Path to the TOML configuration file.
        config: PathBuf,

        /// Path for the TopoJSON output file.
        output_path: PathBuf,

        /// Working directory for downloads, extracted archives and per-layer files
        /// (overrides `data_dir` in the config).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Stop at the first ogr2ogr/topojson failure instead of finishing the run.
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a config and check that the external utilities can be launched.
    Check {
        /// Path to the TOML configuration file.
        config: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        tracing::debug!("parsed command: {:?}", cli.command);

        match cli.command {
            CliCommand::Turn {
                config,
                output_path,
                data_dir,
                fail_fast,
            } => run_turn(&TurnOptions {
                config,
                output_path,
                data_dir,
                fail_fast,
            })?,
            CliCommand::Check { config } => run_check(&config)?,
        }

        Ok(())
    }
}
