use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fleetfront - headless page enhancement engine for the trailer
/// dealership site
#[derive(Parser)]
#[command(name = "fleetfront")]
#[command(about = "Headless page enhancement engine for the trailer dealership site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to an enhancement config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a page, attach the enhancement suite, and walk a scripted
    /// interaction trace
    Run {
        /// HTML file to enhance
        page: PathBuf,

        /// Fetch live fleet stats from this base URL after the trace
        #[arg(long)]
        stats_url: Option<String>,
    },

    /// Parse a page and report what the enhancement suite would bind to
    Inspect {
        /// HTML file to inspect
        page: PathBuf,
    },
}
