//! Command-line interface definitions using clap
//!
//! Every pipeline stage is its own subcommand so an external scheduler can
//! invoke them independently.

use clap::{Parser, Subcommand};

/// Pulso - hourly social engagement pipeline for sports clubs
#[derive(Parser)]
#[command(name = "pulso")]
#[command(version)]
#[command(about = "Collect, normalize and aggregate club engagement metrics", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Collect one hourly bucket of metrics for every active club and source
    Collect,

    /// Normalize the previous hourly bucket per source
    Normalize,

    /// Collect, then normalize the same bucket
    Hourly,

    /// Club-level daily rollup (daily_aggregations_v2)
    AggregateDaily,

    /// Club × source daily rollup (daily_aggregations)
    AggregateSources,

    /// Run both daily rollups, club-level first
    Aggregate,

    /// Start the read-only reporting API
    #[cfg(feature = "server")]
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
