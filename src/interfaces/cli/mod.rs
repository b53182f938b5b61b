//! CLI interface module
//!
//! This module provides command-line entry points for the pipeline stages.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::PulsoError;
use crate::pipeline::RandomProducer;
use crate::storage::StorageFactory;
use commands::{
    aggregate_all, aggregate_daily, aggregate_sources, collect, config_generate, hourly, normalize,
};

#[derive(Debug)]
pub enum CliError {
    /// 流水线或存储返回的错误
    Pipeline(PulsoError),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Pipeline(err) => err.format_simple(),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Pipeline(err) => err.format_colored(),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<PulsoError> for CliError {
    fn from(err: PulsoError) -> Self {
        CliError::Pipeline(err)
    }
}

/// Run a CLI command from clap-parsed input
///
/// 存储客户端在这里按次构造，命令结束即释放。
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generate doesn't need DB connection
    match cmd {
        Commands::Config { action } => {
            let ConfigCommands::Generate { output_path, force } = action;
            return config_generate(output_path, force).await;
        }
        #[cfg(feature = "server")]
        Commands::Serve => {
            return Err(CliError::CommandError(
                "serve is not a pipeline command".to_string(),
            ));
        }
        _ => {}
    }

    let storage = StorageFactory::create(&config.database).await?;

    match cmd {
        Commands::Collect => {
            let producer = RandomProducer::new(&config.pipeline.mock)?;
            collect(&storage, &producer, &config.pipeline).await?;
        }
        Commands::Normalize => {
            normalize(&storage).await?;
        }
        Commands::Hourly => {
            let producer = RandomProducer::new(&config.pipeline.mock)?;
            hourly(&storage, &producer, &config.pipeline).await?;
        }
        Commands::AggregateDaily => {
            aggregate_daily(&storage).await?;
        }
        Commands::AggregateSources => {
            aggregate_sources(&storage).await?;
        }
        Commands::Aggregate => aggregate_all(&storage).await?,
        // 已在连接存储之前返回
        #[cfg(feature = "server")]
        Commands::Serve => {}
        Commands::Config { .. } => {}
    }

    Ok(())
}
