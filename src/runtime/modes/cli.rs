//! CLI mode
//!
//! This module delegates to the actual CLI implementation.

use crate::cli::Commands;
use crate::config::get_config;
use crate::interfaces::cli::CliError;

/// Run CLI mode
///
/// **Note**: Configuration and logging must be initialized before calling this function
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    let config = get_config();
    crate::interfaces::cli::run_cli_command(cmd, &config).await
}
