//! Mode routing
//!
//! Pipeline stages run through the CLI mode; the reporting API runs in
//! server mode. Both are selected by the parsed subcommand.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
