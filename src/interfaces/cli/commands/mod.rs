//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod stages;

pub use config_gen::config_generate;
pub use stages::{aggregate_all, aggregate_daily, aggregate_sources, collect, hourly, normalize};
