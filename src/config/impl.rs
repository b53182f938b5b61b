use std::sync::{Arc, OnceLock};

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// The configuration only carries settings; store clients are never
/// kept here and are constructed per invocation.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from the given TOML path (default "config.toml").
/// A missing file means in-memory defaults; an unreadable or invalid one
/// is an error and nothing is installed.
///
/// # Examples
/// ```no_run
/// use pulso::config::init_config;
/// init_config(None).unwrap();
/// ```
pub fn init_config(path: Option<&str>) -> Result<()> {
    if CONFIG.get().is_some() {
        return Ok(());
    }
    let config = StaticConfig::load(path)?;
    let _ = CONFIG.set(Arc::new(config));
    Ok(())
}
