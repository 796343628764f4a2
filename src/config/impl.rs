use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config_from() first.")
        .load_full()
}

/// Initialize the global configuration from an explicit file path, or
/// "config.toml" in the current directory when `path` is `None`.
///
/// Only the first successful call has an effect. A config that fails to
/// parse is an error rather than a silent fallback to defaults.
///
/// # Examples
/// ```no_run
/// use dailyqr::config::init_config_from;
/// init_config_from(None).expect("valid config");
/// ```
pub fn init_config_from(path: Option<&str>) -> Result<(), config::ConfigError> {
    if CONFIG.get().is_some() {
        return Ok(());
    }
    let loaded = StaticConfig::load(path)?;
    let _ = CONFIG.set(ArcSwap::from_pointee(loaded));
    Ok(())
}
