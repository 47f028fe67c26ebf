//! Configuration management.
//!
//! Settings come from a TOML file plus `PULSE__`-prefixed environment
//! overrides. The engine reloads them at the start of every cycle and works
//! from an immutable snapshot for the rest of that cycle.

mod settings;

pub use settings::{
    CacheSettings, EngineSettings, LoggingSettings, ProviderSettings, Settings, TradingSettings,
    WebhookSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("PULSE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
