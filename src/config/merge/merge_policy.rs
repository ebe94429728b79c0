//! Merge policy: defaults are the lowest layer of every load.

use crate::config::BrowseConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with `BrowseConfig::default()`.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&BrowseConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
