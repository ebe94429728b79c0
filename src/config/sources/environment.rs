//! Environment variable source: REPOBROWSE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses REPOBROWSE_ prefix and __ as separator for nested keys,
/// e.g. `REPOBROWSE_REPOSITORY__BRANCH=dev` or `REPOBROWSE_HTTP__TOKEN=...`.
/// Flat names such as `REPOBROWSE_LOG` map to no config key and are read by
/// the logging setup instead.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("REPOBROWSE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
