use std::path::Path;

use super::StaticConfig;
use super::validators::validate_config;
use crate::errors::Result;

/// Resolve the session configuration
///
/// Loads `teleop.toml` (or `path`), applies `TELEOP__*` environment
/// overrides and then `overrides`, and validates the result.
pub fn load_config<F>(path: Option<&Path>, overrides: F) -> Result<StaticConfig>
where
    F: FnOnce(&mut StaticConfig),
{
    load_config_from(path, None, overrides)
}

/// [`load_config`] with an explicit environment instead of the process one
pub fn load_config_from<F>(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
    overrides: F,
) -> Result<StaticConfig>
where
    F: FnOnce(&mut StaticConfig),
{
    let mut config = StaticConfig::load_with_env(path, env)?;
    overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}
