//! Runtime configuration I/O operations.
//!
//! Config file discovery needs the `dirs` crate, so it lives apart from
//! config.rs and is only built with the runtime feature.

use crate::config::{BuilderConfig, ConfigError};
use std::path::{Path, PathBuf};

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line
    Explicit(PathBuf),
    /// `<config_dir>/pathtree/config.json`
    User(PathBuf),
    /// Built-in defaults
    Defaults,
}

/// Path to the user config file, whether or not it exists
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pathtree").join("config.json"))
}

/// Resolve the builder configuration.
///
/// An explicit path must exist and parse. Otherwise the user config file is
/// used when present, falling back to defaults.
pub fn resolve(explicit: Option<&Path>) -> Result<(BuilderConfig, ConfigSource), ConfigError> {
    resolve_with_user_path(explicit, user_config_path())
}

fn resolve_with_user_path(
    explicit: Option<&Path>,
    user_path: Option<PathBuf>,
) -> Result<(BuilderConfig, ConfigSource), ConfigError> {
    if let Some(path) = explicit {
        let config = BuilderConfig::load_from_file(path)?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Some(path) = user_path.filter(|p| p.exists()) {
        let config = BuilderConfig::load_from_file(&path)?;
        tracing::debug!("Loaded user config from {}", path.display());
        return Ok((config, ConfigSource::User(path)));
    }

    Ok((BuilderConfig::default(), ConfigSource::Defaults))
}
