//! Configuration file loading.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use seedlimit_types::SeedingLimits;

/// Error variants for [`AppConfig::load`].
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub seeding_limits: SeedingLimits,
}

impl AppConfig {
    /// Reads and parses the configuration at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        let limits = &config.seeding_limits;
        debug!(
            enable = limits.enable,
            resume = limits.resume,
            rules = limits.rules.len(),
            "loaded {}",
            path.display()
        );
        for (index, rule) in limits.rules.iter().enumerate() {
            if !rule.has_predicates() {
                warn!(index, "rule has no conditions and will never match");
            }
        }

        Ok(config)
    }
}
