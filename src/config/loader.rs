//! Board-set loading from YAML.
//!
//! Lookup order: explicit path, `SQUADBOARD_CONFIG_PATH` environment
//! variable, the default `squadboard/boards.yaml` location, then built-in
//! defaults. A file that exists but fails to parse or validate is an error
//! for explicit paths and a logged fallback for discovered ones.

use super::types::BoardSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the board config location.
pub const CONFIG_PATH_ENV: &str = "SQUADBOARD_CONFIG_PATH";

/// Default on-disk location for the board set.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("squadboard/boards.yaml")
}

/// Loader for the board set.
pub struct BoardSetLoader;

impl BoardSetLoader {
    /// Load and validate a board set from an explicit file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BoardSet> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading board config {}", path.display()))?;
        // Empty or comment-only YAML parses as null; treat it as defaults.
        let set: Option<BoardSet> = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing board config {}", path.display()))?;
        let set = set.unwrap_or_default();
        set.validate()
            .with_context(|| format!("validating board config {}", path.display()))?;
        Ok(set)
    }

    /// Load from the environment/default locations, falling back to the
    /// built-in board set. Discovery failures are logged, never fatal.
    pub fn load_or_default() -> BoardSet {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            match Self::load(&path) {
                Ok(set) => {
                    debug!(path = %path, "loaded board config from {}", CONFIG_PATH_ENV);
                    return set;
                }
                Err(err) => {
                    warn!(path = %path, "ignoring board config from {}: {:#}", CONFIG_PATH_ENV, err);
                }
            }
        }

        let default_path = default_config_path();
        if default_path.exists() {
            match Self::load(&default_path) {
                Ok(set) => {
                    debug!(path = %default_path.display(), "loaded board config");
                    return set;
                }
                Err(err) => {
                    warn!(path = %default_path.display(), "ignoring board config: {:#}", err);
                }
            }
        }

        BoardSet::default()
    }
}
