//! Optional TOML configuration: CLI flags always take precedence, the
//! config file only fills in defaults the command line left unset.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::EmitKind;
use crate::error::DriverError;

const DEFAULT_CONFIG_NAME: &str = "alanppc.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub emit: Option<EmitKind>,
    pub warnings_as_errors: Option<bool>,
    pub verbose: Option<bool>,
}

impl Config {
    /// Looks for `alanppc.toml` in the current directory; returns the
    /// default (empty) config if it isn't there, since the file is always
    /// optional.
    pub fn load() -> Result<Self, DriverError> {
        let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
        if default_path.is_file() {
            Self::load_from_path(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads a config from an explicit path. Unlike [`Config::load`], a
    /// missing or malformed file here is an error — the caller named this
    /// path explicitly with `-c`/`--config`.
    pub fn load_from_path(path: &Path) -> Result<Self, DriverError> {
        let text = fs::read_to_string(path)
            .map_err(|e| DriverError::ConfigReadFailed(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| DriverError::ConfigParseFailed(path.to_path_buf(), e))
    }
}
