//! Driver-level failures — the ones that never make it to a [`Handler`]
//! because they happen before any program is compiled at all.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("no input files given")]
    NoInputFiles,

    #[error("could not read '{0}': {1}")]
    ReadFailed(PathBuf, std::io::Error),

    #[error("could not write '{0}': {1}")]
    WriteFailed(PathBuf, std::io::Error),

    #[error("could not read config '{0}': {1}")]
    ConfigReadFailed(PathBuf, std::io::Error),

    #[error("malformed config '{0}': {1}")]
    ConfigParseFailed(PathBuf, toml::de::Error),
}
