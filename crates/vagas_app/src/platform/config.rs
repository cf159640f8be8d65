use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vagas_core::BoardConfig;
use vagas_engine::DEFAULT_DATA_PATH;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "vagas.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings read from `vagas.ron`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL or path of the job list.
    pub data_source: String,
    /// Base URL that relative `data_source` values are resolved against.
    pub base_url: Option<String>,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
    pub board: BoardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_PATH.to_string(),
            base_url: None,
            state_dir: PathBuf::from("."),
            log_destination: LogDestination::default(),
            board: BoardConfig::default(),
        }
    }
}

/// `Ok(None)` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
