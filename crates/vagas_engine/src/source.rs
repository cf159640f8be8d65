use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::{FailureKind, FetchError};

/// Path of the job list relative to the site root.
pub const DEFAULT_DATA_PATH: &str = "assets/data/json/open_jobs.json";

/// Where the job list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(Url),
    File(PathBuf),
}

impl DataSource {
    /// Interprets `location` as an absolute http(s) URL, a path relative to
    /// `base` when one is given, or else a local file path.
    pub fn resolve(location: &str, base: Option<&str>) -> Result<Self, FetchError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FetchError::new(FailureKind::InvalidSource, "empty data source"));
        }

        // Single-letter schemes are Windows drive letters, not URLs.
        if let Ok(url) = Url::parse(location) {
            if url.scheme().len() > 1 {
                return Self::from_url(url);
            }
        }

        match base {
            Some(base) => {
                let base = Url::parse(base)
                    .map_err(|err| FetchError::new(FailureKind::InvalidSource, err.to_string()))?;
                let url = base
                    .join(location)
                    .map_err(|err| FetchError::new(FailureKind::InvalidSource, err.to_string()))?;
                Self::from_url(url)
            }
            None => Ok(DataSource::File(PathBuf::from(location))),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        DataSource::File(path.as_ref().to_path_buf())
    }

    fn from_url(url: Url) -> Result<Self, FetchError> {
        match url.scheme() {
            "http" | "https" => Ok(DataSource::Http(url)),
            "file" => url
                .to_file_path()
                .map(DataSource::File)
                .map_err(|()| FetchError::new(FailureKind::InvalidSource, url.to_string())),
            other => Err(FetchError::new(
                FailureKind::InvalidSource,
                format!("unsupported scheme {other}"),
            )),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
