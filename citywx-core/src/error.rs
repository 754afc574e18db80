use std::path::PathBuf;

use thiserror::Error;

/// Shown whenever the catalog could not be loaded, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load weather data";

/// Why the one catalog load attempt failed.
///
/// A load failure is never fatal: the session keeps an empty catalog and
/// surfaces [`LoadError::user_message`] once.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("weather data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather data has no `weather_data` array")]
    Shape,
}

impl LoadError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}
