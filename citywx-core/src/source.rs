use crate::{
    error::LoadError,
    source::{file::FileSource, http::HttpSource},
};
use async_trait::async_trait;
use std::{fmt::Debug, path::PathBuf};

pub mod file;
pub mod http;

/// Where the catalog is read from when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "weatherData.json";

/// Location of the static weather payload: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let lower = value.to_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(value.to_string())
        } else {
            SourceLocation::File(PathBuf::from(value))
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => f.write_str(url),
        }
    }
}

impl From<&str> for SourceLocation {
    fn from(value: &str) -> Self {
        SourceLocation::parse(value)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync + Debug {
    /// Human-readable origin, used in logs and the load report.
    fn describe(&self) -> String;

    /// Fetch the raw payload. Called at most once per session.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Construct the source matching a location.
pub fn source_from_location(location: &SourceLocation) -> Box<dyn CatalogSource> {
    match location {
        SourceLocation::File(path) => Box::new(FileSource::new(path.clone())),
        SourceLocation::Url(url) => Box::new(HttpSource::new(url.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_paths() {
        assert_eq!(
            SourceLocation::parse("https://example.org/weatherData.json"),
            SourceLocation::Url("https://example.org/weatherData.json".into())
        );
        assert_eq!(
            SourceLocation::parse("  HTTP://localhost:8080/data.json "),
            SourceLocation::Url("HTTP://localhost:8080/data.json".into())
        );
        assert_eq!(
            SourceLocation::parse("public/weatherData.json"),
            SourceLocation::File(PathBuf::from("public/weatherData.json"))
        );
    }

    #[test]
    fn default_location_is_the_bundled_file_name() {
        assert_eq!(SourceLocation::default().to_string(), DEFAULT_SOURCE);
    }

    #[test]
    fn source_from_location_describes_its_origin() {
        let source = source_from_location(&SourceLocation::parse("data/weather.json"));
        assert_eq!(source.describe(), "data/weather.json");

        let source = source_from_location(&SourceLocation::parse("http://localhost/w.json"));
        assert_eq!(source.describe(), "http://localhost/w.json");
    }
}
