use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::LoadError;

use super::CatalogSource;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tracing::debug!(path = %self.path.display(), "reading weather data");

        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Read {
                path: self.path.clone(),
                source,
            })
    }
}
