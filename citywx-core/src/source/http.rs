use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::LoadError;

use super::CatalogSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    http: Client,
}

impl HttpSource {
    pub fn new(url: String) -> Self {
        Self::with_timeout(url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(url: String, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, ?timeout, "failed to build http client, requests will not time out");
                Client::new()
            });

        Self { url, http }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tracing::debug!(url = %self.url, "fetching weather data");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|source| LoadError::Fetch {
                url: self.url.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status,
            });
        }

        res.text().await.map_err(|source| LoadError::Fetch {
            url: self.url.clone(),
            source,
        })
    }
}
