use chrono::{DateTime, Utc};

use crate::{
    catalog::WeatherCatalog,
    error::LoadError,
    matcher::{MatchMode, QueryState, QueryStatus, run_query},
    source::CatalogSource,
};

/// Summary of the single load attempt of a [`Session`].
#[derive(Debug)]
pub struct LoadReport {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub accepted: usize,
    pub dropped: usize,
    pub error: Option<LoadError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Owns the catalog and the current query state for one lookup session.
///
/// The catalog is loaded at most once. Queries before a load simply run
/// against an empty catalog.
#[derive(Debug)]
pub struct Session {
    catalog: WeatherCatalog,
    mode: MatchMode,
    report: Option<LoadReport>,
    state: QueryState,
    /// Mode `state` was matched under.
    state_mode: MatchMode,
}

impl Session {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            catalog: WeatherCatalog::default(),
            mode,
            report: None,
            state: QueryState::default(),
            state_mode: mode,
        }
    }

    /// Session over a catalog that was obtained elsewhere; counts as already loaded.
    pub fn with_catalog(catalog: WeatherCatalog, mode: MatchMode) -> Self {
        let report = LoadReport {
            source: "in-memory".to_string(),
            loaded_at: Utc::now(),
            accepted: catalog.len(),
            dropped: 0,
            error: None,
        };

        Self {
            catalog,
            mode,
            report: Some(report),
            state: QueryState::default(),
            state_mode: mode,
        }
    }

    /// Load the catalog from `source`, once.
    ///
    /// Later calls don't touch `source` and return the first report. On
    /// failure the catalog stays empty and the state carries
    /// [`QueryStatus::LoadFailed`] until the next query.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> &LoadReport {
        let report = match self.report.take() {
            Some(report) => {
                tracing::debug!(source = %report.source, "catalog already loaded, skipping");
                report
            }
            None => self.attempt_load(source).await,
        };

        self.report.insert(report)
    }

    async fn attempt_load(&mut self, source: &dyn CatalogSource) -> LoadReport {
        let origin = source.describe();
        let parsed = match source.fetch().await {
            Ok(body) => WeatherCatalog::from_json(&body),
            Err(err) => Err(err),
        };

        match parsed {
            Ok(parsed) => {
                tracing::info!(
                    source = %origin,
                    accepted = parsed.catalog.len(),
                    dropped = parsed.dropped,
                    "weather catalog loaded"
                );

                let report = LoadReport {
                    source: origin,
                    loaded_at: Utc::now(),
                    accepted: parsed.catalog.len(),
                    dropped: parsed.dropped,
                    error: None,
                };
                self.catalog = parsed.catalog;
                report
            }
            Err(err) => {
                tracing::warn!(source = %origin, error = %err, "failed to load weather catalog");

                self.catalog = WeatherCatalog::default();
                self.state = QueryState {
                    status: QueryStatus::LoadFailed,
                    ..QueryState::default()
                };

                LoadReport {
                    source: origin,
                    loaded_at: Utc::now(),
                    accepted: 0,
                    dropped: 0,
                    error: Some(err),
                }
            }
        }
    }

    /// Explicit search action: match `query` and replace the current state.
    pub fn submit(&mut self, query: &str) -> &QueryState {
        self.state = run_query(&self.catalog, query, self.mode);
        self.state_mode = self.mode;
        &self.state
    }

    /// The query text changed. Re-matches unless the text and mode are what was last matched.
    pub fn query_changed(&mut self, query: &str) -> &QueryState {
        if self.state.query == query
            && self.state_mode == self.mode
            && self.state.status != QueryStatus::LoadFailed
        {
            return &self.state;
        }
        self.submit(query)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn catalog(&self) -> &WeatherCatalog {
        &self.catalog
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Switch match mode. The current state is kept until the next query.
    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
    }
}
