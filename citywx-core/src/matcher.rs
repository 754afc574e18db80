use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};

use crate::{catalog::WeatherCatalog, error::LOAD_FAILED_MESSAGE, model::WeatherRecord};

/// How a query is compared against city names.
///
/// Both sides are normalized the same way (see [`normalize`]) before comparison.
/// Deserializes from any casing, serializes lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MatchMode {
    /// City contains the query.
    #[default]
    Substring,
    /// City equals the query.
    Exact,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Substring => "substring",
            MatchMode::Exact => "exact",
        }
    }

    pub const fn all() -> &'static [MatchMode] {
        &[MatchMode::Substring, MatchMode::Exact]
    }

    /// Compare an already-normalized query against a raw city name.
    fn matches(self, city: &str, needle: &str) -> bool {
        let city = normalize(city);
        match self {
            MatchMode::Substring => city.contains(needle),
            MatchMode::Exact => city == needle,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MatchMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "substring" => Ok(MatchMode::Substring),
            "exact" => Ok(MatchMode::Exact),
            _ => Err(anyhow::anyhow!(
                "Unknown match mode '{value}'. Supported modes: substring, exact."
            )),
        }
    }
}

impl TryFrom<String> for MatchMode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MatchMode::try_from(value.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchMode::try_from(s)
    }
}

/// Trim surrounding whitespace and fold to lower case.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Outcome flag shown next to the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    /// Nothing to report: blank query, or at least one match.
    #[default]
    Clear,
    /// The catalog could not be loaded. Only ever set by the load itself.
    LoadFailed,
    /// A non-empty query matched no city.
    NoMatch,
}

impl QueryStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            QueryStatus::Clear => None,
            QueryStatus::LoadFailed => Some(LOAD_FAILED_MESSAGE),
            QueryStatus::NoMatch => Some("No city found"),
        }
    }
}

/// The query as typed, what it matched, and the resulting status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub query: String,
    pub results: Vec<WeatherRecord>,
    pub status: QueryStatus,
}

/// Match `query` against every record of `catalog`, keeping catalog order.
///
/// A blank query yields no results and a clear status. A non-empty query with
/// no hits yields [`QueryStatus::NoMatch`].
pub fn run_query(catalog: &WeatherCatalog, query: &str, mode: MatchMode) -> QueryState {
    let needle = normalize(query);

    if needle.is_empty() {
        return QueryState {
            query: query.to_string(),
            ..QueryState::default()
        };
    }

    let results: Vec<WeatherRecord> = catalog
        .iter()
        .filter(|record| mode.matches(&record.city, &needle))
        .cloned()
        .collect();

    let status = if results.is_empty() {
        QueryStatus::NoMatch
    } else {
        QueryStatus::Clear
    };

    tracing::debug!(query, %mode, hits = results.len(), "query matched");

    QueryState {
        query: query.to_string(),
        results,
        status,
    }
}
