use serde_json::Value;

use crate::{error::LoadError, model::WeatherRecord};

/// Read-only, ordered collection of weather records.
///
/// Built once from the static payload and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherCatalog {
    records: Vec<WeatherRecord>,
}

/// Result of validating a payload: the accepted records plus how many entries were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCatalog {
    pub catalog: WeatherCatalog,
    pub dropped: usize,
}

impl WeatherCatalog {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self { records }
    }

    /// Parse a `{ "weather_data": [...] }` document.
    ///
    /// The document itself must be valid JSON with a `weather_data` array.
    /// Individual entries that don't fit [`WeatherRecord`], or that have a
    /// blank city, are dropped and counted instead of failing the load.
    /// A leading UTF-8 byte order mark is ignored.
    pub fn from_json(body: &str) -> Result<ParsedCatalog, LoadError> {
        let body = body.strip_prefix('\u{feff}').unwrap_or(body);
        let mut doc: Value = serde_json::from_str(body)?;

        let entries = match doc.get_mut("weather_data").map(Value::take) {
            Some(Value::Array(entries)) => entries,
            _ => return Err(LoadError::Shape),
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut dropped = 0;

        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<WeatherRecord>(entry) {
                Ok(record) if !record.city.trim().is_empty() => records.push(record),
                Ok(_) => {
                    dropped += 1;
                    tracing::warn!(index, "dropping weather entry with blank city");
                }
                Err(err) => {
                    dropped += 1;
                    tracing::warn!(index, error = %err, "dropping malformed weather entry");
                }
            }
        }

        Ok(ParsedCatalog {
            catalog: Self::new(records),
            dropped,
        })
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a WeatherCatalog {
    type Item = &'a WeatherRecord;
    type IntoIter = std::slice::Iter<'a, WeatherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
