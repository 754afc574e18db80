//! Display projection: turns records, query state and load reports into terminal text.

use chrono::Local;
use citywx_core::{LoadReport, QueryState, WeatherRecord};

/// Multi-line block for one record.
pub fn record_card(record: &WeatherRecord) -> String {
    format!(
        "{}, {}\n  {}\n  {}\n  {}",
        record.city,
        record.country,
        record.temperature_label(),
        record.condition,
        record.icon,
    )
}

/// Status message if any, otherwise every result as a card. Empty for a blank query.
pub fn query_state(state: &QueryState) -> String {
    if let Some(message) = state.status.message() {
        return message.to_string();
    }

    state
        .results
        .iter()
        .map(record_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn load_report(report: &LoadReport) -> String {
    if let Some(err) = &report.error {
        return format!("{} ({})", err.user_message(), report.source);
    }

    let loaded_at = report.loaded_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    let mut line = format!(
        "Loaded {} cities from {} at {}",
        report.accepted, report.source, loaded_at
    );
    if report.dropped > 0 {
        line.push_str(&format!(", skipped {} malformed entries", report.dropped));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use citywx_core::{LoadError, QueryStatus};

    fn lisbon() -> WeatherRecord {
        WeatherRecord {
            city: "Lisbon".into(),
            country: "Portugal".into(),
            temperature: 18.0,
            condition: "Sunny".into(),
            icon: "☀️".into(),
        }
    }

    #[test]
    fn card_shows_every_field() {
        assert_eq!(
            record_card(&lisbon()),
            "Lisbon, Portugal\n  18°C\n  Sunny\n  ☀️"
        );
    }

    #[test]
    fn status_message_wins_over_results() {
        let state = QueryState {
            query: "Berlin".into(),
            results: Vec::new(),
            status: QueryStatus::NoMatch,
        };
        assert_eq!(query_state(&state), "No city found");
    }

    #[test]
    fn blank_state_renders_nothing() {
        assert_eq!(query_state(&QueryState::default()), "");
    }

    #[test]
    fn results_are_separated_by_blank_lines() {
        let state = QueryState {
            query: "l".into(),
            results: vec![lisbon(), lisbon()],
            status: QueryStatus::Clear,
        };
        assert_eq!(query_state(&state).matches("Lisbon, Portugal").count(), 2);
        assert!(query_state(&state).contains("☀️\n\nLisbon"));
    }

    #[test]
    fn failed_report_uses_generic_message() {
        let report = LoadReport {
            source: "weatherData.json".into(),
            loaded_at: Utc::now(),
            accepted: 0,
            dropped: 0,
            error: Some(LoadError::Shape),
        };
        assert_eq!(
            load_report(&report),
            "Failed to load weather data (weatherData.json)"
        );
    }

    #[test]
    fn successful_report_mentions_dropped_entries() {
        let report = LoadReport {
            source: "weatherData.json".into(),
            loaded_at: Utc::now(),
            accepted: 5,
            dropped: 2,
            error: None,
        };
        let line = load_report(&report);
        assert!(line.starts_with("Loaded 5 cities from weatherData.json at "));
        assert!(line.ends_with(", skipped 2 malformed entries"));
    }
}
