use serde::{Deserialize, Serialize};

/// One city's weather as published in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

impl WeatherRecord {
    /// Temperature with the Celsius marker, e.g. `18°C` or `21.5°C`.
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature)
    }
}
