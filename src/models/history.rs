use chrono::NaiveDate;
use serde::Deserialize;

use super::sensor::SensorSample;
use super::timestamp::deserialize_flexible_date;

/// Harvest outcome for one season
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YieldRecord {
    /// e.g. "2023-2024"
    pub season: String,
    /// tons/hectare
    pub yield_amount: f64,
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub harvest_date: Option<String>,
}

/// Response of `GET /historical`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HistoricalData {
    #[serde(default)]
    pub sensor_data: Vec<SensorSample>,
    #[serde(default)]
    pub yield_history: Vec<YieldRecord>,
}

/// One day of the 7-day forecast
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl ForecastDay {
    /// Axis label, e.g. "Feb 15".
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Response of `GET /weather-forecast`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct WeatherForecast {
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}
