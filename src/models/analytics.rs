use chrono::TimeZone;

use super::field::{DashboardSnapshot, Recommendation};
use super::history::{HistoricalData, WeatherForecast};
use super::sensor::{DailyAggregate, daily_averages, tail};
use crate::config::Config;

/// Everything the dashboard page renders, fetched as one join.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub snapshot: DashboardSnapshot,
    pub historical: HistoricalData,
}

/// Headline numbers for the analytics page
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub avg_moisture: f64,
    pub avg_temperature: f64,
    pub data_points: usize,
    pub confidence_percent: u8,
}

/// Analytics page payload. The forecast is optional: when its fetch fails the
/// page still renders, showing the forecast as unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsData {
    pub historical: HistoricalData,
    pub recommendations: Recommendation,
    pub forecast: Option<WeatherForecast>,
    pub daily: Vec<DailyAggregate>,
}

impl AnalyticsData {
    pub fn new<Tz: TimeZone>(
        historical: HistoricalData,
        recommendations: Recommendation,
        forecast: Option<WeatherForecast>,
        tz: &Tz,
    ) -> Self {
        let daily = daily_averages(&historical.sensor_data, tz);
        Self {
            historical,
            recommendations,
            forecast,
            daily,
        }
    }

    /// Days shown on the trend charts.
    pub fn trend_window(&self) -> &[DailyAggregate] {
        tail(&self.daily, Config::TREND_WINDOW_DAYS)
    }

    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            avg_moisture: mean(self.daily.iter().map(|d| d.moisture)),
            avg_temperature: mean(self.daily.iter().map(|d| d.temperature)),
            data_points: self.historical.sensor_data.len(),
            confidence_percent: self.recommendations.confidence_percent(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count > 0 { sum / count as f64 } else { 0.0 }
}
