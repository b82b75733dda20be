use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use super::timestamp::deserialize_flexible_datetime;

/// A single field reading as reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorSample {
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub timestamp: DateTime<Utc>,
    /// Volumetric soil moisture (%)
    pub soil_moisture: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Soil nitrogen (ppm)
    pub soil_nitrogen: f64,
    /// Soil phosphorus (ppm)
    pub soil_phosphorus: f64,
    /// Soil potassium (ppm)
    pub soil_potassium: f64,
    /// Rainfall (mm), when the sensor reports it
    #[serde(default)]
    pub rainfall: Option<f64>,
    #[serde(default)]
    pub field_id: Option<String>,
}

/// Per-day means of every sensor metric.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    /// Number of samples that contributed to the means
    pub samples: usize,
}

impl DailyAggregate {
    /// Axis label, e.g. "Feb 15".
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

#[derive(Debug)]
struct DayBucket {
    date: NaiveDate,
    sums: [f64; 6],
    count: usize,
}

impl DayBucket {
    const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sums: [0.0; 6],
            count: 0,
        }
    }

    fn add(&mut self, sample: &SensorSample) {
        let values = [
            sample.soil_moisture,
            sample.temperature,
            sample.humidity,
            sample.soil_nitrogen,
            sample.soil_phosphorus,
            sample.soil_potassium,
        ];
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.count += 1;
    }

    // A bucket only exists once a sample landed in it, so count >= 1.
    fn finish(self) -> DailyAggregate {
        let n = self.count as f64;
        let [moisture, temperature, humidity, nitrogen, phosphorus, potassium] =
            self.sums.map(|sum| sum / n);

        DailyAggregate {
            date: self.date,
            moisture,
            temperature,
            humidity,
            nitrogen,
            phosphorus,
            potassium,
            samples: self.count,
        }
    }
}

/// Groups samples by calendar day in `tz` and averages each metric.
///
/// Days appear in the order they are first seen in `samples`, which is
/// chronological only when the input is.
pub fn daily_averages<Tz: TimeZone>(samples: &[SensorSample], tz: &Tz) -> Vec<DailyAggregate> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut buckets: Vec<DayBucket> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        let slot = *index.entry(date).or_insert_with(|| {
            buckets.push(DayBucket::new(date));
            buckets.len() - 1
        });
        buckets[slot].add(sample);
    }

    buckets.into_iter().map(DayBucket::finish).collect()
}

/// The most recent `n` days of an aggregate series.
pub fn tail(days: &[DailyAggregate], n: usize) -> &[DailyAggregate] {
    &days[days.len().saturating_sub(n)..]
}

/// Every `every`-th sample, starting with the first.
pub fn downsample(samples: &[SensorSample], every: usize) -> impl Iterator<Item = &SensorSample> {
    samples.iter().step_by(every.max(1))
}
