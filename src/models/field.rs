use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::timestamp::{deserialize_flexible_datetime, deserialize_optional_datetime};

/// Watering recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IrrigationLevel {
    Low,
    Medium,
    High,
}

impl IrrigationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns CSS class name for color coding
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "level-good",
            Self::Medium => "level-warn",
            Self::High => "level-bad",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Current moisture levels are adequate",
            Self::Medium => "Moderate irrigation recommended",
            Self::High => "Immediate irrigation required",
        }
    }
}

/// Nutrient application recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FertilizerAction {
    Apply,
    Delay,
}

impl FertilizerAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apply => "Apply",
            Self::Delay => "Delay",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Apply => "level-action",
            Self::Delay => "level-neutral",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Apply => "Fertilizer application recommended based on nutrient trends",
            Self::Delay => "Nutrient levels are sufficient, no action needed",
        }
    }
}

/// Disease and pest risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PestRisk {
    Low,
    Moderate,
    High,
}

impl PestRisk {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "level-good",
            Self::Moderate => "level-warn",
            Self::High => "level-bad",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - conditions are favorable",
            Self::Moderate => "Moderate risk - preventive measures recommended",
            Self::High => "High risk conditions detected - monitor closely",
        }
    }
}

/// AI recommendation bundle for a field
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub irrigation: IrrigationLevel,
    pub fertilizer: FertilizerAction,
    pub pest_risk: PestRisk,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub alerts: Vec<String>,
    /// Predicted yield (tons/hectare)
    #[serde(default)]
    pub yield_forecast: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Recommendation {
    /// Confidence as a whole percentage, clamped to 0..=100.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Soil nutrient concentrations (ppm)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Nutrients {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl Nutrients {
    pub fn readings(&self) -> [NutrientReading; 3] {
        [
            NutrientReading::new(Nutrient::Nitrogen, self.nitrogen),
            NutrientReading::new(Nutrient::Phosphorus, self.phosphorus),
            NutrientReading::new(Nutrient::Potassium, self.potassium),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nitrogen => "Nitrogen (N)",
            Self::Phosphorus => "Phosphorus (P)",
            Self::Potassium => "Potassium (K)",
        }
    }

    /// Readings below this are flagged as low (ppm)
    pub fn low_threshold(&self) -> f64 {
        match self {
            Self::Nitrogen => 20.0,
            Self::Phosphorus => 15.0,
            Self::Potassium => 150.0,
        }
    }

    /// Reading that fills the level bar completely (ppm)
    pub fn full_scale(&self) -> f64 {
        match self {
            Self::Nitrogen => 40.0,
            Self::Phosphorus => 30.0,
            Self::Potassium => 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientReading {
    pub nutrient: Nutrient,
    pub value: f64,
}

impl NutrientReading {
    pub const fn new(nutrient: Nutrient, value: f64) -> Self {
        Self { nutrient, value }
    }

    pub fn is_low(&self) -> bool {
        self.value < self.nutrient.low_threshold()
    }

    /// Level bar width in percent, capped at 100.
    pub fn fill_percent(&self) -> f64 {
        (self.value / self.nutrient.full_scale() * 100.0).clamp(0.0, 100.0)
    }
}

/// Weather conditions at the field
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureStatus {
    Low,
    Moderate,
    Optimal,
}

impl MoistureStatus {
    pub fn from_moisture(moisture: f64) -> Self {
        if moisture < 30.0 {
            Self::Low
        } else if moisture < 50.0 {
            Self::Moderate
        } else {
            Self::Optimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Optimal => "Optimal",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "level-bad",
            Self::Moderate => "level-warn",
            Self::Optimal => "level-good",
        }
    }
}

/// Current readings plus the latest recommendations
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSnapshot {
    pub current_soil_moisture: f64,
    pub current_nutrients: Nutrients,
    pub current_weather: CurrentWeather,
    /// Next-season yield prediction (tons/hectare)
    pub yield_forecast: f64,
    pub recommendations: Recommendation,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub last_updated: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn moisture_status(&self) -> MoistureStatus {
        MoistureStatus::from_moisture(self.current_soil_moisture)
    }
}
