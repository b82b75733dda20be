pub mod alerts;
pub mod analytics_metrics;
pub mod chart;
pub mod field_summary;
pub mod recommendations;
pub mod status;

pub use alerts::Alerts;
pub use analytics_metrics::AnalyticsMetrics;
pub use chart::{Chart, ChartSpec};
pub use field_summary::{FieldSummary, NutrientLevels};
pub use recommendations::Recommendations;
pub use status::Status;
