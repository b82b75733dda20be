pub mod analytics;
pub mod dashboard;

pub use analytics::AnalyticsPage;
pub use dashboard::DashboardPage;
