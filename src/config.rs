/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Enable automatic data refresh polling
    pub const ENABLE_AUTO_REFRESH: bool = true;

    /// Polling interval in milliseconds (5 minutes = 300,000ms)
    pub const POLLING_INTERVAL_MS: u32 = 300_000;

    /// Per-request deadline in milliseconds
    pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

    /// Days of history requested when the caller gives none
    pub const HISTORICAL_DAYS_DEFAULT: u16 = 30;

    /// Days of sensor data requested when the caller gives none
    pub const SENSOR_DAYS_DEFAULT: u16 = 7;

    /// Number of days shown on the analytics trend charts
    pub const TREND_WINDOW_DAYS: usize = 14;

    /// Historical charts plot every Nth raw sample
    pub const SAMPLE_STRIDE: usize = 4;

    /// Build-time environment variable holding the API base URL
    pub const API_URL_ENV: &'static str = "FIELD_API_URL";
}
