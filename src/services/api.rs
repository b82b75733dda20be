use futures::future::{Either, select};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::ops::Deref;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use crate::config::Config;
use crate::models::{
    error::AppError,
    field::{DashboardSnapshot, Recommendation},
    history::{HistoricalData, WeatherForecast},
    sensor::SensorSample,
};
use crate::services::report::{ConsoleReporter, ErrorReporter};
use crate::services::timer::{BrowserTimer, Timer};
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

// CONSTANTS
/// Base URL used when the page is served from a development host.
pub const LOCAL_BASE_URL: &str = "http://localhost:8000/api/v1";
const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const RECOMMENDATIONS_PATH: &str = "/recommendations";
pub const HISTORICAL_PATH: &str = "/historical";
pub const SENSOR_DATA_PATH: &str = "/sensor-data";
pub const WEATHER_FORECAST_PATH: &str = "/weather-forecast";

// DAYS PARAMETER
/// A `days` query value, always within `Days::MIN..=Days::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Days(u16);

impl Days {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 365;

    /// Clamps `days` into the accepted range.
    pub fn new(days: i64) -> Self {
        let clamped = days.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u16::try_from(clamped).unwrap_or(Self::MAX))
    }

    /// Parses user input such as a select value or query string.
    ///
    /// Decimals are truncated toward zero and the result is clamped. Anything
    /// that is not a finite number is a `ValidationError`; callers typically
    /// turn that into the operation's default with `.ok()`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| AppError::ValidationError(format!("days must be a number, got {input:?}")))?;

        if !value.is_finite() {
            return Err(AppError::ValidationError(format!(
                "days must be finite, got {input:?}"
            )));
        }

        // Saturating float-to-int cast; clamped right after
        Ok(Self::new(value.trunc() as i64))
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    fn or_default(days: Option<Self>, default: u16) -> Self {
        days.unwrap_or_else(|| Self::new(i64::from(default)))
    }
}

impl std::fmt::Display for Days {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// API CONFIGURATION
/// Picks the backend base URL once at start-up.
///
/// An explicitly configured, non-blank value wins. Otherwise pages served from
/// a local development host talk to [`LOCAL_BASE_URL`]; anywhere else the URL
/// stays unset and every fetch fails with a configuration error.
pub fn resolve_base_url(configured: Option<&str>, hostname: Option<&str>) -> Option<String> {
    if let Some(url) = configured.map(str::trim).filter(|url| !url.is_empty()) {
        return Some(url.to_string());
    }

    hostname
        .filter(|host| LOCAL_HOSTS.contains(host))
        .map(|_| LOCAL_BASE_URL.to_string())
}

/// Configuration for the field API client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: Option<String>,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Resolves the configuration from the build environment and the page host.
    pub fn resolve(configured: Option<&str>, hostname: Option<&str>) -> Self {
        let builder = Self::builder();
        match resolve_base_url(configured, hostname) {
            Some(url) => builder.base_url(url).build(),
            None => builder.build(),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the absolute URL for `path` with `query` appended.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, AppError> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            AppError::ConfigError(format!(
                "API URL not configured. Set {} when building the dashboard.",
                Config::API_URL_ENV
            ))
        })?;

        let raw = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::ConfigError(format!("Invalid API URL {base:?}: {e}")))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }

        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ApiConfigBuilder {
    /// Sets the backend base URL, e.g. `https://api.example.com/api/v1`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url,
            timeout: self
                .timeout
                .unwrap_or_else(|| Duration::from_millis(Config::REQUEST_TIMEOUT_MS.into())),
        }
    }
}

// API RESPONSE TYPES
/// Error body the backend sends alongside a non-success status.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    message: Option<serde_json::Value>,
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// A non-empty string `message` wins; otherwise `detail` is used.
    fn into_message(self) -> Option<String> {
        match self.message {
            Some(serde_json::Value::String(message)) if !message.is_empty() => return Some(message),
            _ => {}
        }

        match self.detail? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Creates a `ServerError` from a non-success response.
fn error_for_status(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("Server error: {status}"));

    AppError::ServerError { status, message }
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, AppError> {
    if !response.is_success() {
        return Err(error_for_status(response.status, &response.body));
    }

    serde_json::from_str(&response.body)
        .map_err(|e| AppError::UnknownError(format!("Failed to parse response: {e}")))
}

// FIELD CLIENT
/// HTTP client for the field monitoring API.
pub struct FieldClient<T = HttpTransport, Tm = BrowserTimer> {
    transport: T,
    timer: Tm,
    reporter: Rc<dyn ErrorReporter>,
    config: ApiConfig,
}

impl FieldClient {
    /// Creates a browser client that reports failures to the console.
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        Ok(Self::with_parts(
            config,
            HttpTransport::new()?,
            BrowserTimer,
            Rc::new(ConsoleReporter),
        ))
    }
}

impl<T: Transport, Tm: Timer> FieldClient<T, Tm> {
    /// Creates a client from explicit parts.
    pub fn with_parts(
        config: ApiConfig,
        transport: T,
        timer: Tm,
        reporter: Rc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            transport,
            timer,
            reporter,
            config,
        }
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one GET against `path` and decodes the JSON body.
    ///
    /// Every failure is passed to the error reporter before it is returned.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, AppError> {
        let result = self.execute(path, query).await;
        if let Err(error) = &result {
            self.reporter.report(path, error);
        }
        result
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, AppError> {
        let url = self.config.endpoint(path, query)?;
        let request = HttpRequest::get(url);
        let response = self.send_with_deadline(&request).await?;
        decode(&response)
    }

    /// Races the transport against the configured deadline; the losing
    /// request future is dropped.
    async fn send_with_deadline(&self, request: &HttpRequest) -> Result<HttpResponse, AppError> {
        let timeout = self.config.timeout();
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let response = pin!(self.transport.send(request));
        let deadline = pin!(self.timer.sleep(timeout));

        match select(response, deadline).await {
            Either::Left((result, _)) => result.map_err(|e| e.into_app_error(timeout_ms)),
            Either::Right(((), _)) => Err(AppError::TimeoutError(timeout_ms)),
        }
    }

    /// Fetches current readings and recommendations.
    pub async fn get_dashboard(&self) -> Result<DashboardSnapshot, AppError> {
        self.get(DASHBOARD_PATH, &[]).await
    }

    /// Fetches the latest AI recommendations.
    pub async fn get_recommendations(&self) -> Result<Recommendation, AppError> {
        self.get(RECOMMENDATIONS_PATH, &[]).await
    }

    /// Fetches sensor history and yield history. `None` means 30 days.
    pub async fn get_historical(&self, days: Option<Days>) -> Result<HistoricalData, AppError> {
        let days = Days::or_default(days, Config::HISTORICAL_DAYS_DEFAULT);
        self.get(HISTORICAL_PATH, &[("days", days.to_string())])
            .await
    }

    /// Fetches raw sensor samples. `None` means 7 days.
    pub async fn get_sensor_data(&self, days: Option<Days>) -> Result<Vec<SensorSample>, AppError> {
        let days = Days::or_default(days, Config::SENSOR_DAYS_DEFAULT);
        self.get(SENSOR_DATA_PATH, &[("days", days.to_string())])
            .await
    }

    /// Fetches the 7-day weather forecast.
    pub async fn get_weather_forecast(&self) -> Result<WeatherForecast, AppError> {
        self.get(WEATHER_FORECAST_PATH, &[]).await
    }
}

// SHARED HANDLE
/// Cheaply clonable client handle for component props and hooks.
#[derive(Clone)]
pub struct ApiHandle(Rc<FieldClient>);

impl ApiHandle {
    pub fn new(client: FieldClient) -> Self {
        Self(Rc::new(client))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ApiHandle {
    type Target = FieldClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
