use reqwest::Url;
use std::future::Future;

use crate::models::error::AppError;

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// A fully resolved GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, &'static str)>,
}

impl HttpRequest {
    /// A JSON GET request for `url`.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: vec![JSON_CONTENT_TYPE],
        }
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// Raw response: status plus undecoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure below the HTTP layer, before any status was received.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The transport gave up waiting on its own.
    Timeout,
    /// The request went out but nothing came back.
    NoResponse(String),
    Other(String),
}

/// Performs a single request. The one place the dashboard touches the network.
pub trait Transport {
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// `reqwest`-backed transport (browser `fetch` when built for wasm).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await.map_err(classify_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

/// Converts a reqwest error into a transport failure class
fn classify_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_request() || is_connect(&error) {
        TransportError::NoResponse(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn is_connect(error: &reqwest::Error) -> bool {
    error.is_connect()
}

#[cfg(target_arch = "wasm32")]
fn is_connect(_error: &reqwest::Error) -> bool {
    false
}

impl TransportError {
    /// Maps onto the dashboard taxonomy. `timeout_ms` is the deadline the
    /// request ran under.
    pub fn into_app_error(self, timeout_ms: u64) -> AppError {
        match self {
            Self::Timeout => AppError::TimeoutError(timeout_ms),
            Self::NoResponse(cause) => AppError::NetworkError(cause),
            Self::Other(cause) => AppError::UnknownError(cause),
        }
    }
}
