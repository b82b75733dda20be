/// Normalized failure shape shared by every fetch in the dashboard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Request timed out after {0} ms")]
    TimeoutError(u64),

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected error: {0}")]
    UnknownError(String),

    /// Out-of-range request parameter. Callers clamp or fall back to a
    /// default instead of surfacing this to the page.
    #[error("Invalid parameter: {0}")]
    ValidationError(String),
}

impl AppError {
    /// Short machine-readable code for the failure class.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIGURATION_ERROR",
            Self::TimeoutError(_) => "TIMEOUT_ERROR",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::NetworkError(_) => "NETWORK_ERROR",
            Self::UnknownError(_) => "UNKNOWN_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }
}
