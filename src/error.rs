use thiserror::Error;

/// Main error type for the live recommendation service
#[derive(Error, Debug)]
pub enum PulseError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Upstream data errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for PulseError
pub type Result<T> = std::result::Result<T, PulseError>;

/// Failures talking to an upstream statistics source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    #[error("Provider timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Provider returned HTTP {code}")]
    Status { code: u16 },

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { elapsed_ms: 0 }
        } else if let Some(status) = err.status() {
            ProviderError::Status {
                code: status.as_u16(),
            }
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Unreachable(err.to_string())
        }
    }
}

/// A single statistic value that could not be read as an integer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Non-numeric value for {metric}: {raw:?}")]
    NotNumeric { metric: String, raw: String },
}

/// Failures delivering an update to one subscriber
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("Subscriber connection closed")]
    Closed,

    #[error("Send timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Subscriber queue full")]
    QueueFull,

    #[error("Transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_converts_into_pulse_error() {
        let err: PulseError = ProviderError::Status { code: 503 }.into();
        assert_eq!(err.to_string(), "Provider error: Provider returned HTTP 503");
    }

    #[test]
    fn test_parse_error_names_the_metric() {
        let err = ParseError::NotNumeric {
            metric: "corner kicks".to_string(),
            raw: "n/a".to_string(),
        };
        assert!(err.to_string().contains("corner kicks"));
    }
}
