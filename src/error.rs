//! Error types for forecast resolution

use std::fmt;
use thiserror::Error;

/// Message used when a failure carries no description of its own
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";

/// Which upstream service produced a non-success response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamApi {
    Geocoding,
    Weather,
}

impl fmt::Display for UpstreamApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamApi::Geocoding => write!(f, "Geocoding"),
            UpstreamApi::Weather => write!(f, "Weather"),
        }
    }
}

/// Every way a single resolution can fail. All of them are terminal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input rejected before any network access
    #[error("Please provide a valid city name containing letters.")]
    Validation,

    /// Non-2xx answer from one of the upstream APIs
    #[error("{api} API error: {status} {status_text}")]
    Upstream {
        api: UpstreamApi,
        status: u16,
        status_text: String,
    },

    /// Geocoding succeeded but returned no match
    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    /// Forecast response lacks the daily block
    #[error("Weather data not available for this location.")]
    DataUnavailable,

    /// A call did not settle before its deadline
    #[error("Request timed out")]
    Timeout,

    /// Transport faults, malformed payloads and anything else
    #[error("{}", .0.as_deref().filter(|m| !m.is_empty()).unwrap_or(FALLBACK_MESSAGE))]
    Unexpected(Option<String>),
}

impl ForecastError {
    /// Create a new upstream error from a status code and its reason phrase
    pub fn upstream<S: Into<String>>(api: UpstreamApi, status: u16, status_text: S) -> Self {
        Self::Upstream {
            api,
            status,
            status_text: status_text.into(),
        }
    }

    /// Create a new unexpected error carrying the underlying description
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected(Some(message.into()))
    }

    /// The single human-readable string surfaced to callers
    #[must_use]
    pub fn user_message(&self) -> String {
        // Reason phrases can be empty for non-standard codes
        self.to_string().trim_end().to_string()
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        Self::unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ForecastError::Validation.user_message(),
            "Please provide a valid city name containing letters."
        );
        assert_eq!(
            ForecastError::NotFound.user_message(),
            "City not found. Please check the spelling and try again."
        );
        assert_eq!(
            ForecastError::DataUnavailable.user_message(),
            "Weather data not available for this location."
        );
        assert_eq!(ForecastError::Timeout.user_message(), "Request timed out");
    }

    #[test]
    fn test_upstream_messages() {
        let geo = ForecastError::upstream(UpstreamApi::Geocoding, 503, "Service Unavailable");
        assert_eq!(geo.user_message(), "Geocoding API error: 503 Service Unavailable");

        let weather = ForecastError::upstream(UpstreamApi::Weather, 400, "Bad Request");
        assert_eq!(weather.user_message(), "Weather API error: 400 Bad Request");
    }

    #[test]
    fn test_upstream_without_reason_phrase() {
        let err = ForecastError::upstream(UpstreamApi::Weather, 599, "");
        assert_eq!(err.user_message(), "Weather API error: 599");
    }

    #[test]
    fn test_unexpected_fallback() {
        assert_eq!(ForecastError::Unexpected(None).user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            ForecastError::Unexpected(Some(String::new())).user_message(),
            FALLBACK_MESSAGE
        );
        assert_eq!(
            ForecastError::unexpected("connection reset").user_message(),
            "connection reset"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ForecastError = json_err.into();
        assert!(matches!(err, ForecastError::Unexpected(Some(_))));
    }
}
