//! Forecast result model

use crate::error::ForecastError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the daily forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius
    pub max_temp: f64,
    /// Daily minimum temperature in Celsius
    pub min_temp: f64,
    /// WMO weather code
    pub weather_code: i32,
}

/// Successful resolution: the geocoder's name plus days in chronological order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityForecast {
    pub city: String,
    pub forecast: Vec<ForecastDay>,
}

/// Outcome of a single `resolve` call. Exactly one shape is ever serialized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResolutionResult {
    Success(CityForecast),
    Failure { error: String },
}

impl ResolutionResult {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Error message, if this is the failure variant
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }
}

impl From<Result<CityForecast, ForecastError>> for ResolutionResult {
    fn from(result: Result<CityForecast, ForecastError>) -> Self {
        match result {
            Ok(forecast) => Self::Success(forecast),
            Err(err) => Self::Failure {
                error: err.user_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(date: &str, max_temp: f64, min_temp: f64, weather_code: i32) -> ForecastDay {
        ForecastDay {
            date: date.parse().unwrap(),
            max_temp,
            min_temp,
            weather_code,
        }
    }

    #[test]
    fn test_success_serializes_flat() {
        let result = ResolutionResult::Success(CityForecast {
            city: "London".to_string(),
            forecast: vec![day("2024-06-01", 21.5, 12.25, 3)],
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "city": "London",
                "forecast": [
                    {"date": "2024-06-01", "maxTemp": 21.5, "minTemp": 12.25, "weatherCode": 3}
                ]
            })
        );
    }

    #[test]
    fn test_failure_serializes_only_error() {
        let result = ResolutionResult::from(Err(ForecastError::Timeout));
        assert!(result.is_error());
        assert_eq!(result.error(), Some("Request timed out"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"error": "Request timed out"})
        );
    }

    #[test]
    fn test_untagged_deserialization_picks_variant() {
        let failure: ResolutionResult =
            serde_json::from_value(json!({"error": "City not found."})).unwrap();
        assert_eq!(failure.error(), Some("City not found."));

        let success: ResolutionResult =
            serde_json::from_value(json!({"city": "Oslo", "forecast": []})).unwrap();
        assert!(!success.is_error());
    }
}
