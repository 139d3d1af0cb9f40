//! City-name validation

use crate::error::ForecastError;
use serde_json::Value;
use std::fmt;

/// A trimmed city name known to contain at least one ASCII letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Validate raw user input. Trimming happens here; nothing downstream
    /// ever sees the surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ForecastError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(ForecastError::Validation);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Validate untyped input, e.g. a JSON request body field.
    /// Anything that is not a string is rejected.
    pub fn from_value(value: &Value) -> Result<Self, ForecastError> {
        match value {
            Value::String(s) => Self::parse(s),
            _ => Err(ForecastError::Validation),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
