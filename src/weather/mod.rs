//! Forecast resolution: city name to coordinates to a daily forecast.
//!
//! Each [`ForecastResolver::resolve`] call is self-contained. It validates
//! the query, geocodes it, fetches the daily forecast for the first match
//! and assembles the days. Every HTTP call goes through
//! [`fetch::fetch_with_deadline`]; nothing is retried and nothing is cached.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{ForecastError, UpstreamApi};
use crate::models::{CityForecast, ForecastDay, GeoLocation, ResolutionResult};

pub mod fetch;
pub mod open_meteo;
pub mod query;

pub use fetch::fetch_with_deadline;
pub use query::CityQuery;

/// Deadline applied to each upstream call unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves city names into daily forecasts using the `OpenMeteo` APIs.
///
/// Cloning is cheap and clones share the connection pool, so a single
/// resolver can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ForecastResolver {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    forecast_days: u32,
    timeout: Duration,
}

impl ForecastResolver {
    /// Create a resolver from API settings
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            geocoding_url: api.geocoding_url.clone(),
            forecast_url: api.forecast_url.clone(),
            forecast_days: api.forecast_days,
            timeout: api.timeout(),
        })
    }

    /// Override the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a city name. Never fails: errors come back as the
    /// `{ error }` variant.
    pub async fn resolve(&self, query: &str) -> ResolutionResult {
        let result = match CityQuery::parse(query) {
            Ok(city) => self.resolve_city(&city).await,
            Err(err) => Err(err),
        };
        Self::finish(query, result)
    }

    /// Like [`resolve`](Self::resolve), for untyped input such as a JSON
    /// request field. Non-string values fail validation.
    pub async fn resolve_value(&self, query: &Value) -> ResolutionResult {
        let result = match CityQuery::from_value(query) {
            Ok(city) => self.resolve_city(&city).await,
            Err(err) => Err(err),
        };
        Self::finish(&query.to_string(), result)
    }

    /// Resolve a city name, keeping the structured error
    pub async fn try_resolve(&self, query: &str) -> Result<CityForecast, ForecastError> {
        let city = CityQuery::parse(query)?;
        self.resolve_city(&city).await
    }

    #[tracing::instrument(skip(self, city), fields(city = %city))]
    async fn resolve_city(&self, city: &CityQuery) -> Result<CityForecast, ForecastError> {
        let start_time = Instant::now();

        let location = self.geocode(city).await?;
        let forecast = self.daily_forecast(&location).await?;

        info!(
            "Resolved '{}' to {} ({}) with {} days in {:.3}s",
            city,
            location.resolved_name,
            location.format_coordinates(),
            forecast.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(CityForecast {
            city: location.resolved_name,
            forecast,
        })
    }

    /// Look up the first geocoding match for `city`
    #[tracing::instrument(level = "debug", skip(self, city), fields(city = %city))]
    pub async fn geocode(&self, city: &CityQuery) -> Result<GeoLocation, ForecastError> {
        let url = open_meteo::geocoding_url(&self.geocoding_url, city.as_str());
        debug!("OpenMeteo geocoding request URL: {}", url);

        let response = fetch_with_deadline(&self.client, &url, self.timeout).await?;
        response.ensure_success(UpstreamApi::Geocoding)?;

        let geocoding: open_meteo::GeocodingResponse = response.json()?;
        let Some(first) = geocoding.into_first() else {
            warn!("No results found for location '{}'", city);
            return Err(ForecastError::NotFound);
        };

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            first.name, first.latitude, first.longitude
        );
        Ok(first.into())
    }

    /// Fetch the daily forecast for `location`
    #[tracing::instrument(level = "debug", skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastDay>, ForecastError> {
        let url = open_meteo::forecast_url(&self.forecast_url, location, self.forecast_days);
        debug!("OpenMeteo forecast request URL: {}", url);

        let response = fetch_with_deadline(&self.client, &url, self.timeout).await?;
        response.ensure_success(UpstreamApi::Weather)?;

        let forecast: open_meteo::ForecastResponse = response.json()?;
        let Some(daily) = forecast.daily else {
            warn!("Forecast response for {} has no daily block", location.resolved_name);
            return Err(ForecastError::DataUnavailable);
        };

        if let Some(timezone) = &forecast.timezone {
            debug!("Forecast timezone: {}", timezone);
        }

        daily.into_days()
    }

    fn finish(input: &str, result: Result<CityForecast, ForecastError>) -> ResolutionResult {
        if let Err(err) = &result {
            match err {
                ForecastError::Validation => debug!("Rejected query {:?}", input),
                _ => warn!("Resolution of {:?} failed: {}", input, err),
            }
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> ForecastResolver {
        // Nothing listens here; validation failures must never reach it
        let api = ApiConfig {
            geocoding_url: "http://127.0.0.1:1/search".to_string(),
            forecast_url: "http://127.0.0.1:1/forecast".to_string(),
            ..ApiConfig::default()
        };
        ForecastResolver::new(&api).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_empty_input() {
        let result = resolver().resolve("").await;
        assert_eq!(
            result.error(),
            Some("Please provide a valid city name containing letters.")
        );
    }

    #[tokio::test]
    async fn test_resolve_value_rejects_numbers() {
        let result = resolver().resolve_value(&json!(12345)).await;
        assert_eq!(
            result.error(),
            Some("Please provide a valid city name containing letters.")
        );
    }

    #[tokio::test]
    async fn test_try_resolve_keeps_structured_error() {
        let err = resolver().try_resolve("   ").await.unwrap_err();
        assert_eq!(err, ForecastError::Validation);
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(resolver().timeout(), DEFAULT_TIMEOUT);
        let shorter = resolver().with_timeout(Duration::from_millis(250));
        assert_eq!(shorter.timeout(), Duration::from_millis(250));
    }
}
