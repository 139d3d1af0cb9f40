//! `OpenMeteo` request URLs and response structures

use crate::error::ForecastError;
use crate::models::{ForecastDay, GeoLocation};
use chrono::NaiveDate;
use serde::Deserialize;

/// Daily variables requested from the forecast endpoint
pub const DAILY_VARIABLES: &str = "weathercode,temperature_2m_max,temperature_2m_min";

fn query_separator(base: &str) -> char {
    if base.contains('?') { '&' } else { '?' }
}

/// Geocoding search URL asking for the single best match
#[must_use]
pub fn geocoding_url(base: &str, city: &str) -> String {
    format!(
        "{base}{}name={}&count=1",
        query_separator(base),
        urlencoding::encode(city)
    )
}

/// Daily forecast URL for `location`, timezone detected from the coordinates
#[must_use]
pub fn forecast_url(base: &str, location: &GeoLocation, forecast_days: u32) -> String {
    format!(
        "{base}{}latitude={}&longitude={}&daily={DAILY_VARIABLES}&timezone=auto&forecast_days={forecast_days}",
        query_separator(base),
        location.latitude,
        location.longitude,
    )
}

/// Geocoding response from `OpenMeteo`. `results` is omitted entirely when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodingResult> for GeoLocation {
    fn from(result: GeocodingResult) -> Self {
        GeoLocation::new(result.latitude, result.longitude, result.name)
    }
}

impl GeocodingResponse {
    /// First match, if any
    #[must_use]
    pub fn into_first(self) -> Option<GeocodingResult> {
        self.results.and_then(|results| results.into_iter().next())
    }
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub timezone: Option<String>,
    pub daily: Option<DailyData>,
}

/// Daily weather data from `OpenMeteo`, one entry per day in each array
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Option<Vec<String>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "weathercode")]
    pub weather_code: Option<Vec<Option<i32>>>,
}

impl DailyData {
    /// Zip the daily arrays positionally, keeping source order.
    ///
    /// Missing arrays, arrays of different lengths and null entries all
    /// mean the provider has no usable data for this location.
    pub fn into_days(self) -> Result<Vec<ForecastDay>, ForecastError> {
        let (Some(time), Some(max), Some(min), Some(codes)) = (
            self.time,
            self.temperature_max,
            self.temperature_min,
            self.weather_code,
        ) else {
            return Err(ForecastError::DataUnavailable);
        };

        let len = time.len();
        if max.len() != len || min.len() != len || codes.len() != len {
            return Err(ForecastError::DataUnavailable);
        }

        time.into_iter()
            .zip(max)
            .zip(min)
            .zip(codes)
            .map(|(((date, max_temp), min_temp), weather_code)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                    ForecastError::unexpected(format!("Invalid forecast date '{date}': {e}"))
                })?;
                match (max_temp, min_temp, weather_code) {
                    (Some(max_temp), Some(min_temp), Some(weather_code)) => Ok(ForecastDay {
                        date,
                        max_temp,
                        min_temp,
                        weather_code,
                    }),
                    _ => Err(ForecastError::DataUnavailable),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocoding_url_encodes_name() {
        let url = geocoding_url("https://geocoding-api.open-meteo.com/v1/search", "São Paulo");
        assert_eq!(
            url,
            "https://geocoding-api.open-meteo.com/v1/search?name=S%C3%A3o%20Paulo&count=1"
        );
    }

    #[test]
    fn test_geocoding_url_appends_to_existing_query() {
        let url = geocoding_url("http://localhost/search?language=en", "Bern");
        assert_eq!(url, "http://localhost/search?language=en&name=Bern&count=1");
    }

    #[test]
    fn test_forecast_url() {
        let location = GeoLocation::new(51.5, -0.12, "London");
        let url = forecast_url("https://api.open-meteo.com/v1/forecast", &location, 5);
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=51.5&longitude=-0.12&daily=weathercode,temperature_2m_max,temperature_2m_min&timezone=auto&forecast_days=5"
        );
    }

    #[test]
    fn test_geocoding_response_without_results() {
        let response: GeocodingResponse =
            serde_json::from_value(json!({"generationtime_ms": 0.5})).unwrap();
        assert!(response.into_first().is_none());

        let response: GeocodingResponse = serde_json::from_value(json!({"results": []})).unwrap();
        assert!(response.into_first().is_none());
    }

    #[test]
    fn test_geocoding_result_to_location() {
        let response: GeocodingResponse = serde_json::from_value(json!({
            "results": [
                {"name": "Interlaken", "latitude": 46.68387, "longitude": 7.86638, "country": "Switzerland", "admin1": "Bern"},
                {"name": "Interlaken", "latitude": 42.4623, "longitude": -76.7258}
            ]
        }))
        .unwrap();

        let location: GeoLocation = response.into_first().unwrap().into();
        assert_eq!(location, GeoLocation::new(46.68387, 7.86638, "Interlaken"));
    }

    #[test]
    fn test_daily_data_zips_in_order() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": ["2024-06-01", "2024-06-02", "2024-06-03"],
            "temperature_2m_max": [20.1, 22.4, 19.0],
            "temperature_2m_min": [11.0, 12.5, 10.2],
            "weathercode": [0, 61, 95]
        }))
        .unwrap();

        let days = daily.into_days().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1].date.to_string(), "2024-06-02");
        assert_eq!(days[1].max_temp, 22.4);
        assert_eq!(days[1].min_temp, 12.5);
        assert_eq!(days[1].weather_code, 61);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_daily_data_missing_array() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": ["2024-06-01"],
            "temperature_2m_max": [20.1],
            "weathercode": [0]
        }))
        .unwrap();
        assert_eq!(daily.into_days(), Err(ForecastError::DataUnavailable));
    }

    #[test]
    fn test_daily_data_length_mismatch() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": ["2024-06-01", "2024-06-02"],
            "temperature_2m_max": [20.1],
            "temperature_2m_min": [11.0, 12.0],
            "weathercode": [0, 1]
        }))
        .unwrap();
        assert_eq!(daily.into_days(), Err(ForecastError::DataUnavailable));
    }

    #[test]
    fn test_daily_data_null_entry() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": ["2024-06-01"],
            "temperature_2m_max": [null],
            "temperature_2m_min": [11.0],
            "weathercode": [0]
        }))
        .unwrap();
        assert_eq!(daily.into_days(), Err(ForecastError::DataUnavailable));
    }

    #[test]
    fn test_daily_data_bad_date() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": ["June 1st"],
            "temperature_2m_max": [20.0],
            "temperature_2m_min": [11.0],
            "weathercode": [0]
        }))
        .unwrap();
        assert!(matches!(daily.into_days(), Err(ForecastError::Unexpected(Some(_)))));
    }

    #[test]
    fn test_empty_daily_arrays() {
        let daily: DailyData = serde_json::from_value(json!({
            "time": [],
            "temperature_2m_max": [],
            "temperature_2m_min": [],
            "weathercode": []
        }))
        .unwrap();
        assert_eq!(daily.into_days(), Ok(Vec::new()));
    }
}
