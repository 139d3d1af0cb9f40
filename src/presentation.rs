//! Rendering of resolution results for people
//!
//! Weather codes map to an icon and a description through a fixed table,
//! dates print in a short English form and temperatures carry both Celsius
//! and Fahrenheit. Error messages are passed through untouched.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ForecastDay, ResolutionResult};

/// Icon and text shown for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherIcon {
    pub icon: &'static str,
    pub description: &'static str,
}

const UNKNOWN: WeatherIcon = WeatherIcon {
    icon: "❓",
    description: "Unknown",
};

/// Look up the icon for a WMO weather code. Codes outside the table map to
/// "Unknown".
#[must_use]
pub fn weather_icon(code: i32) -> WeatherIcon {
    let (icon, description) = match code {
        0 => ("☀️", "Clear sky"),
        1 => ("🌤️", "Mainly clear"),
        2 => ("⛅", "Partly cloudy"),
        3 => ("☁️", "Overcast"),
        45 => ("🌫️", "Fog"),
        48 => ("🌫️", "Depositing rime fog"),
        51 => ("🌦️", "Light drizzle"),
        53 => ("🌦️", "Moderate drizzle"),
        55 => ("🌧️", "Dense drizzle"),
        61 => ("🌧️", "Slight rain"),
        63 => ("🌧️", "Moderate rain"),
        65 => ("🌧️", "Heavy rain"),
        71 => ("🌨️", "Slight snow fall"),
        73 => ("🌨️", "Moderate snow fall"),
        75 => ("🌨️", "Heavy snow fall"),
        95 => ("⛈️", "Thunderstorm"),
        _ => return UNKNOWN,
    };
    WeatherIcon { icon, description }
}

/// Short display date, e.g. "Mon, Jan 15"
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Temperature with unit in both scales
#[must_use]
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}°C / {:.1}°F", celsius, celsius_to_fahrenheit(celsius))
}

/// One forecast day ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub min: String,
    pub max: String,
}

impl From<&ForecastDay> for DayView {
    fn from(day: &ForecastDay) -> Self {
        let weather = weather_icon(day.weather_code);
        Self {
            date: format_date(day.date),
            icon: weather.icon,
            description: weather.description,
            min: format!("Min: {}", format_temperature(day.min_temp)),
            max: format!("Max: {}", format_temperature(day.max_temp)),
        }
    }
}

/// Display model for the web page. The error text is plain text and must
/// never be inserted as markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForecastView {
    Forecast { city: String, days: Vec<DayView> },
    Error { error: String },
}

impl From<&ResolutionResult> for ForecastView {
    fn from(result: &ResolutionResult) -> Self {
        match result {
            ResolutionResult::Success(forecast) => Self::Forecast {
                city: forecast.city.clone(),
                days: forecast.forecast.iter().map(DayView::from).collect(),
            },
            ResolutionResult::Failure { error } => Self::Error {
                error: error.clone(),
            },
        }
    }
}

/// Plain-text rendering for terminals
#[must_use]
pub fn render_text(result: &ResolutionResult) -> String {
    match ForecastView::from(result) {
        ForecastView::Error { error } => error,
        ForecastView::Forecast { city, days } => {
            let mut out = format!("{city}\n");
            for day in days {
                out.push_str(&format!(
                    "  {:<12} {} {:<20} {}  {}\n",
                    day.date, day.icon, day.description, day.min, day.max
                ));
            }
            out
        }
    }
}
