//! `cityweather` - five-day city forecasts from `OpenMeteo`
//!
//! This library validates a city name, geocodes it, fetches the daily
//! forecast for the match and renders the result for terminals and a small
//! web front end.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::CityWeatherConfig;
pub use error::{ForecastError, UpstreamApi};
pub use models::{CityForecast, ForecastDay, GeoLocation, ResolutionResult};
pub use presentation::{ForecastView, render_text, weather_icon};
pub use weather::{CityQuery, ForecastResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
