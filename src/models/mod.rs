//! Data models for the cityweather crate
//!
//! - Location: the resolved geocoding match
//! - Forecast: daily forecast entries and the resolution outcome

pub mod forecast;
pub mod location;

pub use forecast::{CityForecast, ForecastDay, ResolutionResult};
pub use location::GeoLocation;
