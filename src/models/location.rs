//! Resolved geographic location

use serde::{Deserialize, Serialize};

/// Coordinates and canonical name of the first geocoding match
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical name as returned by the geocoder
    pub resolved_name: String,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, resolved_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            resolved_name: resolved_name.into(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
