//! Geographic position of a station.

use serde::{Deserialize, Serialize};

/// Latitude/longitude of a station.
///
/// Not used for routing; kept so callers can render a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Create a location from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
