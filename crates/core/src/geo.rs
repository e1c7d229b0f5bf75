//! Geographic primitives.

use serde::{Deserialize, Serialize};

/// A WGS-84 coordinate pair.
///
/// Carried as plain data; the map collaborator owns projection and rendering.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
