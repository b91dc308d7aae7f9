//! Geographic points

use serde::{Deserialize, Serialize};

/// GeoJSON geometry tag; only points are stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    #[default]
    Point,
}

/// A GeoJSON point, `{"type": "Point", "coordinates": [lng, lat]}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [longitude, latitude],
        }
    }

    /// The `[0, 0]` point used when no location is known
    pub fn origin() -> Self {
        Self::default()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Well-known text in longitude-latitude order
    pub fn to_wkt(&self) -> String {
        format!("POINT({} {})", self.longitude(), self.latitude())
    }
}

/// Latitude/longitude pair as sent by clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lng, value.lat)
    }
}
