//! Common value types shared across crates

pub mod geo;

pub use geo::{GeoPoint, LatLng, PointKind};
