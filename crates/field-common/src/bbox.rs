//! Geographic bounding box in station coordinates.

use serde::{Deserialize, Serialize};

/// Latitude/longitude extent of a station set, in degrees.
///
/// Field order matches the quantized archive header (min/max latitude
/// before min/max longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Extent of a coordinate list; `None` when empty.
    pub fn from_coords(lats: &[f64], lons: &[f64]) -> Option<Self> {
        if lats.is_empty() || lons.is_empty() {
            return None;
        }
        let fold = |values: &[f64]| {
            values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
        };
        let (min_lat, max_lat) = fold(lats);
        let (min_lon, max_lon) = fold(lons);
        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Check if a point is contained within this box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
