//! Station records and the ordered station grid.

use crate::bbox::BoundingBox;
use crate::grid::GridShape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A georeferenced observation point.
///
/// The identifying strings are stored null-terminated ASCII on the wire;
/// empty strings are legal and common for synthetic grid cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Elevation above sea level in meters.
    pub elevation_m: i16,
    /// Display name (the original feeds used a "+lat-lon/" identifier here).
    pub name: String,
    /// Two-letter country code.
    pub country: String,
    /// Region/state code.
    pub region: String,
}

impl Station {
    /// Bare grid-cell station with no identifying metadata.
    pub fn at(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation_m: 0,
            name: String::new(),
            country: String::new(),
            region: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StationGridError {
    #[error("grid shape {rows}x{cols} does not cover {stations} stations")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        stations: usize,
    },
}

/// Ordered station list bound to its grid shape.
///
/// Sample tensors in both file formats are indexed by station position, and
/// the station order must equal the row-major flatten order of the grid.
/// Owning both here makes the two impossible to build out of sync: sample
/// containers take a `StationGrid`, never a bare station list plus a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationGrid {
    stations: Vec<Station>,
    shape: GridShape,
}

impl StationGrid {
    /// Bind `stations` (in row-major order) to `shape`.
    pub fn new(stations: Vec<Station>, shape: GridShape) -> Result<Self, StationGridError> {
        if shape.len() != stations.len() {
            return Err(StationGridError::ShapeMismatch {
                rows: shape.rows,
                cols: shape.cols,
                stations: stations.len(),
            });
        }
        Ok(Self { stations, shape })
    }

    /// Ungridded list; shape degrades to n-by-1.
    pub fn from_flat(stations: Vec<Station>) -> Self {
        let shape = GridShape::column_vector(stations.len());
        Self { stations, shape }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station at a grid cell, or `None` out of range.
    pub fn station(&self, row: usize, col: usize) -> Option<&Station> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.stations.get(self.shape.flat_index(row, col))
    }

    /// Geographic extent of the station set; `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let lats: Vec<f64> = self.stations.iter().map(|s| s.lat).collect();
        let lons: Vec<f64> = self.stations.iter().map(|s| s.lon).collect();
        BoundingBox::from_coords(&lats, &lons)
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.lon).collect()
    }
}
