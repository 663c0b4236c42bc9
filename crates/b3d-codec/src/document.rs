//! In-memory representation of a B3D file.

use crate::error::{B3dError, B3dResult};
use crate::{reader, writer};
use bytes::Bytes;
use field_common::{wire, GridShape, TimeAxis};
use std::path::Path;
use tracing::debug;

/// Magic code identifying a B3D file.
pub const B3D_MAGIC: u32 = 34280;
/// The only file version this codec reads and writes.
pub const B3D_VERSION: u32 = 4;
/// Location format 1: an explicit (lon, lat, aux) triple per point.
pub const LOCATION_FORMAT_POINTS: u32 = 1;

/// A complete B3D dataset: point table, time axis, and the two
/// electric-field channels.
///
/// Channel values are stored station-major within each time step: the
/// sample for point `i` at time index `t` lives at `t * n + i`. The
/// constructor validates every shape precondition, so a `B3dDocument`
/// can always be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct B3dDocument {
    comment: String,
    grid_shape: GridShape,
    lat: Vec<f64>,
    lon: Vec<f64>,
    near_station: Vec<f64>,
    time: TimeAxis,
    ex: Vec<f32>,
    ey: Vec<f32>,
}

impl B3dDocument {
    /// Assemble and validate a document.
    ///
    /// `near_station` is the distance from each point to its nearest
    /// observing station, -1.0 when unknown. A `grid_shape` that does not
    /// cover the point count is replaced by the n-by-1 fallback rather
    /// than rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        comment: impl Into<String>,
        grid_shape: Option<GridShape>,
        lat: Vec<f64>,
        lon: Vec<f64>,
        near_station: Vec<f64>,
        time: TimeAxis,
        ex: Vec<f32>,
        ey: Vec<f32>,
    ) -> B3dResult<Self> {
        let comment = comment.into();
        let n = lat.len();
        let nt = time.len();

        if lon.len() != n {
            return Err(B3dError::Validation(format!(
                "latitude and longitude must be the same length ({} vs {})",
                n,
                lon.len()
            )));
        }
        if near_station.len() != n {
            return Err(B3dError::Validation(format!(
                "near-station distances must match the point count ({} vs {})",
                n,
                near_station.len()
            )));
        }
        if ex.len() != nt * n {
            return Err(B3dError::Validation(format!(
                "Ex channel must hold {} x {} samples, got {}",
                nt,
                n,
                ex.len()
            )));
        }
        if ey.len() != nt * n {
            return Err(B3dError::Validation(format!(
                "Ey channel must hold {} x {} samples, got {}",
                nt,
                n,
                ey.len()
            )));
        }
        if !wire::is_wire_string(&comment) {
            return Err(B3dError::Validation(
                "comment must be ASCII without embedded NUL".into(),
            ));
        }

        let grid_shape = match grid_shape {
            Some(shape) if shape.len() == n => shape,
            Some(shape) => {
                debug!(%shape, points = n, "grid hint does not cover point count, using n-by-1");
                GridShape::column_vector(n)
            }
            None => GridShape::column_vector(n),
        };

        Ok(Self {
            comment,
            grid_shape,
            lat,
            lon,
            near_station,
            time,
            ex,
            ey,
        })
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn grid_shape(&self) -> GridShape {
        self.grid_shape
    }

    /// Number of grid points.
    pub fn n_points(&self) -> usize {
        self.lat.len()
    }

    /// Number of time steps.
    pub fn n_times(&self) -> usize {
        self.time.len()
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    pub fn near_station(&self) -> &[f64] {
        &self.near_station
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Ex channel, station-major within each time step.
    pub fn ex(&self) -> &[f32] {
        &self.ex
    }

    /// Ey channel, station-major within each time step.
    pub fn ey(&self) -> &[f32] {
        &self.ey
    }

    pub fn ex_at(&self, t: usize, point: usize) -> f32 {
        self.ex[t * self.n_points() + point]
    }

    pub fn ey_at(&self, t: usize, point: usize) -> f32 {
        self.ey[t * self.n_points() + point]
    }

    /// Serialize to the on-disk byte layout.
    pub fn to_bytes(&self) -> Bytes {
        writer::encode(self)
    }

    /// Decode a fully-loaded buffer.
    pub fn from_bytes(buf: &[u8]) -> B3dResult<Self> {
        reader::decode(buf)
    }

    /// Write atomically: the full record is serialized in memory, written
    /// to a temporary file next to `path`, and only renamed into place on
    /// success, so no partial file is ever visible.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> B3dResult<()> {
        writer::write_to_path(self, path.as_ref())
    }

    pub fn read_from_path(path: impl AsRef<Path>) -> B3dResult<Self> {
        let buf = std::fs::read(path)?;
        reader::decode(&buf)
    }
}
