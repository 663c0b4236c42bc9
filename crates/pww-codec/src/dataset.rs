//! In-memory dataset types for the PWW codec.

use crate::error::{PwwError, PwwResult};
use crate::variable::WeatherVariable;
use crate::{reader, writer};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use field_common::{wire, BoundingBox, StationGrid};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Writer-side input: the station grid, time axis, variable list, and the
/// full-precision SI sample tensor, owned together.
///
/// The sample tensor is indexed `[time][variable][station]` with stations
/// in the grid's row-major order — the same order the station block is
/// emitted in, which the wire format itself cannot verify. Owning the
/// `StationGrid` and the tensor in one validated value is what keeps the
/// two aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDataset {
    label: String,
    grid: StationGrid,
    bbox: BoundingBox,
    times: Vec<DateTime<Utc>>,
    variables: Vec<WeatherVariable>,
    samples: Vec<f64>,
}

impl WeatherDataset {
    /// Assemble and validate a dataset.
    ///
    /// `samples` holds `times.len() * variables.len() * grid.len()` SI
    /// values in `[time][variable][station]` order; NaN marks missing.
    pub fn new(
        label: impl Into<String>,
        grid: StationGrid,
        times: Vec<DateTime<Utc>>,
        variables: Vec<WeatherVariable>,
        samples: Vec<f64>,
    ) -> PwwResult<Self> {
        let label = label.into();

        if grid.is_empty() {
            return Err(PwwError::Validation("station grid is empty".into()));
        }
        if times.is_empty() {
            return Err(PwwError::Validation("time axis is empty".into()));
        }
        if variables.is_empty() {
            return Err(PwwError::Validation("variable list is empty".into()));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(PwwError::Validation(format!(
                "timestamps decrease at index {}",
                i + 1
            )));
        }
        for (i, a) in variables.iter().enumerate() {
            if variables[i + 1..].contains(a) {
                return Err(PwwError::Validation(format!(
                    "duplicate variable code {}",
                    a.code()
                )));
            }
        }
        let expected = times.len() * variables.len() * grid.len();
        if samples.len() != expected {
            return Err(PwwError::Validation(format!(
                "sample tensor must hold {} x {} x {} = {} values, got {}",
                times.len(),
                variables.len(),
                grid.len(),
                expected,
                samples.len()
            )));
        }
        if !wire::is_wire_string(&label) {
            return Err(PwwError::Validation(
                "label must be ASCII without embedded NUL".into(),
            ));
        }
        for (i, station) in grid.stations().iter().enumerate() {
            for (field, value) in [
                ("name", &station.name),
                ("country", &station.country),
                ("region", &station.region),
            ] {
                if !wire::is_wire_string(value) {
                    return Err(PwwError::Validation(format!(
                        "station {i} {field} must be ASCII without embedded NUL"
                    )));
                }
            }
        }

        // Grid validated non-empty above.
        let bbox = match grid.bounding_box() {
            Some(bbox) => bbox,
            None => return Err(PwwError::Validation("station grid is empty".into())),
        };

        Ok(Self {
            label,
            grid,
            bbox,
            times,
            variables,
            samples,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn grid(&self) -> &StationGrid {
        &self.grid
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn variables(&self) -> &[WeatherVariable] {
        &self.variables
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// SI sample at `(time, variable, station)` indices.
    pub fn sample(&self, t: usize, v: usize, station: usize) -> f64 {
        let n = self.grid.len();
        self.samples[(t * self.variables.len() + v) * n + station]
    }

    /// Serialize to the on-disk byte layout, quantizing every sample.
    pub fn to_bytes(&self) -> Bytes {
        writer::encode(self)
    }

    /// Write atomically: the full record is serialized in memory, written
    /// to a temporary file next to `path`, and only renamed into place on
    /// success, so no partial file is ever visible.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> PwwResult<()> {
        writer::write_to_path(self, path.as_ref())
    }
}

/// Where a decoded archive's grid shape came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeSource {
    /// Persisted grid-shape metadata string.
    Metadata,
    /// Legacy longitude-jump heuristic; best effort only.
    Inferred,
}

/// One decoded channel: the variable and its `[time][station]` values in
/// the variable's declared unit, NaN where the file stored the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct PwwChannel {
    pub variable: WeatherVariable,
    pub values: Vec<f64>,
}

/// Reader-side output: header metadata, station grid, time axis, and the
/// dequantized channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PwwArchive {
    pub label: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Bounding box as stored in the header (not recomputed).
    pub bounding_box: BoundingBox,
    pub grid: StationGrid,
    pub shape_source: ShapeSource,
    pub times: Vec<DateTime<Utc>>,
    channels: Vec<PwwChannel>,
}

impl PwwArchive {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        label: Option<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        bounding_box: BoundingBox,
        grid: StationGrid,
        shape_source: ShapeSource,
        times: Vec<DateTime<Utc>>,
        channels: Vec<PwwChannel>,
    ) -> Self {
        Self {
            label,
            start,
            end,
            bounding_box,
            grid,
            shape_source,
            times,
            channels,
        }
    }

    /// Decode a fully-loaded buffer.
    pub fn from_bytes(buf: &[u8]) -> PwwResult<Self> {
        reader::decode(buf)
    }

    pub fn read_from_path(path: impl AsRef<Path>) -> PwwResult<Self> {
        let buf = std::fs::read(path)?;
        reader::decode(&buf)
    }

    pub fn channels(&self) -> &[PwwChannel] {
        &self.channels
    }

    pub fn variables(&self) -> Vec<WeatherVariable> {
        self.channels.iter().map(|c| c.variable).collect()
    }

    /// Values of one variable, `[time][station]` in grid row-major order.
    pub fn channel(&self, variable: WeatherVariable) -> Option<&[f64]> {
        self.channels
            .iter()
            .find(|c| c.variable == variable)
            .map(|c| c.values.as_slice())
    }

    /// Value at `(time, row, col)`, or `None` out of range.
    pub fn value(
        &self,
        variable: WeatherVariable,
        t: usize,
        row: usize,
        col: usize,
    ) -> Option<f64> {
        let shape = self.grid.shape();
        if t >= self.times.len() || row >= shape.rows || col >= shape.cols {
            return None;
        }
        self.channel(variable)
            .map(|values| values[t * self.grid.len() + shape.flat_index(row, col)])
    }
}
