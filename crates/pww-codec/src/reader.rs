//! PWW decoding.

use crate::dataset::{PwwArchive, PwwChannel, ShapeSource};
use crate::error::{PwwError, PwwResult};
use crate::variable::{WeatherVariable, MISSING_SENTINEL};
use crate::writer::{PWW_MAGIC_1, PWW_MAGIC_2, PWW_VERSION};
use chrono::{DateTime, Duration, Utc};
use field_common::time::epoch_days_to_datetime;
use field_common::{
    BoundingBox, ByteReader, GridShape, Station, StationGrid, LONGITUDE_JUMP_THRESHOLD,
};
use tracing::{debug, warn};

/// Decode a fully-loaded PWW buffer.
pub(crate) fn decode(buf: &[u8]) -> PwwResult<PwwArchive> {
    let mut r = ByteReader::new(buf);

    let magic_1 = r.i16_le()?;
    let magic_2 = r.i16_le()?;
    if magic_1 != PWW_MAGIC_1 || magic_2 != PWW_MAGIC_2 {
        return Err(PwwError::FormatMismatch);
    }
    let version = r.i16_le()?;
    if version != PWW_VERSION {
        return Err(PwwError::UnsupportedVersion(version));
    }

    let start_days = r.f64_le()?;
    let end_days = r.f64_le()?;
    let start = epoch_days_to_datetime(start_days)
        .ok_or_else(|| PwwError::Validation(format!("start date {start_days} out of range")))?;
    let end = epoch_days_to_datetime(end_days)
        .ok_or_else(|| PwwError::Validation(format!("end date {end_days} out of range")))?;

    let bounding_box = BoundingBox::new(r.f64_le()?, r.f64_le()?, r.f64_le()?, r.f64_le()?);

    let meta_count = r.i16_le()?;
    if meta_count < 0 {
        return Err(PwwError::Validation(format!(
            "negative metadata string count {meta_count}"
        )));
    }
    let mut meta_strings = Vec::with_capacity((meta_count as usize).min(16));
    for _ in 0..meta_count {
        meta_strings.push(r.cstring()?);
    }
    let label = meta_strings.first().filter(|s| !s.is_empty()).cloned();

    let nt = non_negative(r.i32_le()?, "time count")?;
    let interval_seconds = non_negative(r.i32_le()?, "sample interval")?;
    let n = non_negative(r.i32_le()?, "station count")?;
    let loc_extras = r.i16_le()?;
    if loc_extras != 0 {
        return Err(PwwError::UnsupportedLayout(format!(
            "extra per-location variables ({loc_extras}) are not supported"
        )));
    }
    let nvar = non_negative(i32::from(r.i16_le()?), "variable count")?;

    let mut variables = Vec::with_capacity(nvar);
    for _ in 0..nvar {
        let code = r.u16_le()?;
        let variable = WeatherVariable::from_code(code).ok_or_else(|| {
            PwwError::UnsupportedLayout(format!("unknown variable code {code}"))
        })?;
        variables.push(variable);
    }
    let echo = r.i16_le()?;
    if echo as usize != nvar {
        warn!(echo, declared = nvar, "variable-count echo mismatch");
    }

    // Explicit per-sample dates and a fixed interval are mutually
    // exclusive: interval 0 means the date list follows.
    let times = if interval_seconds == 0 {
        let mut times = Vec::with_capacity(nt.min(r.remaining() / 8));
        for _ in 0..nt {
            let days = r.f64_le()?;
            times.push(epoch_days_to_datetime(days).ok_or_else(|| {
                PwwError::Validation(format!("sample date {days} out of range"))
            })?);
        }
        times
    } else {
        debug!(interval_seconds, nt, "fixed-interval file, distributing timestamps");
        distribute_times(start, end, nt)
    };

    let mut stations = Vec::with_capacity(n.min(r.remaining() / 21));
    for _ in 0..n {
        let lat = r.f64_le()?;
        let lon = r.f64_le()?;
        let elevation_m = r.i16_le()?;
        let name = r.cstring()?;
        let country = r.cstring()?;
        let region = r.cstring()?;
        stations.push(Station {
            lat,
            lon,
            elevation_m,
            name,
            country,
            region,
        });
    }

    let metadata_shape = meta_strings
        .get(1)
        .and_then(|text| text.parse::<GridShape>().ok())
        .filter(|shape| shape.len() == n);
    let (shape, shape_source) = match metadata_shape {
        Some(shape) => (shape, ShapeSource::Metadata),
        None => {
            let lons: Vec<f64> = stations.iter().map(|s| s.lon).collect();
            let inferred = GridShape::infer_from_longitudes(&lons, LONGITUDE_JUMP_THRESHOLD);
            warn!(
                %inferred,
                "no usable grid shape metadata, inferred from longitude jumps (best effort)"
            );
            (inferred, ShapeSource::Inferred)
        }
    };
    let grid =
        StationGrid::new(stations, shape).map_err(|e| PwwError::Validation(e.to_string()))?;

    let sample_bytes = nt
        .checked_mul(nvar)
        .and_then(|x| x.checked_mul(n))
        .ok_or_else(|| PwwError::Validation("sample block size overflows".into()))?;
    let data = r.bytes(sample_bytes)?;
    if r.remaining() > 0 {
        warn!(trailing = r.remaining(), "ignoring trailing bytes after sample block");
    }

    // Dequantize per channel, reinstating the sentinel as NaN.
    let mut channels = Vec::with_capacity(nvar);
    for (v, &variable) in variables.iter().enumerate() {
        let mut values = Vec::with_capacity(nt * n);
        for t in 0..nt {
            let base = (t * nvar + v) * n;
            for s in 0..n {
                let raw = data[base + s];
                values.push(if raw == MISSING_SENTINEL {
                    f64::NAN
                } else {
                    variable.dequantize(f64::from(raw))
                });
            }
        }
        channels.push(PwwChannel { variable, values });
    }

    Ok(PwwArchive::from_parts(
        label,
        start,
        end,
        bounding_box,
        grid,
        shape_source,
        times,
        channels,
    ))
}

fn non_negative(value: i32, what: &str) -> PwwResult<usize> {
    usize::try_from(value).map_err(|_| PwwError::Validation(format!("negative {what}: {value}")))
}

/// Evenly distribute `count` timestamps across the closed header range,
/// matching how fixed-interval legacy files are interpreted.
fn distribute_times(start: DateTime<Utc>, end: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let total_ms = (end - start).num_milliseconds() as f64;
    (0..count)
        .map(|i| {
            let offset = total_ms * i as f64 / (count - 1) as f64;
            start + Duration::milliseconds(offset.round() as i64)
        })
        .collect()
}
