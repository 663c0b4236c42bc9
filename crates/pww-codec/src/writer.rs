//! PWW emission.

use crate::dataset::WeatherDataset;
use crate::error::PwwResult;
use crate::variable::{WeatherVariable, MISSING_SENTINEL};
use bytes::{BufMut, Bytes, BytesMut};
use field_common::time::datetime_to_epoch_days;
use field_common::wire;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// First magic constant of the PWW header.
pub const PWW_MAGIC_1: i16 = 2001;
/// Second magic constant of the PWW header.
pub const PWW_MAGIC_2: i16 = 8065;
/// The only file version this codec reads and writes.
pub const PWW_VERSION: i16 = 1;

/// Round, clip, and cast one converted sample to its stored byte.
///
/// Everything the byte cannot represent — NaN, negatives, values at or
/// above 255 — becomes the missing sentinel. Lossy by design; the reader
/// cannot tell a clipped value from a true missing one.
pub(crate) fn quantize_sample(variable: WeatherVariable, si: f64) -> u8 {
    let q = variable.quantize(si).round();
    if !q.is_finite() || q < 0.0 || q >= f64::from(MISSING_SENTINEL) {
        MISSING_SENTINEL
    } else {
        q as u8
    }
}

/// Serialize a validated dataset into the wire layout.
pub(crate) fn encode(ds: &WeatherDataset) -> Bytes {
    let n = ds.grid().len();
    let nt = ds.times().len();
    let nvar = ds.variables().len();
    let mut buf = BytesMut::with_capacity(128 + n * 48 + nt * 8 + nt * nvar * n);

    buf.put_i16_le(PWW_MAGIC_1);
    buf.put_i16_le(PWW_MAGIC_2);
    buf.put_i16_le(PWW_VERSION);

    buf.put_f64_le(datetime_to_epoch_days(ds.times()[0]));
    buf.put_f64_le(datetime_to_epoch_days(ds.times()[nt - 1]));

    let bbox = ds.bounding_box();
    buf.put_f64_le(bbox.min_lat);
    buf.put_f64_le(bbox.max_lat);
    buf.put_f64_le(bbox.min_lon);
    buf.put_f64_le(bbox.max_lon);

    // Two metadata strings: free-text label, then the grid shape.
    buf.put_i16_le(2);
    put_cstring(&mut buf, ds.label());
    put_cstring(&mut buf, &ds.grid().shape().to_string());

    buf.put_i32_le(nt as i32);
    buf.put_i32_le(0); // irregular sampling: explicit dates follow
    buf.put_i32_le(n as i32);
    buf.put_i16_le(0); // reserved per-location extras
    buf.put_i16_le(nvar as i16);
    for variable in ds.variables() {
        buf.put_u16_le(variable.code());
    }
    buf.put_i16_le(nvar as i16); // variable-count echo

    for &t in ds.times() {
        buf.put_f64_le(datetime_to_epoch_days(t));
    }

    // Station block, in the same row-major order the samples flatten to.
    for station in ds.grid().stations() {
        buf.put_f64_le(station.lat);
        buf.put_f64_le(station.lon);
        buf.put_i16_le(station.elevation_m);
        put_cstring(&mut buf, &station.name);
        put_cstring(&mut buf, &station.country);
        put_cstring(&mut buf, &station.region);
    }

    // Sample block: time-major, then variable, then station.
    for t in 0..nt {
        for (v, &variable) in ds.variables().iter().enumerate() {
            for station in 0..n {
                buf.put_u8(quantize_sample(variable, ds.sample(t, v, station)));
            }
        }
    }

    buf.freeze()
}

fn put_cstring(buf: &mut BytesMut, s: &str) {
    let mut raw = Vec::with_capacity(s.len() + 1);
    wire::put_cstring(&mut raw, s);
    buf.put_slice(&raw);
}

/// Serialize fully in memory, then move the bytes into place through a
/// temporary file so a failure cannot leave a partial file behind.
pub(crate) fn write_to_path(ds: &WeatherDataset, path: &Path) -> PwwResult<()> {
    let encoded = encode(ds);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(&encoded)?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = encoded.len(), "wrote PWW file");
    Ok(())
}
