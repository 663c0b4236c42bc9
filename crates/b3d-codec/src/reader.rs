//! B3D decoding.

use crate::document::{B3dDocument, B3D_MAGIC, B3D_VERSION, LOCATION_FORMAT_POINTS};
use crate::error::{B3dError, B3dResult};
use field_common::{ByteReader, GridShape, TimeAxis, TimeUnits};
use tracing::debug;

/// Decode a fully-loaded B3D buffer.
pub(crate) fn decode(buf: &[u8]) -> B3dResult<B3dDocument> {
    let mut r = ByteReader::new(buf);

    let magic = r.u32_le()?;
    if magic != B3D_MAGIC {
        return Err(B3dError::FormatMismatch);
    }
    let version = r.u32_le()?;
    if version != B3D_VERSION {
        return Err(B3dError::UnsupportedVersion(version));
    }

    let n_meta = r.u32_le()? as usize;
    let mut meta_strings = Vec::with_capacity(n_meta.min(16));
    for _ in 0..n_meta {
        meta_strings.push(r.cstring()?);
    }
    let comment = meta_strings
        .first()
        .cloned()
        .unwrap_or_else(|| "No comment".to_string());

    let float_channels = r.u32_le()?;
    let byte_channels = r.u32_le()?;
    let loc_format = r.u32_le()?;
    if float_channels < 2 {
        return Err(B3dError::UnsupportedLayout(format!(
            "at least 2 float channels are required, header declares {float_channels}"
        )));
    }
    if loc_format != LOCATION_FORMAT_POINTS {
        return Err(B3dError::UnsupportedLayout(format!(
            "only location format {LOCATION_FORMAT_POINTS} is supported, got {loc_format}"
        )));
    }

    let n = r.u32_le()? as usize;
    // One (lon, lat, aux) triple of doubles per point; validate the whole
    // block length before allocating.
    let block = r.bytes(n.saturating_mul(24))?;
    let mut lon = Vec::with_capacity(n);
    let mut lat = Vec::with_capacity(n);
    let mut near_station = Vec::with_capacity(n);
    let f64_at = |chunk: &[u8], off: usize| {
        f64::from_le_bytes([
            chunk[off],
            chunk[off + 1],
            chunk[off + 2],
            chunk[off + 3],
            chunk[off + 4],
            chunk[off + 5],
            chunk[off + 6],
            chunk[off + 7],
        ])
    };
    for triple in block.chunks_exact(24) {
        lon.push(f64_at(triple, 0));
        lat.push(f64_at(triple, 8));
        near_station.push(f64_at(triple, 16));
    }

    // The grid hint is best-effort metadata: a missing or unparsable
    // second string degrades to n-by-1 instead of failing the read.
    let grid_shape = meta_strings
        .get(1)
        .and_then(|text| text.parse::<GridShape>().ok())
        .filter(|shape| shape.len() == n)
        .unwrap_or_else(|| {
            debug!(points = n, "no usable grid hint, using n-by-1");
            GridShape::column_vector(n)
        });

    let time_0 = r.u32_le()?;
    let units_code = r.u32_le()?;
    let units = TimeUnits::from_code(units_code).ok_or_else(|| {
        B3dError::UnsupportedLayout(format!("unknown time units code {units_code}"))
    })?;
    let _time_offset = r.u32_le()?; // reserved
    let time_step = r.u32_le()?;
    if time_step != 0 {
        return Err(B3dError::UnsupportedLayout(
            "fixed-interval time axes are not supported, only explicit time points".into(),
        ));
    }
    let nt = r.u32_le()? as usize;
    let offsets = r.u32_vec_le(nt)?;
    let time = TimeAxis::new(time_0, units, offsets)
        .map_err(|e| B3dError::Validation(e.to_string()))?;

    let npts = nt * n;
    let mut ex;
    let mut ey;
    if float_channels == 2 && byte_channels == 0 {
        let raw = r.f32_vec_le(npts * 2)?;
        ex = Vec::with_capacity(npts);
        ey = Vec::with_capacity(npts);
        for pair in raw.chunks_exact(2) {
            ex.push(pair[0]);
            ey.push(pair[1]);
        }
    } else {
        // Extra channels are interleaved per sample; keep the first two
        // floats of each record and skip the rest of the stride.
        let stride = float_channels as usize * 4 + byte_channels as usize;
        ex = Vec::with_capacity(npts.min(r.remaining() / stride));
        ey = Vec::with_capacity(npts.min(r.remaining() / stride));
        for _ in 0..npts {
            let record = r.bytes(stride)?;
            ex.push(f32::from_le_bytes([
                record[0], record[1], record[2], record[3],
            ]));
            ey.push(f32::from_le_bytes([
                record[4], record[5], record[6], record[7],
            ]));
        }
    }

    B3dDocument::new(
        comment,
        Some(grid_shape),
        lat,
        lon,
        near_station,
        time,
        ex,
        ey,
    )
}
