//! B3D emission.

use crate::document::{B3dDocument, B3D_MAGIC, B3D_VERSION, LOCATION_FORMAT_POINTS};
use crate::error::B3dResult;
use bytes::{BufMut, Bytes, BytesMut};
use field_common::wire;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Serialize a validated document into the wire layout.
pub(crate) fn encode(doc: &B3dDocument) -> Bytes {
    let n = doc.n_points();
    let nt = doc.n_times();
    let mut buf = BytesMut::with_capacity(64 + n * 24 + nt * 4 + nt * n * 8);

    buf.put_u32_le(B3D_MAGIC);
    buf.put_u32_le(B3D_VERSION);

    // Two metadata strings: free-text comment, then the grid shape.
    buf.put_u32_le(2);
    put_cstring(&mut buf, doc.comment());
    put_cstring(&mut buf, &doc.grid_shape().to_string());

    buf.put_u32_le(2); // float channels: Ex, Ey
    buf.put_u32_le(0); // byte channels: none
    buf.put_u32_le(LOCATION_FORMAT_POINTS);

    buf.put_u32_le(n as u32);
    for i in 0..n {
        buf.put_f64_le(doc.lon()[i]);
        buf.put_f64_le(doc.lat()[i]);
        buf.put_f64_le(doc.near_station()[i]);
    }

    let time = doc.time();
    buf.put_u32_le(time.time_0());
    buf.put_u32_le(time.units().code());
    buf.put_u32_le(0); // reserved time offset
    buf.put_u32_le(0); // reserved time step: only variable spacing is written
    buf.put_u32_le(nt as u32);
    for &t in time.offsets() {
        buf.put_u32_le(t);
    }

    // Interleaved (Ex, Ey) pairs, station-major within each time step.
    for t in 0..nt {
        for i in 0..n {
            buf.put_f32_le(doc.ex_at(t, i));
            buf.put_f32_le(doc.ey_at(t, i));
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
pub(crate) fn write_to_path(doc: &B3dDocument, path: &Path) -> B3dResult<()> {
    let encoded = encode(doc);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(&encoded)?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = encoded.len(), "wrote B3D file");
    Ok(())
}
