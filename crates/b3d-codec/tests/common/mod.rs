//! Hand-built B3D byte fixtures for format tests.

/// Raw field-by-field B3D builder. Every header field can be set to an
/// invalid value, which the library writer refuses to produce.
pub struct RawB3d {
    pub magic: u32,
    pub version: u32,
    pub meta: Vec<String>,
    pub float_channels: u32,
    pub byte_channels: u32,
    pub loc_format: u32,
    /// (lon, lat, near) per point.
    pub points: Vec<(f64, f64, f64)>,
    pub time_0: u32,
    pub units: u32,
    pub time_offset: u32,
    pub time_step: u32,
    pub times: Vec<u32>,
    /// One record per (time, point) sample, each `float_channels*4 +
    /// byte_channels` bytes.
    pub records: Vec<Vec<u8>>,
}

impl Default for RawB3d {
    fn default() -> Self {
        Self {
            magic: 34280,
            version: 4,
            meta: vec!["fixture".into(), "[2, 2]".into()],
            float_channels: 2,
            byte_channels: 0,
            loc_format: 1,
            points: vec![
                (-84.5, 30.5, -1.0),
                (-85.0, 30.5, -1.0),
                (-84.5, 31.0, -1.0),
                (-85.0, 31.0, -1.0),
            ],
            time_0: 0,
            units: 0,
            time_offset: 0,
            time_step: 0,
            times: vec![0, 1000, 2000],
            records: Vec::new(),
        }
    }
}

impl RawB3d {
    /// Fill `records` with two-float samples `(ex, ey)` derived from the
    /// sample index.
    pub fn with_indexed_samples(mut self) -> Self {
        let npts = self.times.len() * self.points.len();
        self.records = (0..npts)
            .map(|i| {
                let mut rec = Vec::new();
                rec.extend_from_slice(&(i as f32).to_le_bytes());
                rec.extend_from_slice(&(-(i as f32)).to_le_bytes());
                rec
            })
            .collect();
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.magic.to_le_bytes());
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&(self.meta.len() as u32).to_le_bytes());
        for s in &self.meta {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        buf.extend_from_slice(&self.float_channels.to_le_bytes());
        buf.extend_from_slice(&self.byte_channels.to_le_bytes());
        buf.extend_from_slice(&self.loc_format.to_le_bytes());
        buf.extend_from_slice(&(self.points.len() as u32).to_le_bytes());
        for &(lon, lat, near) in &self.points {
            buf.extend_from_slice(&lon.to_le_bytes());
            buf.extend_from_slice(&lat.to_le_bytes());
            buf.extend_from_slice(&near.to_le_bytes());
        }
        buf.extend_from_slice(&self.time_0.to_le_bytes());
        buf.extend_from_slice(&self.units.to_le_bytes());
        buf.extend_from_slice(&self.time_offset.to_le_bytes());
        buf.extend_from_slice(&self.time_step.to_le_bytes());
        buf.extend_from_slice(&(self.times.len() as u32).to_le_bytes());
        for &t in &self.times {
            buf.extend_from_slice(&t.to_le_bytes());
        }
        for rec in &self.records {
            buf.extend_from_slice(rec);
        }
        buf
    }
}
