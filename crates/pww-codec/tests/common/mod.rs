//! Hand-built PWW byte fixtures for format tests.

/// Raw field-by-field PWW builder. Every header field can be set to an
/// invalid or legacy value the library writer refuses to produce.
pub struct RawPww {
    pub magic_1: i16,
    pub magic_2: i16,
    pub version: i16,
    pub start_days: f64,
    pub end_days: f64,
    /// (min_lat, max_lat, min_lon, max_lon)
    pub bbox: (f64, f64, f64, f64),
    pub meta: Vec<String>,
    pub time_count: i32,
    pub interval_seconds: i32,
    pub loc_extras: i16,
    pub codes: Vec<u16>,
    /// Variable-count echo; `None` writes the code count.
    pub echo: Option<i16>,
    /// Explicit per-sample dates, written only when `interval_seconds == 0`.
    pub dates: Vec<f64>,
    /// (lat, lon, elevation, name, country, region)
    pub stations: Vec<(f64, f64, i16, String, String, String)>,
    pub data: Vec<u8>,
}

impl Default for RawPww {
    fn default() -> Self {
        // 2x2 grid, 2 time steps, one identity-transform variable
        // (total cloud cover, code 119).
        let start_days = 45_000.0;
        let end_days = 45_000.25;
        Self {
            magic_1: 2001,
            magic_2: 8065,
            version: 1,
            start_days,
            end_days,
            bbox: (30.5, 31.0, -85.0, -84.5),
            meta: vec!["fixture".into(), "[2, 2]".into()],
            time_count: 2,
            interval_seconds: 0,
            loc_extras: 0,
            codes: vec![119],
            echo: None,
            dates: vec![start_days, end_days],
            stations: vec![
                (30.5, -84.5, 10, "A".into(), "US".into(), "FL".into()),
                (30.5, -85.0, 12, "B".into(), "US".into(), "FL".into()),
                (31.0, -84.5, 14, "C".into(), "US".into(), "GA".into()),
                (31.0, -85.0, 16, "D".into(), "US".into(), "GA".into()),
            ],
            data: (0..8).collect(),
        }
    }
}

impl RawPww {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.magic_1.to_le_bytes());
        buf.extend_from_slice(&self.magic_2.to_le_bytes());
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.start_days.to_le_bytes());
        buf.extend_from_slice(&self.end_days.to_le_bytes());
        buf.extend_from_slice(&self.bbox.0.to_le_bytes());
        buf.extend_from_slice(&self.bbox.1.to_le_bytes());
        buf.extend_from_slice(&self.bbox.2.to_le_bytes());
        buf.extend_from_slice(&self.bbox.3.to_le_bytes());
        buf.extend_from_slice(&(self.meta.len() as i16).to_le_bytes());
        for s in &self.meta {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        buf.extend_from_slice(&self.time_count.to_le_bytes());
        buf.extend_from_slice(&self.interval_seconds.to_le_bytes());
        buf.extend_from_slice(&(self.stations.len() as i32).to_le_bytes());
        buf.extend_from_slice(&self.loc_extras.to_le_bytes());
        buf.extend_from_slice(&(self.codes.len() as i16).to_le_bytes());
        for &code in &self.codes {
            buf.extend_from_slice(&code.to_le_bytes());
        }
        let echo = self.echo.unwrap_or(self.codes.len() as i16);
        buf.extend_from_slice(&echo.to_le_bytes());
        if self.interval_seconds == 0 {
            for &d in &self.dates {
                buf.extend_from_slice(&d.to_le_bytes());
            }
        }
        for (lat, lon, elev, name, country, region) in &self.stations {
            buf.extend_from_slice(&lat.to_le_bytes());
            buf.extend_from_slice(&lon.to_le_bytes());
            buf.extend_from_slice(&elev.to_le_bytes());
            for s in [name, country, region] {
                buf.extend_from_slice(s.as_bytes());
                buf.push(0);
            }
        }
        buf.extend_from_slice(&self.data);
        buf
    }
}
