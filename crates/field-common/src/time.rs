//! Time axis types and epoch conversions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds between the OLE Automation date epoch (1899-12-30T00:00:00Z)
/// and the Unix epoch. The quantized archive header stores timestamps as
/// fractional days since the former.
pub const OLE_EPOCH_UNIX_OFFSET_SECONDS: i64 = 2_209_161_600;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a UTC timestamp to fractional days since the OLE epoch.
pub fn datetime_to_epoch_days(dt: DateTime<Utc>) -> f64 {
    let unix_ms = dt.timestamp_millis() as f64;
    (unix_ms / 1000.0 + OLE_EPOCH_UNIX_OFFSET_SECONDS as f64) / SECONDS_PER_DAY
}

/// Convert fractional days since the OLE epoch back to a UTC timestamp,
/// rounded to whole milliseconds. `None` for non-finite or out-of-range
/// values.
pub fn epoch_days_to_datetime(days: f64) -> Option<DateTime<Utc>> {
    if !days.is_finite() {
        return None;
    }
    let unix_ms = (days * SECONDS_PER_DAY - OLE_EPOCH_UNIX_OFFSET_SECONDS as f64) * 1000.0;
    DateTime::<Utc>::from_timestamp_millis(unix_ms.round() as i64)
}

/// Unit code for the float-grid time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnits {
    Milliseconds,
    Seconds,
    Hours,
}

impl TimeUnits {
    pub fn code(self) -> u32 {
        match self {
            TimeUnits::Milliseconds => 0,
            TimeUnits::Seconds => 1,
            TimeUnits::Hours => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(TimeUnits::Milliseconds),
            1 => Some(TimeUnits::Seconds),
            2 => Some(TimeUnits::Hours),
            _ => None,
        }
    }

    /// Duration of `offset` ticks in this unit.
    pub fn duration(self, offset: u32) -> Duration {
        match self {
            TimeUnits::Milliseconds => Duration::milliseconds(offset as i64),
            TimeUnits::Seconds => Duration::seconds(offset as i64),
            TimeUnits::Hours => Duration::hours(offset as i64),
        }
    }
}

#[derive(Debug, Error)]
pub enum TimeAxisError {
    #[error("time offsets decrease at index {index}")]
    NotMonotonic { index: usize },
}

/// Explicit, variable-spacing time axis of the float-grid format.
///
/// `time_0` is the integer reference epoch the offsets count from;
/// offsets must be non-decreasing. Fixed-step axes are not representable —
/// both formats reject the reserved step field when non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    time_0: u32,
    units: TimeUnits,
    offsets: Vec<u32>,
}

impl TimeAxis {
    pub fn new(time_0: u32, units: TimeUnits, offsets: Vec<u32>) -> Result<Self, TimeAxisError> {
        if let Some(index) = offsets.windows(2).position(|w| w[1] < w[0]) {
            return Err(TimeAxisError::NotMonotonic { index: index + 1 });
        }
        Ok(Self {
            time_0,
            units,
            offsets,
        })
    }

    pub fn time_0(&self) -> u32 {
        self.time_0
    }

    pub fn units(&self) -> TimeUnits {
        self.units
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
