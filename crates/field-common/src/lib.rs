//! Common types and utilities shared by the station field codecs.

pub mod bbox;
pub mod grid;
pub mod station;
pub mod time;
pub mod wire;

pub use bbox::BoundingBox;
pub use grid::{GridShape, LONGITUDE_JUMP_THRESHOLD};
pub use station::{Station, StationGrid, StationGridError};
pub use time::{datetime_to_epoch_days, epoch_days_to_datetime, TimeAxis, TimeAxisError, TimeUnits};
pub use wire::{ByteReader, WireError};
