//! PWW quantized weather station archive codec.
//!
//! PWW files pack multi-variable weather time series for a grid of
//! stations into one byte per sample: each variable carries a fixed
//! physical conversion chosen so the useful range fits 0..=254, and 255 is
//! reserved for missing or out-of-range values. The station block stores
//! full metadata per station (coordinates, elevation, name, country,
//! region), and the sample block is ordered time-major, then variable,
//! then station.
//!
//! Quantization is lossy and irreversible: decoding recovers each
//! variable in its declared unit to within one quantization step, and
//! cannot distinguish a true 255 from a clipped value.
//!
//! All multi-byte values are little-endian. Files are written in one
//! atomic pass and read from a fully-loaded buffer.

pub mod dataset;
pub mod error;
mod reader;
pub mod variable;
mod writer;

pub use dataset::{PwwArchive, PwwChannel, ShapeSource, WeatherDataset};
pub use error::{PwwError, PwwResult};
pub use variable::{WeatherVariable, MISSING_SENTINEL};
pub use writer::{PWW_MAGIC_1, PWW_MAGIC_2, PWW_VERSION};
