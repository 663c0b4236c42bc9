//! B3D electric-field grid codec.
//!
//! B3D files carry full-precision time series of the horizontal
//! geoelectric field (Ex, Ey) sampled at a set of georeferenced grid
//! points, plus the distance from each point to its nearest observing
//! station. Points are listed explicitly; an optional metadata string
//! records how they tile into a 2-D grid.
//!
//! All multi-byte values are little-endian. Files are written in one
//! atomic pass and read from a fully-loaded buffer.

pub mod document;
pub mod error;
mod reader;
mod writer;

pub use document::{B3dDocument, B3D_MAGIC, B3D_VERSION, LOCATION_FORMAT_POINTS};
pub use error::{B3dError, B3dResult};
