//! Error types for the B3D codec.

use field_common::WireError;
use thiserror::Error;

/// Result type alias for B3D operations.
pub type B3dResult<T> = Result<T, B3dError>;

#[derive(Debug, Error)]
pub enum B3dError {
    /// The buffer does not start with the B3D magic code.
    #[error("not a B3D file: magic code mismatch")]
    FormatMismatch,

    /// Recognized B3D file with a version this codec cannot decode.
    #[error("unsupported B3D version: {0}")]
    UnsupportedVersion(u32),

    /// Recognized B3D file with a feature combination this codec cannot decode.
    #[error("unsupported B3D layout: {0}")]
    UnsupportedLayout(String),

    /// Buffer shorter than the header declares, or malformed string data.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Shape/type precondition violated before any bytes were written.
    #[error("invalid B3D document: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
