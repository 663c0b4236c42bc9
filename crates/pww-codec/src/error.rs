//! Error types for the PWW codec.

use field_common::WireError;
use thiserror::Error;

/// Result type alias for PWW operations.
pub type PwwResult<T> = Result<T, PwwError>;

#[derive(Debug, Error)]
pub enum PwwError {
    /// The buffer does not start with the PWW magic constants.
    #[error("not a PWW file: magic constants mismatch")]
    FormatMismatch,

    /// Recognized PWW file with a version this codec cannot decode.
    #[error("unsupported PWW version: {0}")]
    UnsupportedVersion(i16),

    /// Recognized PWW file with a feature combination this codec cannot decode.
    #[error("unsupported PWW layout: {0}")]
    UnsupportedLayout(String),

    /// Buffer shorter than the header declares, or malformed string data.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Shape/type precondition violated before any bytes were written, or
    /// structurally inconsistent input on read.
    #[error("invalid PWW data: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
