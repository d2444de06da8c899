//! Error types for the software pipeline

use thiserror::Error;

/// Errors raised by the core library
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Matrix product with incompatible operands. Unreachable with the fixed 4x4 path.
    #[error("dimension mismatch: cannot multiply {}x{} by {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("malformed mesh source at line {line}: {reason}")]
    MalformedSource { line: usize, reason: String },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
