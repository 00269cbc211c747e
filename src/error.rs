//! Error types for raster and tile operations

use thiserror::Error;

/// Raster buffer errors
///
/// Pixel reads and writes on an unbound store are not errors; they degrade
/// to transparent black or a no-op. Only these conditions are reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height of zero
    #[error("invalid dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: usize, height: usize },

    /// Coordinate or region outside the buffer
    #[error("({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Attached store does not hold width * height * 4 bytes
    #[error("store holds {actual} bytes, expected {expected}")]
    StoreSize { expected: usize, actual: usize },

    /// Bitmap worker went away before producing a result
    #[error("bitmap materialization failed: {0}")]
    Materialize(String),
}

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, RasterError>;
