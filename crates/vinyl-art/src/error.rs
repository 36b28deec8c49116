//! Error types for vinyl-art

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for vinyl-art operations
pub type Result<T> = std::result::Result<T, ArtError>;

/// Errors that can occur while producing album art.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArtError {
    /// Reading or writing an image file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Compressing the image data failed.
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),

    /// Width or height is zero or too large for a PNG header.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// The raster does not match the declared dimensions.
    #[error("raster is {actual} bytes, expected {expected}")]
    RasterSize {
        /// Bytes required by the header
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

impl ArtError {
    /// Wrap an I/O error with the path it happened at.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        ArtError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
