//! Error types for phys-output.

use thiserror::Error;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[cfg(feature = "png")]
    #[error("{height}x{width} field is too large for an image")]
    ImageTooLarge { height: usize, width: usize },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
