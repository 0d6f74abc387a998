use phys_core::PhysError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("shape mismatch: expected {expected_height}x{expected_width}, got {got_height}x{got_width}")]
    ShapeMismatch {
        expected_height: usize,
        expected_width:  usize,
        got_height:      usize,
        got_width:       usize,
    },

    #[error("{got} cells cannot fill a {height}x{width} field")]
    LengthMismatch {
        height: usize,
        width:  usize,
        got:    usize,
    },

    #[error(transparent)]
    Core(#[from] PhysError),
}

pub type FieldResult<T> = Result<T, FieldError>;
