//! Toroidal grid geometry.
//!
//! The continuous plane is `[0, height) × [0, width)` with opposite edges
//! identified.  Coordinate `x` runs along rows (`height`), `y` along columns
//! (`width`), so a point `(x, y)` lives over field cell `(row, col)`.

use crate::{PhysError, PhysResult};

/// Field dimensions, validated positive at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    pub height: usize,
    pub width: usize,
}

impl GridDims {
    /// Reject zero-sized grids.
    pub fn new(height: usize, width: usize) -> PhysResult<Self> {
        if height == 0 || width == 0 {
            return Err(PhysError::InvalidDimensions { height, width });
        }
        Ok(Self { height, width })
    }

    /// Total number of cells.
    #[inline]
    pub fn cells(self) -> usize {
        self.height * self.width
    }

    /// Row-major linear index of `(row, col)`.
    #[inline]
    pub fn index_of(self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Wrap a continuous row coordinate into `[0, height)`.
    #[inline]
    pub fn wrap_x(self, x: f64) -> f64 {
        wrap_coord(x, self.height as f64)
    }

    /// Wrap a continuous column coordinate into `[0, width)`.
    #[inline]
    pub fn wrap_y(self, y: f64) -> f64 {
        wrap_coord(y, self.width as f64)
    }

    /// Nearest cell to a continuous point, wrapped onto the torus.
    #[inline]
    pub fn nearest_cell(self, x: f64, y: f64) -> (usize, usize) {
        (nearest_index(x, self.height), nearest_index(y, self.width))
    }
}

/// Euclidean modulo of a coordinate with a strict upper bound.
///
/// `rem_euclid` can return exactly `dim` for tiny negative inputs
/// (`-1e-17 mod 10 == 10.0` after rounding), which is folded back to 0.
#[inline]
pub fn wrap_coord(v: f64, dim: f64) -> f64 {
    let r = v.rem_euclid(dim);
    if r >= dim { 0.0 } else { r }
}

/// `true` if `v` lies outside `[0, dim)`.
#[inline]
pub fn out_of_range(v: f64, dim: f64) -> bool {
    v < 0.0 || v >= dim
}

/// Round to nearest (ties to even) and reduce modulo `dim`.
///
/// Any finite input maps to a valid index no matter how far it has drifted.
#[inline]
pub fn nearest_index(v: f64, dim: usize) -> usize {
    (v.round_ties_even() as i64).rem_euclid(dim as i64) as usize
}

/// Histogram bin for half-integer bin edges, reduced modulo `dim`.
///
/// Bin `k` covers `[k - 0.5, k + 0.5)`, so `v` lands in `round(v)` with exact
/// halves going up.
#[inline]
pub fn bin_index(v: f64, dim: usize) -> usize {
    ((v + 0.5).floor() as i64).rem_euclid(dim as i64) as usize
}
