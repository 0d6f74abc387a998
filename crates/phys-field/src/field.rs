//! Dense row-major `f64` grid with periodic sampling.
//!
//! Row index ↔ agent `x`, column index ↔ agent `y`.  Every cell is addressable
//! through wrapped coordinates, so callers never need bounds checks when
//! sampling at a drifted sensor position.

use phys_core::GridDims;

use crate::{FieldError, FieldResult};

/// A `height × width` scalar field.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    dims:  GridDims,
    cells: Vec<f64>,
}

impl Field {
    /// All-zero field of the given dimensions.
    pub fn zeros(dims: GridDims) -> Self {
        Self { dims, cells: vec![0.0; dims.cells()] }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(height: usize, width: usize, cells: Vec<f64>) -> FieldResult<Self> {
        let dims = GridDims::new(height, width)?;
        if cells.len() != dims.cells() {
            return Err(FieldError::LengthMismatch { height, width, got: cells.len() });
        }
        Ok(Self { dims, cells })
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    ///
    /// Drivers use this to synthesize attractant textures.
    pub fn from_fn(dims: GridDims, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut cells = Vec::with_capacity(dims.cells());
        for row in 0..dims.height {
            for col in 0..dims.width {
                cells.push(f(row, col));
            }
        }
        Self { dims, cells }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    /// Row-major cell values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Value at `(row, col)`.  Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[self.dims.index_of(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.dims.index_of(row, col);
        self.cells[idx] = value;
    }

    /// Value at the nearest cell to the continuous point `(x, y)`, wrapped
    /// onto the torus.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (row, col) = self.dims.nearest_cell(x, y);
        self.get(row, col)
    }

    /// Sum over all cells.
    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Largest cell value.
    pub fn max(&self) -> f64 {
        self.cells.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.cells.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Zero every cell in place, keeping the allocation.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    /// Multiply every cell by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.cells {
            *v *= factor;
        }
    }

    /// Clamp every cell into `[lo, hi]`.
    pub fn clamp(&mut self, lo: f64, hi: f64) {
        for v in &mut self.cells {
            *v = v.max(lo).min(hi);
        }
    }

    /// Error unless `other` has the same dimensions as `self`.
    pub fn check_shape(&self, other: &Field) -> FieldResult<()> {
        if self.dims != other.dims {
            return Err(FieldError::ShapeMismatch {
                expected_height: self.dims.height,
                expected_width:  self.dims.width,
                got_height:      other.dims.height,
                got_width:       other.dims.width,
            });
        }
        Ok(())
    }

    /// `self += other`, cell-wise.  On a shape mismatch nothing is modified.
    pub fn add_field(&mut self, other: &Field) -> FieldResult<()> {
        self.add_scaled(other, 1.0)
    }

    /// `self += other * factor`, cell-wise.  On a shape mismatch nothing is
    /// modified.
    pub fn add_scaled(&mut self, other: &Field, factor: f64) -> FieldResult<()> {
        self.check_shape(other)?;
        for (dst, &src) in self.cells.iter_mut().zip(&other.cells) {
            *dst += src * factor;
        }
        Ok(())
    }
}
