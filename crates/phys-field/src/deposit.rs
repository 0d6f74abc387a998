//! Nearest-cell binning of agent positions.
//!
//! Bin edges sit at half-integers, so a coordinate `v` lands in cell
//! `round(v)` with exact halves rounding up.  Bins are reduced modulo the
//! field dimension: a point at `x = height - 0.3` counts toward row 0, its
//! periodic neighbor, rather than being dropped.

use phys_core::grid::bin_index;

use crate::Field;

/// Overwrite `counts` with the number of points falling in each cell.
///
/// `xs` and `ys` are index-aligned; extra elements of the longer slice are
/// ignored.
pub fn bin_points_into(counts: &mut Field, xs: &[f64], ys: &[f64]) {
    counts.clear();
    let dims = counts.dims();
    let cells = counts.as_mut_slice();
    for (&x, &y) in xs.iter().zip(ys) {
        let row = bin_index(x, dims.height);
        let col = bin_index(y, dims.width);
        cells[dims.index_of(row, col)] += 1.0;
    }
}

