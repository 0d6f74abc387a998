//! Separable Gaussian blur with periodic (wrap-around) boundaries.
//!
//! The 2D blur is two 1D correlations: first along the row axis, then along
//! the column axis.  Each 1D pass reads from one buffer and writes to the
//! other, so one scratch buffer the size of the field is enough and no pass
//! ever reads a value it has already written.
//!
//! Kernel weights are normalized to sum to 1 and indices wrap modulo the
//! dimension, so total mass is conserved (up to float rounding) for any sigma.
//! On a periodic axis of length `len` the kernel is folded: taps whose
//! offsets agree modulo `len` are merged, so one pass never costs more than
//! `len` taps per cell however large the radius.  Once sigma reaches
//! `MEAN_SPANS * len` the folded kernel is flat to within float precision and
//! the pass collapses to the line mean.

use phys_core::GridDims;

use crate::Field;

/// Kernel half-width in units of sigma.
pub const TRUNCATE: f64 = 4.0;

/// Sigmas at or below this are treated as "no blur".
pub const MIN_SIGMA: f64 = 1e-15;

/// Axis lengths per sigma beyond which a pass is replaced by the line mean.
pub const MEAN_SPANS: f64 = 2.0;

/// Truncated 1D Gaussian of a given sigma, before it is laid onto an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    sigma:  f64,
    radius: usize,
}

impl GaussianKernel {
    /// Kernel for `sigma`, truncated at `TRUNCATE * sigma` (rounded to the
    /// nearest integer radius, saturating).  Returns the identity kernel for
    /// `sigma <= MIN_SIGMA` or non-finite sigma.
    pub fn new(sigma: f64) -> Self {
        if !sigma.is_finite() || sigma <= MIN_SIGMA {
            return Self::identity();
        }
        Self { sigma, radius: (TRUNCATE * sigma + 0.5) as usize }
    }

    pub fn identity() -> Self {
        Self { sigma: 0.0, radius: 0 }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Lay the kernel onto a periodic axis of length `len`.
    pub fn fold(&self, len: usize) -> AxisTaps {
        if self.is_identity() || len <= 1 {
            return AxisTaps::Identity;
        }
        if self.sigma >= MEAN_SPANS * len as f64 {
            return AxisTaps::Mean;
        }

        // Bounded by the mean cutoff: radius < TRUNCATE * MEAN_SPANS * len + 1.
        let r = self.radius as isize;
        let n = len as isize;
        let inv_two_var = 0.5 / (self.sigma * self.sigma);
        let weight = |d: isize| (-inv_two_var * (d * d) as f64).exp();

        let (shifts, mut weights): (Vec<usize>, Vec<f64>) = if 2 * r < n {
            (-r..=r).map(|d| (d.rem_euclid(n) as usize, weight(d))).unzip()
        } else {
            let mut folded = vec![0.0; len];
            for d in -r..=r {
                folded[d.rem_euclid(n) as usize] += weight(d);
            }
            ((0..len).collect(), folded)
        };
        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }
        AxisTaps::Taps { shifts, weights }
    }
}

/// A kernel laid onto one periodic axis.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisTaps {
    /// The pass leaves the field unchanged.
    Identity,
    /// Every cell of a line becomes the line mean.
    Mean,
    /// Output `i` is `sum(weights[t] * input[(i + shifts[t]) % len])`.
    Taps { shifts: Vec<usize>, weights: Vec<f64> },
}

/// Reusable periodic blur.  Caches the folded taps for the last sigma and
/// field shape, and owns the scratch buffer so per-step blurring does not
/// allocate.
#[derive(Clone, Debug)]
pub struct PeriodicBlur {
    sigma:   f64,
    dims:    Option<GridDims>,
    rows:    AxisTaps,
    cols:    AxisTaps,
    scratch: Vec<f64>,
}

impl Default for PeriodicBlur {
    fn default() -> Self {
        Self {
            sigma:   0.0,
            dims:    None,
            rows:    AxisTaps::Identity,
            cols:    AxisTaps::Identity,
            scratch: Vec::new(),
        }
    }
}

impl PeriodicBlur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blur `field` in place with standard deviation `sigma` (in cells).
    pub fn apply(&mut self, field: &mut Field, sigma: f64) {
        let dims = field.dims();
        if sigma.to_bits() != self.sigma.to_bits() || self.dims != Some(dims) {
            let kernel = GaussianKernel::new(sigma);
            self.sigma = sigma;
            self.dims = Some(dims);
            self.rows = kernel.fold(dims.height);
            self.cols = kernel.fold(dims.width);
        }
        if self.rows == AxisTaps::Identity && self.cols == AxisTaps::Identity {
            return;
        }

        self.scratch.resize(dims.cells(), 0.0);
        correlate_rows(field.as_slice(), &mut self.scratch, dims, &self.rows);
        correlate_cols(&self.scratch, field.as_mut_slice(), dims, &self.cols);
    }
}

/// One-shot convenience wrapper around [`PeriodicBlur`].
pub fn gaussian_blur_periodic(field: &mut Field, sigma: f64) {
    PeriodicBlur::new().apply(field, sigma);
}

/// Correlate along the row axis: each output row is a weighted sum of whole
/// (wrapped) neighbor rows.
fn correlate_rows(src: &[f64], dst: &mut [f64], dims: GridDims, taps: &AxisTaps) {
    let (h, w) = (dims.height, dims.width);
    match taps {
        AxisTaps::Identity => dst.copy_from_slice(src),
        AxisTaps::Mean => {
            let mut mean = vec![0.0; w];
            for line in src.chunks_exact(w) {
                for (m, &v) in mean.iter_mut().zip(line) {
                    *m += v;
                }
            }
            for m in &mut mean {
                *m /= h as f64;
            }
            for out in dst.chunks_exact_mut(w) {
                out.copy_from_slice(&mean);
            }
        }
        AxisTaps::Taps { shifts, weights } => {
            dst.fill(0.0);
            for row in 0..h {
                let out = &mut dst[row * w..(row + 1) * w];
                for (&shift, &weight) in shifts.iter().zip(weights) {
                    let src_row = (row + shift) % h;
                    let input = &src[src_row * w..(src_row + 1) * w];
                    for (o, &i) in out.iter_mut().zip(input) {
                        *o += weight * i;
                    }
                }
            }
        }
    }
}

/// Correlate along the column axis within each row.
fn correlate_cols(src: &[f64], dst: &mut [f64], dims: GridDims, taps: &AxisTaps) {
    let w = dims.width;
    for (input, out) in src.chunks_exact(w).zip(dst.chunks_exact_mut(w)) {
        match taps {
            AxisTaps::Identity => out.copy_from_slice(input),
            AxisTaps::Mean => out.fill(input.iter().sum::<f64>() / w as f64),
            AxisTaps::Taps { shifts, weights } => {
                for (col, o) in out.iter_mut().enumerate() {
                    *o = shifts
                        .iter()
                        .zip(weights)
                        .map(|(&shift, &weight)| weight * input[(col + shift) % w])
                        .sum();
                }
            }
        }
    }
}
