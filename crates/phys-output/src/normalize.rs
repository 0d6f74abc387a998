//! Saturating display map for fields.
//!
//! Deposits are unbounded, so fields are pushed through `tanh(c · v)` before
//! display.  Small values stay roughly linear and dense trails saturate
//! smoothly toward 1.  The contrast `c` is an explicit value owned by the
//! presentation layer.

use phys_core::ParamBounds;
use phys_field::Field;

/// Display contrast.  Larger values saturate faint trails sooner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contrast(pub f64);

impl Default for Contrast {
    fn default() -> Self {
        Contrast(2.0)
    }
}

impl Contrast {
    /// Contrast held inside the control-panel range.
    pub fn clamped(value: f64) -> Self {
        Contrast(ParamBounds::SLIDER.contrast.clamp(value))
    }

    #[inline]
    pub fn apply(self, v: f64) -> f64 {
        (self.0 * v).tanh()
    }
}

/// `tanh(contrast · v)` for every cell, row-major.
pub fn normalize_field(field: &Field, contrast: Contrast) -> Vec<f64> {
    field.as_slice().iter().map(|&v| contrast.apply(v)).collect()
}

/// Normalized field as 8-bit grayscale, row-major.  Negative values map to 0.
pub fn to_gray8(field: &Field, contrast: Contrast) -> Vec<u8> {
    field
        .as_slice()
        .iter()
        .map(|&v| (contrast.apply(v).clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}
