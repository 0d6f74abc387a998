//! `phys-field`: the shared scalar field agents sense from and deposit into.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`field`]     | `Field`, a row-major `height × width` grid of `f64`         |
//! | [`blur`]      | `GaussianKernel`, `AxisTaps`, `PeriodicBlur` (wrap-around)  |
//! | [`deposit`]   | Half-integer-edge binning of points into cells              |
//! | [`error`]     | `FieldError`, `FieldResult<T>`                              |
//!
//! Every operation treats the grid as a torus: sampling, binning and blurring
//! all wrap indices modulo the field dimensions.

pub mod blur;
pub mod deposit;
pub mod error;
pub mod field;


pub use blur::{AxisTaps, GaussianKernel, PeriodicBlur, gaussian_blur_periodic};
pub use deposit::bin_points_into;
pub use error::{FieldError, FieldResult};
pub use field::Field;
