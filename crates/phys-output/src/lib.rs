//! `phys-output`: recording and presentation helpers for the `rust_physarum`
//! simulation.
//!
//! | Feature   | Module          | Output                                           |
//! |-----------|-----------------|--------------------------------------------------|
//! | *(none)*  | [`csv`]         | `step_summaries.csv`, `agent_snapshots.csv`      |
//! | *(none)*  | [`normalize`]   | `tanh(c · v)` display map, 8-bit grayscale       |
//! | `png`     | `image`         | Grayscale PNG of a normalized field              |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `phys_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use phys_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! engine.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod normalize;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "png")]
pub mod image;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use normalize::{Contrast, normalize_field, to_gray8};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "png")]
pub use image::write_png;
