//! `phys-sim`: step pipeline orchestrator for the `rust_physarum` simulation.
//!
//! # Step pipeline
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Sense:    sensors at heading, heading ± sensing_angle, sensing_dist
//!               ahead; sample trail_map at the nearest (wrapped) cell.
//!   ② Rotate:   Turn::decide on [forward, left, right]; ties share one
//!               random sign drawn per step.
//!   ③ Move:     step speed along the new heading, wrap onto the torus.
//!   ④ Deposit:  bin positions (half-integer edges), add counts to
//!               trail_map and history.
//!   ⑤ Diffuse:  periodic Gaussian blur of trail_map, decay both fields,
//!               clamp trail_map into [0, 1].
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs the sensing and movement kernels on Rayon's pool.     |
//!
//! Per-agent kernels never draw randomness, so both builds produce identical
//! results.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use phys_core::{SimConfig, SimParams};
//! use phys_sim::{EngineBuilder, NoopObserver};
//!
//! let mut config = SimConfig::new(500, 480, 720, 42);
//! config.total_steps = 1_000;
//! let mut engine = EngineBuilder::new(config)
//!     .params(SimParams::long_range())
//!     .build()?;
//! engine.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod rule;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{DEPOSIT_PER_STEP, Engine};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use rule::Turn;
