//! Step counter and run configuration.
//!
//! Time is a monotonically increasing `Step` counter.  One step is one full
//! pass of the sense → rotate → move → deposit → diffuse pipeline; there is no
//! wall-clock mapping.

use std::fmt;

use crate::ids::check_agent_count;
use crate::{GridDims, PhysError, PhysResult};

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// `true` if this step falls on an output boundary of `interval`.
    /// An interval of 0 never matches.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the driver and passed to
/// `phys_sim::EngineBuilder`.  Tunable behavior lives in
/// [`SimParams`](crate::SimParams), not here: these values are fixed for the
/// lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of agents.  Fixed until the engine is dropped.
    pub agent_count: usize,

    /// Field rows; agent `x` lives in `[0, height)`.
    pub height: usize,

    /// Field columns; agent `y` lives in `[0, width)`.
    pub width: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Steps executed by `Engine::run`.
    pub total_steps: u64,

    /// Emit agent snapshots every N steps.  0 disables snapshots.
    pub output_interval_steps: u64,
}

impl SimConfig {
    /// A config for `agent_count` agents on a `height × width` field with the
    /// remaining fields zeroed.
    pub fn new(agent_count: usize, height: usize, width: usize, seed: u64) -> Self {
        Self {
            agent_count,
            height,
            width,
            seed,
            total_steps: 0,
            output_interval_steps: 0,
        }
    }

    /// The step at which `Engine::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Validated grid dimensions.
    pub fn dims(&self) -> PhysResult<GridDims> {
        GridDims::new(self.height, self.width)
    }

    /// Check the construction-time invariants: agent count in
    /// `1..=MAX_AGENTS` and positive field dimensions.
    pub fn validate(&self) -> PhysResult<GridDims> {
        if self.agent_count == 0 {
            return Err(PhysError::InvalidAgentCount);
        }
        check_agent_count(self.agent_count)?;
        self.dims()
    }
}
