//! Plain data row types written by output backends.

/// One agent's position and heading at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub step:    u64,
    pub agent:   u32,
    pub x:       f64,
    pub y:       f64,
    /// Radians, unwrapped.
    pub heading: f64,
}

/// Field statistics after one completed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:        u64,
    pub agent_count: u64,
    /// Sum over all trail cells.
    pub trail_mass:  f64,
    pub trail_max:   f64,
    pub history_max: f64,
}
