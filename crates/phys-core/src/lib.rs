//! `phys-core`: foundational types for the `rust_physarum` simulation.
//!
//! This crate is a dependency of every other `phys-*` crate.  It intentionally
//! has no `phys-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`grid`]        | `GridDims`, periodic wrap and nearest-cell helpers    |
//! | [`time`]        | `Step`, `SimConfig`                                   |
//! | [`params`]      | `SimParams`, `ParamBounds`, `ParamRange`              |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `PhysError`, `PhysResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and param types.  |

pub mod error;
pub mod grid;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PhysError, PhysResult};
pub use grid::GridDims;
pub use ids::{AgentId, MAX_AGENTS, check_agent_count};
pub use params::{ParamBounds, ParamRange, SimParams};
pub use rng::SimRng;
pub use time::{SimConfig, Step};
