//! Core agent storage: `AgentStore` (SoA position and heading arrays).
//!
//! Every `Vec` has exactly `count` elements and index `i` refers to the same
//! agent in all of them.  No operation in the workspace pushes to or removes
//! from these arrays after construction; `randomize` rewrites them in place.

use std::f64::consts::TAU;

use phys_core::{AgentId, GridDims, SimRng};

/// Structure-of-Arrays storage for all agent state.
///
/// ```ignore
/// let (x, y) = (store.x[agent.index()], store.y[agent.index()]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Row coordinate in `[0, height)`.
    pub x: Vec<f64>,

    /// Column coordinate in `[0, width)`.
    pub y: Vec<f64>,

    /// Heading in radians.  Unbounded; only ever used through `sin`/`cos`.
    pub heading: Vec<f64>,

    /// Position before the most recent move.  For agents that wrapped across
    /// an edge on that move, the wrapped axis holds the post-wrap coordinate
    /// instead, so a renderer drawing `last → current` never draws a streak
    /// across the whole field.
    pub last_x: Vec<f64>,

    /// See [`last_x`](Self::last_x).
    pub last_y: Vec<f64>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    ///
    /// Stores built through `AgentStoreBuilder` never exceed `MAX_AGENTS`.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        let end = u32::try_from(self.count).unwrap_or(u32::MAX);
        (0..end).map(AgentId)
    }

    /// Current position of one agent.
    #[inline]
    pub fn position(&self, agent: AgentId) -> (f64, f64) {
        (self.x[agent.index()], self.y[agent.index()])
    }

    /// Redraw positions uniformly over the plane and headings uniformly over
    /// `[0, 2π)`.  `last_*` is reset to the new positions.
    ///
    /// Draw order is all `x`, then all `y`, then all headings.
    pub fn randomize(&mut self, dims: GridDims, rng: &mut SimRng) {
        let (h, w) = (dims.height as f64, dims.width as f64);
        for x in &mut self.x {
            *x = rng.uniform(h);
        }
        for y in &mut self.y {
            *y = rng.uniform(w);
        }
        for heading in &mut self.heading {
            *heading = rng.uniform(TAU);
        }
        self.last_x.copy_from_slice(&self.x);
        self.last_y.copy_from_slice(&self.y);
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(x: Vec<f64>, y: Vec<f64>, heading: Vec<f64>) -> Self {
        let count = x.len();
        debug_assert_eq!(y.len(), count);
        debug_assert_eq!(heading.len(), count);
        Self {
            count,
            last_x: x.clone(),
            last_y: y.clone(),
            x,
            y,
            heading,
        }
    }
}
