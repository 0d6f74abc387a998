//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use phys_agent::AgentStoreBuilder;
//! use phys_core::{GridDims, SimRng};
//!
//! let dims = GridDims::new(48, 72).unwrap();
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new(1_000, dims).build(&mut rng).unwrap();
//!
//! assert_eq!(store.count, 1_000);
//! assert!(store.x.iter().all(|&x| (0.0..48.0).contains(&x)));
//! ```

use phys_core::{GridDims, SimRng, check_agent_count};

use crate::{AgentError, AgentResult, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Without explicit state every agent is placed uniformly at random over the
/// plane with a uniform heading.  Supplying state overrides the draw; supplied
/// positions are wrapped onto the torus so the range invariant holds from the
/// first step.
pub struct AgentStoreBuilder {
    count:   usize,
    dims:    GridDims,
    x:       Option<Vec<f64>>,
    y:       Option<Vec<f64>>,
    heading: Option<Vec<f64>>,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents on a `dims` field.
    pub fn new(count: usize, dims: GridDims) -> Self {
        Self {
            count,
            dims,
            x:       None,
            y:       None,
            heading: None,
        }
    }

    /// Supply initial positions (each must be length `count`).
    pub fn positions(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Supply initial headings in radians (must be length `count`).
    pub fn headings(mut self, heading: Vec<f64>) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Validate supplied arrays and construct the store.
    ///
    /// If any array is missing, a full random draw runs first and supplied
    /// arrays then overwrite their part of it.  When everything is supplied
    /// `rng` is not touched.
    pub fn build(self, rng: &mut SimRng) -> AgentResult<AgentStore> {
        let count = self.count;
        check_agent_count(count)?;
        let check = |v: &[f64], what: &'static str| {
            if v.len() == count {
                Ok(())
            } else {
                Err(AgentError::AgentCountMismatch { expected: count, got: v.len(), what })
            }
        };
        if let Some(x) = &self.x {
            check(x.as_slice(), "x positions")?;
        }
        if let Some(y) = &self.y {
            check(y.as_slice(), "y positions")?;
        }
        if let Some(h) = &self.heading {
            check(h.as_slice(), "headings")?;
        }

        let mut store = AgentStore::new(vec![0.0; count], vec![0.0; count], vec![0.0; count]);
        if self.x.is_none() || self.y.is_none() || self.heading.is_none() {
            store.randomize(self.dims, rng);
        }
        if let Some(x) = self.x {
            store.x = x.into_iter().map(|v| self.dims.wrap_x(v)).collect();
        }
        if let Some(y) = self.y {
            store.y = y.into_iter().map(|v| self.dims.wrap_y(v)).collect();
        }
        if let Some(h) = self.heading {
            store.heading = h;
        }
        store.last_x.copy_from_slice(&store.x);
        store.last_y.copy_from_slice(&store.y);
        Ok(store)
    }
}
