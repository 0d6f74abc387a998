//! Typed agent index.
//!
//! The inner integer is `pub` so SoA `Vec`s can be indexed directly, but
//! callers should prefer [`AgentId::index`] for clarity.

use std::fmt;

use crate::{PhysError, PhysResult};

/// Largest agent count an `AgentId` can address.
pub const MAX_AGENTS: usize = u32::MAX as usize;

/// Index of an agent in SoA storage.  Max ~4.3 billion agents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

/// Reject agent counts an `AgentId` cannot address.
pub fn check_agent_count(count: usize) -> PhysResult<()> {
    if count > MAX_AGENTS {
        return Err(PhysError::TooManyAgents { count, max: MAX_AGENTS });
    }
    Ok(())
}
