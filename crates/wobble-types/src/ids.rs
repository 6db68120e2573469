//! Strongly-typed particle identifiers.
//!
//! A particle's identity is its index inside its body. The index order
//! is fixed when the body is created and never changes afterwards.

use serde::{Deserialize, Serialize};

/// Index into a body's particle arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

impl ParticleId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ParticleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<usize> for ParticleId {
    fn from(val: usize) -> Self {
        Self(val as u32)
    }
}

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
