use std::fmt;

use serde::{Deserialize, Serialize};

/// A handle to a body in the world.
///
/// Handles pair a slot index with the slot's generation. Once a body is
/// removed (or the world is cleared) the slot generation moves on and the
/// old handle stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Creates a new body handle
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the slot generation this handle was issued for
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Returns true if this handle is not the null handle.
    /// A valid handle may still be stale; the world checks generations.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
