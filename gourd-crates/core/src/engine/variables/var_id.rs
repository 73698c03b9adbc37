use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// A handle to a variable owned by a [`crate::Solver`].
///
/// Handles are stable for the lifetime of the solver; they are assigned in creation order,
/// starting at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId {
    id: u32,
}

impl VarId {
    pub(crate) const fn new(id: u32) -> Self {
        VarId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl StorageKey for VarId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VarId { id: index as u32 }
    }
}

impl Display for VarId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
