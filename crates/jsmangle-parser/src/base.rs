//! Base handle types shared by the arena and every consumer of the tree.

use std::fmt;

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for "no node" (absent optional child, detached parent).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// Convert to `Option`, mapping the sentinel to `None`.
    #[inline]
    pub const fn to_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("NodeIndex(NONE)")
        } else {
            write!(f, "NodeIndex({})", self.0)
        }
    }
}
