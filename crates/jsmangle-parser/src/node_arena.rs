//! NodeArena creation methods.
//!
//! Nodes are allocated bottom-up: children exist before their parent, and
//! `alloc` links every child of the new node back to it.

use crate::base::NodeIndex;
use crate::node::{Node, NodeArena, NodeData};

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes ever allocated (detached nodes included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a node and adopt its children.
    pub fn alloc(&mut self, data: NodeData) -> NodeIndex {
        let index = NodeIndex(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        for child in data.children() {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        self.nodes.push(Node {
            data,
            parent: NodeIndex::NONE,
            block_hoist: None,
        });
        index
    }

    /// Allocate an identifier node.
    pub fn alloc_identifier(&mut self, name: impl Into<String>) -> NodeIndex {
        self.alloc(NodeData::Identifier { name: name.into() })
    }

    /// Re-link the children of `index` after its data was rewritten in place.
    pub(crate) fn adopt_children(&mut self, index: NodeIndex) {
        let Some(node) = self.get(index) else {
            return;
        };
        for child in node.data.children() {
            if let Some(child_node) = self.get_mut(child) {
                child_node.parent = index;
            }
        }
    }
}
