//! Structural tree mutation primitives.

use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeData};

impl NodeArena {
    /// Put `replacement` into the slot `old` occupies in its parent.
    ///
    /// `old` is left detached. Its own slots are not cleared, so a node moved
    /// out of `old` (e.g. the declaration of an export wrapper) may still be
    /// referenced from the detached node.
    pub fn replace_node(&mut self, old: NodeIndex, replacement: NodeIndex) -> bool {
        let parent = self.parent(old);
        if self.get(replacement).is_none() {
            return false;
        }
        let Some(parent_node) = self.get_mut(parent) else {
            return false;
        };
        if !parent_node.data.replace_child(old, replacement) {
            return false;
        }
        if let Some(node) = self.get_mut(replacement) {
            node.parent = parent;
        }
        if let Some(node) = self.get_mut(old) {
            node.parent = NodeIndex::NONE;
        }
        true
    }

    /// Insert `statement` right after `anchor` in the statement list holding it.
    pub fn insert_after(&mut self, anchor: NodeIndex, statement: NodeIndex) -> bool {
        let parent = self.parent(anchor);
        if self.get(statement).is_none() {
            return false;
        }
        let Some(list) = self
            .get_mut(parent)
            .and_then(|node| node.data.statement_list_mut())
        else {
            return false;
        };
        let Some(position) = list.iter().position(|&idx| idx == anchor) else {
            return false;
        };
        list.insert(position + 1, statement);
        if let Some(node) = self.get_mut(statement) {
            node.parent = parent;
        }
        true
    }

    /// Give an anonymous function or class declaration a name.
    pub fn set_declaration_id(&mut self, declaration: NodeIndex, id: NodeIndex) -> bool {
        let Some(node) = self.get_mut(declaration) else {
            return false;
        };
        match &mut node.data {
            NodeData::FunctionDeclaration(func) => func.id = id,
            NodeData::ClassDeclaration(class) => class.id = id,
            _ => return false,
        }
        if let Some(id_node) = self.get_mut(id) {
            id_node.parent = declaration;
        }
        true
    }

    /// Statements of a program or block.
    pub fn statement_list(&self, block: NodeIndex) -> Option<&[NodeIndex]> {
        self.data(block)
            .and_then(NodeData::statement_list)
            .map(Vec::as_slice)
    }

    /// Replace the statements of a program or block.
    pub fn set_statement_list(&mut self, block: NodeIndex, statements: Vec<NodeIndex>) -> bool {
        let Some(list) = self
            .get_mut(block)
            .and_then(|node| node.data.statement_list_mut())
        else {
            return false;
        };
        *list = statements;
        self.adopt_children(block);
        true
    }

    pub fn set_block_hoist(&mut self, statement: NodeIndex, priority: u8) -> bool {
        match self.get_mut(statement) {
            Some(node) => {
                node.block_hoist = Some(priority);
                true
            }
            None => false,
        }
    }
}
