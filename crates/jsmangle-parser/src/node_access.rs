//! NodeArena access methods and node classification.
//!
//! This module contains node lookup, parent/ancestor navigation, and the
//! syntactic classification queries the binder and renamer rely on:
//! label operands, declarations, export wrappers, and outer binding
//! identifiers.

use crate::base::NodeIndex;
use crate::node::{ChildList, Node, NodeArena, NodeData, PropertyKey};
use indexmap::IndexMap;

/// Declared name -> identifier node introducing it, in source order.
pub type BindingIdentifiers = IndexMap<String, NodeIndex>;

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    /// Parent of a node, `NONE` for roots, detached nodes and invalid indices.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Direct children in source order.
    pub fn children(&self, index: NodeIndex) -> ChildList {
        self.get(index)
            .map(|node| node.data.children())
            .unwrap_or_default()
    }

    /// Iterate over the ancestors of a node, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent(index)).filter(|p| p.is_some()), |&idx| {
            Some(self.parent(idx)).filter(|p| p.is_some())
        })
    }

    /// Find the node itself or its nearest ancestor matching `predicate`.
    pub fn find_self_or_ancestor(
        &self,
        index: NodeIndex,
        predicate: impl Fn(&NodeArena, NodeIndex) -> bool,
    ) -> Option<NodeIndex> {
        if index.is_none() {
            return None;
        }
        std::iter::once(index)
            .chain(self.ancestors(index))
            .find(|&idx| predicate(self, idx))
    }

    /// Whether `ancestor` is `index` or one of its ancestors.
    pub fn is_self_or_descendant_of(&self, index: NodeIndex, ancestor: NodeIndex) -> bool {
        index == ancestor || self.ancestors(index).any(|idx| idx == ancestor)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    #[inline]
    pub fn identifier_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Rename an identifier node. Returns `false` if `index` is not an identifier.
    pub fn set_identifier_name(&mut self, index: NodeIndex, new_name: impl Into<String>) -> bool {
        match self.get_mut(index).map(|node| &mut node.data) {
            Some(NodeData::Identifier { name }) => {
                *name = new_name.into();
                true
            }
            _ => false,
        }
    }

    /// Whether an identifier is the label operand of a labeled statement,
    /// `break`, or `continue`. Labels never denote variables.
    pub fn is_label_operand(&self, index: NodeIndex) -> bool {
        match self.data(self.parent(index)) {
            Some(
                NodeData::LabeledStatement { label, .. }
                | NodeData::BreakStatement { label }
                | NodeData::ContinueStatement { label },
            ) => *label == index,
            _ => false,
        }
    }

    /// Whether an identifier is the local name of a re-export
    /// (`export { a } from "m"`), which names a binding of another module.
    pub fn is_reexported_name(&self, index: NodeIndex) -> bool {
        let specifier = self.parent(index);
        if !matches!(self.data(specifier), Some(NodeData::ExportSpecifier { .. })) {
            return false;
        }
        matches!(
            self.data(self.parent(specifier)),
            Some(NodeData::ExportNamedDeclaration {
                source: Some(_),
                ..
            })
        )
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Whether a node is a declaration statement: variable, function, class,
    /// import, or export declaration.
    pub fn is_declaration(&self, index: NodeIndex) -> bool {
        matches!(
            self.data(index),
            Some(
                NodeData::VariableDeclaration { .. }
                    | NodeData::FunctionDeclaration(_)
                    | NodeData::ClassDeclaration(_)
                    | NodeData::ImportDeclaration { .. }
                    | NodeData::ExportNamedDeclaration { .. }
                    | NodeData::ExportDefaultDeclaration { .. }
            )
        )
    }

    /// Whether a node is an assignment whose target is a destructuring pattern.
    pub fn is_destructuring_assignment(&self, index: NodeIndex) -> bool {
        match self.data(index) {
            Some(NodeData::AssignmentExpression { left, .. }) => matches!(
                self.data(*left),
                Some(NodeData::ObjectPattern { .. } | NodeData::ArrayPattern { .. })
            ),
            _ => false,
        }
    }

    #[inline]
    pub fn is_function_expression(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::FunctionExpression(_)))
    }

    #[inline]
    pub fn is_function_declaration(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::FunctionDeclaration(_)))
    }

    /// Whether a node marks its declaration as a module export.
    pub fn is_export_wrapper(&self, index: NodeIndex) -> bool {
        match self.data(index) {
            Some(NodeData::ExportNamedDeclaration { declaration, .. }) => declaration.is_some(),
            Some(NodeData::ExportDefaultDeclaration { .. }) => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_export_default(&self, index: NodeIndex) -> bool {
        matches!(
            self.data(index),
            Some(NodeData::ExportDefaultDeclaration { .. })
        )
    }

    /// Name slot of a function or class declaration (`NONE` when anonymous).
    pub fn declaration_id(&self, index: NodeIndex) -> NodeIndex {
        match self.data(index) {
            Some(NodeData::FunctionDeclaration(func)) => func.id,
            Some(NodeData::ClassDeclaration(class)) => class.id,
            _ => NodeIndex::NONE,
        }
    }

    /// Names a declaration introduces into its enclosing scope, mapped to the
    /// identifier nodes introducing them.
    ///
    /// Names bound only inside nested initializers, default values, function
    /// parameters or function bodies are excluded. Function and class
    /// expressions introduce nothing outward.
    pub fn outer_binding_identifiers(&self, index: NodeIndex) -> BindingIdentifiers {
        let mut out = BindingIdentifiers::new();
        self.collect_outer_binding_identifiers(index, &mut out);
        out
    }

    fn collect_outer_binding_identifiers(&self, index: NodeIndex, out: &mut BindingIdentifiers) {
        let Some(data) = self.data(index) else {
            return;
        };
        match data {
            NodeData::VariableDeclaration { declarations, .. } => {
                for &declarator in declarations {
                    self.collect_outer_binding_identifiers(declarator, out);
                }
            }
            NodeData::VariableDeclarator { id, .. } => self.collect_pattern_identifiers(*id, out),
            NodeData::FunctionDeclaration(func) => self.collect_pattern_identifiers(func.id, out),
            NodeData::ClassDeclaration(class) => self.collect_pattern_identifiers(class.id, out),
            NodeData::ImportDeclaration { specifiers, .. } => {
                for &specifier in specifiers {
                    self.collect_outer_binding_identifiers(specifier, out);
                }
            }
            NodeData::ImportSpecifier { local, .. }
            | NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local } => {
                self.collect_pattern_identifiers(*local, out);
            }
            NodeData::ExportNamedDeclaration { declaration, .. }
            | NodeData::ExportDefaultDeclaration { declaration } => {
                if self.is_declaration(*declaration) {
                    self.collect_outer_binding_identifiers(*declaration, out);
                }
            }
            NodeData::AssignmentExpression { left, .. } => {
                self.collect_pattern_identifiers(*left, out);
            }
            _ => {}
        }
    }

    fn collect_pattern_identifiers(&self, index: NodeIndex, out: &mut BindingIdentifiers) {
        let Some(data) = self.data(index) else {
            return;
        };
        match data {
            NodeData::Identifier { name } => {
                out.insert(name.clone(), index);
            }
            NodeData::ObjectPattern { properties } => {
                for &property in properties {
                    self.collect_pattern_identifiers(property, out);
                }
            }
            NodeData::Property { value, .. } => self.collect_pattern_identifiers(*value, out),
            NodeData::ArrayPattern { elements } => {
                for &element in elements {
                    self.collect_pattern_identifiers(element, out);
                }
            }
            NodeData::AssignmentPattern { left, .. } => {
                self.collect_pattern_identifiers(*left, out);
            }
            NodeData::RestElement { argument } => self.collect_pattern_identifiers(*argument, out),
            _ => {}
        }
    }

    /// Text of a non-computed property key.
    pub fn property_key_name(key: &PropertyKey) -> Option<&str> {
        match key {
            PropertyKey::Identifier(name) => Some(name),
            _ => None,
        }
    }
}
