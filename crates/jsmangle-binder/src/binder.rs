//! Binder: walks the syntax tree once, opening a scope for every
//! scope-introducing node and declaring each binding in the scope it belongs
//! to.

use crate::scope::{Binding, BindingId, BindingKind, Scope, ScopeId, ScopeKind, ScopeTree};
use jsmangle_parser::{NodeArena, NodeData, NodeIndex, VarKind};
use tracing::{debug, trace};

/// Key under which an unnamed `export default function/class` declaration is
/// registered until it receives a name.
pub const DEFAULT_EXPORT_KEY: &str = "default";

pub struct Binder {
    tree: ScopeTree,
    current_scope: ScopeId,
}

impl Binder {
    /// Build the scope tree of the program rooted at `root`.
    pub fn bind(arena: &NodeArena, root: NodeIndex) -> ScopeTree {
        let mut binder = Binder {
            tree: ScopeTree::default(),
            current_scope: ScopeTree::ROOT,
        };
        binder.push_scope(ScopeKind::Program, root);
        for child in arena.children(root) {
            binder.bind_node(arena, child);
        }
        debug!(
            scopes = binder.tree.scope_count(),
            bindings = binder.tree.binding_count(),
            "bound program"
        );
        binder.tree
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    /// Allocate a scope opened by `block` and make it current.
    fn push_scope(&mut self, kind: ScopeKind, block: NodeIndex) -> ScopeId {
        let id = ScopeId(self.tree.scopes.len() as u32);
        let parent = if self.tree.scopes.is_empty() {
            None
        } else {
            Some(self.current_scope)
        };
        self.tree.scopes.push(Scope {
            kind,
            parent,
            block,
            bindings: Default::default(),
            children: Vec::new(),
        });
        if let Some(parent) = parent
            && let Some(parent_scope) = self.tree.scopes.get_mut(parent.0 as usize)
        {
            parent_scope.children.push(id);
        }
        self.tree.node_scopes.insert(block, id);
        self.current_scope = id;
        id
    }

    fn enter_scope(&mut self, kind: ScopeKind, block: NodeIndex) -> ScopeId {
        let saved = self.current_scope;
        self.push_scope(kind, block);
        saved
    }

    fn exit_scope(&mut self, saved: ScopeId) {
        self.current_scope = saved;
    }

    /// Nearest function or program scope, where `var` declarations land.
    fn var_scope(&self) -> ScopeId {
        let mut current = self.current_scope;
        loop {
            match self.tree.scope(current) {
                Some(scope) if matches!(scope.kind, ScopeKind::Function | ScopeKind::Program) => {
                    return current;
                }
                Some(Scope {
                    parent: Some(parent),
                    ..
                }) => current = *parent,
                _ => return ScopeTree::ROOT,
            }
        }
    }

    /// Declare `name` in `scope`. A redeclaration in the same scope keeps the
    /// first binding.
    fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: BindingKind,
        identifier: NodeIndex,
        declaration: NodeIndex,
    ) -> BindingId {
        if let Some(existing) = self.tree.own_binding(scope, name) {
            trace!(name, scope = scope.0, "redeclaration reuses binding");
            return existing;
        }
        let id = BindingId(self.tree.bindings.len() as u32);
        self.tree.bindings.push(Binding {
            kind,
            scope,
            identifier,
            declaration,
        });
        self.tree.set_own_binding(scope, name, id);
        trace!(name, scope = scope.0, kind = kind.as_str(), "declared binding");
        id
    }

    /// Declare every identifier of a binding pattern.
    fn declare_pattern(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        pattern: NodeIndex,
        kind: BindingKind,
        declaration: NodeIndex,
    ) {
        let mut identifiers = Vec::new();
        collect_pattern_identifiers(arena, pattern, &mut identifiers);
        for identifier in identifiers {
            if let Some(name) = arena.identifier_name(identifier) {
                let name = name.to_string();
                self.declare(scope, &name, kind, identifier, declaration);
            }
        }
    }

    // =========================================================================
    // Node walk
    // =========================================================================

    fn bind_children(&mut self, arena: &NodeArena, index: NodeIndex) {
        for child in arena.children(index) {
            self.bind_node(arena, child);
        }
    }

    fn bind_node(&mut self, arena: &NodeArena, index: NodeIndex) {
        let Some(data) = arena.data(index) else {
            return;
        };
        match data {
            NodeData::Identifier { name } => {
                self.tree.add_reference(name.as_str());
            }
            NodeData::VariableDeclaration { kind, declarations } => {
                let binding_kind = match kind {
                    VarKind::Var => BindingKind::Var,
                    VarKind::Let => BindingKind::Let,
                    VarKind::Const => BindingKind::Const,
                };
                let scope = if *kind == VarKind::Var {
                    self.var_scope()
                } else {
                    self.current_scope
                };
                for &declarator in declarations {
                    if let Some(NodeData::VariableDeclarator { id, .. }) = arena.data(declarator) {
                        self.declare_pattern(arena, scope, *id, binding_kind, declarator);
                    }
                }
                self.bind_children(arena, index);
            }
            NodeData::FunctionDeclaration(func) => {
                if func.id.is_some() {
                    self.declare_pattern(
                        arena,
                        self.current_scope,
                        func.id,
                        BindingKind::Hoisted,
                        index,
                    );
                } else if arena.is_export_default(arena.parent(index)) {
                    self.declare(
                        self.current_scope,
                        DEFAULT_EXPORT_KEY,
                        BindingKind::Hoisted,
                        NodeIndex::NONE,
                        index,
                    );
                }
                self.bind_function(arena, index, NodeIndex::NONE, &func.params, func.body);
            }
            NodeData::FunctionExpression(func) => {
                self.bind_function(arena, index, func.id, &func.params, func.body);
            }
            NodeData::ArrowFunctionExpression { params, body, .. } => {
                self.bind_function(arena, index, NodeIndex::NONE, params, *body);
            }
            NodeData::ClassDeclaration(class) => {
                if class.id.is_some() {
                    self.declare_pattern(
                        arena,
                        self.current_scope,
                        class.id,
                        BindingKind::Let,
                        index,
                    );
                } else if arena.is_export_default(arena.parent(index)) {
                    self.declare(
                        self.current_scope,
                        DEFAULT_EXPORT_KEY,
                        BindingKind::Let,
                        NodeIndex::NONE,
                        index,
                    );
                }
                let saved = self.enter_scope(ScopeKind::Class, index);
                self.bind_children(arena, index);
                self.exit_scope(saved);
            }
            NodeData::ClassExpression(class) => {
                let saved = self.enter_scope(ScopeKind::Class, index);
                if class.id.is_some() {
                    self.declare_pattern(
                        arena,
                        self.current_scope,
                        class.id,
                        BindingKind::Local,
                        index,
                    );
                }
                self.bind_children(arena, index);
                self.exit_scope(saved);
            }
            NodeData::BlockStatement { .. } => {
                let saved = self.enter_scope(ScopeKind::Block, index);
                self.bind_children(arena, index);
                self.exit_scope(saved);
            }
            NodeData::ForStatement { .. } | NodeData::ForInStatement { .. } => {
                let saved = self.enter_scope(ScopeKind::Block, index);
                self.bind_children(arena, index);
                self.exit_scope(saved);
            }
            NodeData::CatchClause { param, body } => {
                let saved = self.enter_scope(ScopeKind::Catch, index);
                if param.is_some() {
                    self.declare_pattern(
                        arena,
                        self.current_scope,
                        *param,
                        BindingKind::Let,
                        *param,
                    );
                    self.bind_node(arena, *param);
                }
                self.bind_block_contents(arena, *body);
                self.exit_scope(saved);
            }
            NodeData::ImportSpecifier { local, .. }
            | NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local } => {
                self.declare_pattern(arena, ScopeTree::ROOT, *local, BindingKind::Module, index);
                self.bind_children(arena, index);
            }
            _ => self.bind_children(arena, index),
        }
    }

    /// Open a function scope holding the expression name (if any), the
    /// parameters and the body's declarations.
    fn bind_function(
        &mut self,
        arena: &NodeArena,
        function: NodeIndex,
        expression_name: NodeIndex,
        params: &[NodeIndex],
        body: NodeIndex,
    ) {
        // The declaration's own name belongs to the enclosing scope.
        if let Some(NodeData::FunctionDeclaration(func)) = arena.data(function) {
            self.bind_node(arena, func.id);
        }
        let saved = self.enter_scope(ScopeKind::Function, function);
        if expression_name.is_some() {
            self.declare_pattern(
                arena,
                self.current_scope,
                expression_name,
                BindingKind::Local,
                function,
            );
            self.bind_node(arena, expression_name);
        }
        for &param in params {
            self.declare_pattern(arena, self.current_scope, param, BindingKind::Param, param);
            self.bind_node(arena, param);
        }
        if matches!(arena.data(body), Some(NodeData::BlockStatement { .. })) {
            self.bind_block_contents(arena, body);
        } else {
            self.bind_node(arena, body);
        }
        self.exit_scope(saved);
    }

    /// Bind the statements of a block that shares its owner's scope.
    fn bind_block_contents(&mut self, arena: &NodeArena, block: NodeIndex) {
        self.bind_children(arena, block);
    }
}

/// Identifiers a binding pattern declares, in source order. Default values
/// and computed keys are not part of the declared set.
fn collect_pattern_identifiers(arena: &NodeArena, pattern: NodeIndex, out: &mut Vec<NodeIndex>) {
    match arena.data(pattern) {
        Some(NodeData::Identifier { .. }) => out.push(pattern),
        Some(NodeData::ObjectPattern { properties }) => {
            for &property in properties {
                collect_pattern_identifiers(arena, property, out);
            }
        }
        Some(NodeData::ArrayPattern { elements }) => {
            for &element in elements {
                collect_pattern_identifiers(arena, element, out);
            }
        }
        Some(NodeData::Property { value, .. }) => collect_pattern_identifiers(arena, *value, out),
        Some(NodeData::AssignmentPattern { left, .. }) => {
            collect_pattern_identifiers(arena, *left, out);
        }
        Some(NodeData::RestElement { argument }) => {
            collect_pattern_identifiers(arena, *argument, out);
        }
        _ => {}
    }
}
