//! Scoped rename of one binding.
//!
//! The walk visits every node of a subtree in preorder and applies three
//! rules:
//! - an identifier whose name equals the old name is rewritten, unless it is
//!   a label operand or the local name of a re-export;
//! - a declaration clause or destructuring assignment rewrites its outer
//!   binding identifiers that carry the old name;
//! - a node opening a nested scope is entered only while that scope still
//!   resolves the old name to the binding being renamed.
//!
//! Rewrites compare against the old name, so a node reached by two rules is
//! rewritten once.

use crate::block_hoist::apply_block_hoist;
use crate::error::RenameError;
use crate::export_preservation::ExportConversion;
use crate::options::RenameOptions;
use crate::uid::UidGenerator;
use jsmangle_binder::{BindingId, ScopeId, ScopeTree};
use jsmangle_parser::{NodeArena, NodeData, NodeIndex};
use tracing::{debug, trace};

/// Rename of one binding from `old_name` to `new_name`.
///
/// `new_name` must not collide with any binding visible in the affected
/// region; that is not checked.
#[derive(Clone, Debug)]
pub struct Renamer {
    pub binding: BindingId,
    pub old_name: String,
    pub new_name: String,
    pub(crate) options: RenameOptions,
}

/// What a rename changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Identifier nodes rewritten by the walk.
    pub rewritten: usize,
    /// Export wrapper conversion performed before the walk.
    pub export: Option<ExportConversion>,
}

impl Renamer {
    pub fn new(binding: BindingId, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Renamer {
            binding,
            old_name: old_name.into(),
            new_name: new_name.into(),
            options: RenameOptions::default(),
        }
    }

    pub fn with_options(mut self, options: &RenameOptions) -> Self {
        self.options = options.clone();
        self
    }

    /// Preserve the export surface, rename every occurrence visible from the
    /// binding's scope, and update the scope bookkeeping.
    ///
    /// With `scope_root`, the walk is confined to that subtree and the
    /// bookkeeping is left alone.
    pub fn rename(
        &self,
        arena: &mut NodeArena,
        scopes: &mut ScopeTree,
        uids: &mut UidGenerator,
        scope_root: Option<NodeIndex>,
    ) -> Result<RenameOutcome, RenameError> {
        let binding = scopes
            .binding(self.binding)
            .ok_or(RenameError::UnknownBinding(self.binding))?
            .clone();
        debug!(
            binding = self.binding.0,
            old = %self.old_name,
            new = %self.new_name,
            kind = binding.kind.as_str(),
            "renaming binding"
        );

        let parent_declaration = self.parent_declaration(arena, scopes)?;
        let export = if self.options.preserve_exports
            && let Some(declaration) = parent_declaration
        {
            self.convert_export_declaration(arena, scopes, uids, declaration)?
        } else {
            None
        };

        // An unnamed default export is renamed under the name it was just given.
        let old_name = export
            .as_ref()
            .map_or_else(|| self.old_name.clone(), |conversion| conversion.old_name.clone());

        let rewritten = match scope_root {
            Some(root) => self.rename_occurrences_from(arena, scopes, &old_name, root, false)?,
            None => {
                let block = scopes
                    .scope(binding.scope)
                    .ok_or(RenameError::MissingScope(binding.scope))?
                    .block;
                self.rename_occurrences_from(arena, scopes, &old_name, block, true)?
            }
        };

        if scope_root.is_none() {
            self.update_bookkeeping(arena, scopes, binding.scope, &old_name)?;
        }

        if let Some(declaration) = parent_declaration {
            self.retain_declaration_name(arena, declaration);
            self.retain_expression_name(arena, declaration);
        }

        Ok(RenameOutcome { rewritten, export })
    }

    /// Rename occurrences only, without export preservation or bookkeeping.
    /// Without `scope_root`, the walk covers the binding's scope.
    pub fn rename_occurrences(
        &self,
        arena: &mut NodeArena,
        scopes: &ScopeTree,
        scope_root: Option<NodeIndex>,
    ) -> Result<usize, RenameError> {
        match scope_root {
            Some(root) => self.rename_occurrences_from(arena, scopes, &self.old_name, root, false),
            None => {
                let scope = scopes
                    .binding(self.binding)
                    .ok_or(RenameError::UnknownBinding(self.binding))?
                    .scope;
                let block = scopes
                    .scope(scope)
                    .ok_or(RenameError::MissingScope(scope))?
                    .block;
                self.rename_occurrences_from(arena, scopes, &self.old_name, block, true)
            }
        }
    }

    /// Preorder walk below `root`. `root` itself is not visited; when it is
    /// the binding's own scope node, a function declaration's name is skipped
    /// because it belongs to the enclosing scope.
    fn rename_occurrences_from(
        &self,
        arena: &mut NodeArena,
        scopes: &ScopeTree,
        old_name: &str,
        root: NodeIndex,
        is_binding_scope: bool,
    ) -> Result<usize, RenameError> {
        if arena.get(root).is_none() {
            return Err(RenameError::DetachedNode(root));
        }
        let skipped_id = if is_binding_scope && arena.is_function_declaration(root) {
            arena.declaration_id(root)
        } else {
            NodeIndex::NONE
        };

        let mut rewritten = 0;
        let mut stack: Vec<NodeIndex> = arena
            .children(root)
            .into_iter()
            .rev()
            .filter(|&child| child != skipped_id)
            .collect();
        while let Some(node) = stack.pop() {
            if self.visit(arena, scopes, old_name, node, &mut rewritten) {
                stack.extend(arena.children(node).into_iter().rev());
            }
        }
        trace!(rewritten, old = old_name, "rename walk finished");
        Ok(rewritten)
    }

    /// Apply the node rules to `node`. Returns whether to descend into it.
    fn visit(
        &self,
        arena: &mut NodeArena,
        scopes: &ScopeTree,
        old_name: &str,
        node: NodeIndex,
        rewritten: &mut usize,
    ) -> bool {
        if let Some(NodeData::Identifier { name }) = arena.data(node) {
            if name == old_name && !arena.is_label_operand(node) && !arena.is_reexported_name(node)
            {
                arena.set_identifier_name(node, self.new_name.as_str());
                *rewritten += 1;
                trace!(node = node.0, new = %self.new_name, "rewrote identifier");
            }
            return false;
        }

        if arena.is_declaration(node) || arena.is_destructuring_assignment(node) {
            for (name, identifier) in arena.outer_binding_identifiers(node) {
                if name == old_name {
                    arena.set_identifier_name(identifier, self.new_name.as_str());
                    *rewritten += 1;
                    trace!(node = identifier.0, new = %self.new_name, "rewrote declared name");
                }
            }
        }

        if let Some(scope) = scopes.scope_of_node(node)
            && !scopes.binding_identifier_equals(scope, old_name, self.binding)
        {
            trace!(
                scope = scope.0,
                kind = arena.data(node).map_or("", NodeData::kind_name),
                name = old_name,
                "skipping scope that does not resolve to binding"
            );
            return false;
        }
        true
    }

    /// Move the binding from `old_name` to the new name in its owning scope
    /// and rename its canonical identifier.
    fn update_bookkeeping(
        &self,
        arena: &mut NodeArena,
        scopes: &mut ScopeTree,
        scope: ScopeId,
        old_name: &str,
    ) -> Result<(), RenameError> {
        if scopes.scope(scope).is_none() {
            return Err(RenameError::MissingScope(scope));
        }
        if scopes.own_binding(scope, old_name) == Some(self.binding) {
            scopes.remove_own_binding(scope, old_name);
        }
        scopes.set_own_binding(scope, self.new_name.as_str(), self.binding);
        let identifier = scopes
            .binding(self.binding)
            .ok_or(RenameError::UnknownBinding(self.binding))?
            .identifier;
        if identifier.is_some() {
            arena.set_identifier_name(identifier, self.new_name.as_str());
        }
        Ok(())
    }

    /// Nearest declaration clause or function expression at or above the
    /// binding's declaration site.
    pub(crate) fn parent_declaration(
        &self,
        arena: &NodeArena,
        scopes: &ScopeTree,
    ) -> Result<Option<NodeIndex>, RenameError> {
        let binding = scopes
            .binding(self.binding)
            .ok_or(RenameError::UnknownBinding(self.binding))?;
        Ok(arena.find_self_or_ancestor(binding.declaration, |arena, index| {
            arena.is_declaration(index) || arena.is_function_expression(index)
        }))
    }

    /// Keeping the original `name` of a renamed hoisted function declaration
    /// (re-declaring it as `let newName = function oldName() {}`) is not
    /// performed.
    fn retain_declaration_name(&self, _arena: &mut NodeArena, _declaration: NodeIndex) {}

    /// Keeping the original `name` of a renamed function or class expression
    /// is not performed.
    fn retain_expression_name(&self, _arena: &mut NodeArena, _declaration: NodeIndex) {}
}

/// Rename `binding` to `new_name` under its current name, as recorded in the
/// scope tree, then reorder the enclosing statement list when
/// `hoist_export_specifiers` asks for it.
pub fn rename_binding(
    arena: &mut NodeArena,
    scopes: &mut ScopeTree,
    uids: &mut UidGenerator,
    binding: BindingId,
    new_name: &str,
    options: &RenameOptions,
) -> Result<RenameOutcome, RenameError> {
    let old_name = scopes
        .binding_name(binding)
        .ok_or(RenameError::UnknownBinding(binding))?
        .to_string();
    let renamer = Renamer::new(binding, old_name, new_name).with_options(options);
    let outcome = renamer.rename(arena, scopes, uids, None)?;
    if options.hoist_export_specifiers
        && let Some(conversion) = &outcome.export
    {
        let block = arena.parent(conversion.statement);
        if !apply_block_hoist(arena, block) {
            return Err(RenameError::DetachedNode(conversion.statement));
        }
    }
    Ok(outcome)
}
