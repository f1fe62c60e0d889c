//! Export preservation: before an exported binding is renamed, its export
//! wrapper is split into the bare declaration plus an `export { local as
//! exported }` statement, so importers keep seeing the original name.

use crate::error::RenameError;
use crate::renamer::Renamer;
use crate::uid::UidGenerator;
use jsmangle_binder::{BindingId, DEFAULT_EXPORT_KEY, ScopeTree};
use jsmangle_parser::{NodeArena, NodeData, NodeIndex};
use tracing::debug;

/// Result of converting an export wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConversion {
    /// The declaration that replaced the wrapper in its statement list.
    pub declaration: NodeIndex,
    /// The inserted `export { ... }` statement.
    pub statement: NodeIndex,
    /// Name given to an unnamed default-exported function or class.
    pub synthesized: Option<String>,
    /// Name the renamed binding carries after the conversion. Differs from
    /// the renamer's `old_name` only when the binding was the unnamed
    /// declaration itself.
    pub old_name: String,
}

impl Renamer {
    /// Run export preservation alone. Returns `None` when the nearest
    /// declaration enclosing the binding's declaration site is not directly
    /// wrapped in an export. That declaration need not introduce the binding:
    /// renaming a parameter of an exported function still splits the export.
    pub fn preserve_export(
        &self,
        arena: &mut NodeArena,
        scopes: &mut ScopeTree,
        uids: &mut UidGenerator,
    ) -> Result<Option<ExportConversion>, RenameError> {
        match self.parent_declaration(arena, scopes)? {
            Some(declaration) => self.convert_export_declaration(arena, scopes, uids, declaration),
            None => Ok(None),
        }
    }

    pub(crate) fn convert_export_declaration(
        &self,
        arena: &mut NodeArena,
        scopes: &mut ScopeTree,
        uids: &mut UidGenerator,
        declaration: NodeIndex,
    ) -> Result<Option<ExportConversion>, RenameError> {
        if scopes.binding(self.binding).is_none() {
            return Err(RenameError::UnknownBinding(self.binding));
        }

        let wrapper = arena.parent(declaration);
        if !arena.is_export_wrapper(wrapper) {
            return Ok(None);
        }
        let is_default = arena.is_export_default(wrapper);

        let mut old_name = self.old_name.clone();
        let mut synthesized = None;
        let is_unnamed_declaration = matches!(
            arena.data(declaration),
            Some(NodeData::FunctionDeclaration(_) | NodeData::ClassDeclaration(_))
        ) && arena.declaration_id(declaration).is_none();
        if is_default && is_unnamed_declaration {
            let name = uids.generate(scopes, &self.options.default_export_uid);
            let identifier = arena.alloc_identifier(name.as_str());
            arena.set_declaration_id(declaration, identifier);
            // The declaration's own binding may differ from the one being
            // renamed (e.g. a parameter of the exported function).
            if let Some(placeholder) = name_placeholder(scopes, declaration, identifier, &name)
                && placeholder == self.binding
            {
                old_name = name.clone();
            }
            synthesized = Some(name);
        }

        let mut specifiers = Vec::new();
        for name in arena.outer_binding_identifiers(declaration).into_keys() {
            let local_name = if name == old_name {
                self.new_name.clone()
            } else {
                name.clone()
            };
            let exported = if is_default {
                "default".to_string()
            } else {
                name
            };
            let local = arena.alloc_identifier(local_name);
            specifiers.push(arena.alloc(NodeData::ExportSpecifier { local, exported }));
        }
        let statement = arena.alloc(NodeData::ExportNamedDeclaration {
            declaration: NodeIndex::NONE,
            specifiers,
            source: None,
        });

        if arena.is_function_declaration(declaration) {
            arena.set_block_hoist(statement, self.options.function_export_hoist);
        }

        if !arena.insert_after(wrapper, statement) {
            return Err(RenameError::DetachedNode(wrapper));
        }
        if !arena.replace_node(wrapper, declaration) {
            return Err(RenameError::DetachedNode(wrapper));
        }

        debug!(
            declaration = declaration.0,
            kind = arena.data(declaration).map_or("", NodeData::kind_name),
            statement = statement.0,
            default = is_default,
            synthesized = synthesized.as_deref(),
            "converted export declaration"
        );
        Ok(Some(ExportConversion {
            declaration,
            statement,
            synthesized,
            old_name,
        }))
    }
}

/// Rekey the `default` placeholder binding of `declaration` under `name` and
/// give it its new identifier. Returns the placeholder.
fn name_placeholder(
    scopes: &mut ScopeTree,
    declaration: NodeIndex,
    identifier: NodeIndex,
    name: &str,
) -> Option<BindingId> {
    let placeholder = scopes.bindings_named(DEFAULT_EXPORT_KEY).find(|&id| {
        scopes
            .binding(id)
            .is_some_and(|binding| binding.declaration == declaration)
    })?;
    let scope = scopes.binding_mut(placeholder).map(|binding| {
        binding.identifier = identifier;
        binding.scope
    })?;
    scopes.remove_own_binding(scope, DEFAULT_EXPORT_KEY);
    scopes.set_own_binding(scope, name, placeholder);
    Some(placeholder)
}
