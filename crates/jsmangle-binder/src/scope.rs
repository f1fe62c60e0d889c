//! Scope tree: an overlay over the syntax tree keyed by the node opening each
//! scope.

use indexmap::IndexMap;
use jsmangle_parser::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Index of a scope in a `ScopeTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

/// Index of a binding in a `ScopeTree`. Binding identity is handle equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Program,
    Function,
    Block,
    Catch,
    Class,
}

impl ScopeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Program => "program",
            ScopeKind::Function => "function",
            ScopeKind::Block => "block",
            ScopeKind::Catch => "catch",
            ScopeKind::Class => "class",
        }
    }
}

/// How a binding was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    Var,
    Let,
    Const,
    /// Function declaration.
    Hoisted,
    Param,
    /// Name of a function or class expression, visible only inside it.
    Local,
    /// Import specifier.
    Module,
}

impl BindingKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
            BindingKind::Hoisted => "hoisted",
            BindingKind::Param => "param",
            BindingKind::Local => "local",
            BindingKind::Module => "module",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Node that opens this scope.
    pub block: NodeIndex,
    /// Own bindings, in declaration order.
    pub bindings: IndexMap<String, BindingId>,
    pub children: Vec<ScopeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    pub scope: ScopeId,
    /// Canonical identifier introducing the name. `NONE` for the unnamed
    /// declaration of `export default function () {}` until it is named.
    pub identifier: NodeIndex,
    /// Declaration site: declarator, function/class declaration, import
    /// specifier, parameter, or catch parameter.
    pub declaration: NodeIndex,
}

/// Scopes and bindings of one program.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) node_scopes: FxHashMap<NodeIndex, ScopeId>,
    /// Every identifier text appearing in the program, labels included.
    pub(crate) references: FxHashSet<String>,
}

impl ScopeTree {
    /// The program scope.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn root(&self) -> ScopeId {
        Self::ROOT
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    #[inline]
    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.0 as usize)
    }

    #[inline]
    pub fn binding_mut(&mut self, id: BindingId) -> Option<&mut Binding> {
        self.bindings.get_mut(id.0 as usize)
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Scopes in creation order (pre-order over the tree).
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(idx, scope)| (ScopeId(idx as u32), scope))
    }

    /// Scope opened by `node`, if it opens one.
    #[inline]
    pub fn scope_of_node(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope(scope)?.parent
    }

    /// Binding `name` declared directly in `scope`.
    pub fn own_binding(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.scope(scope)?.bindings.get(name).copied()
    }

    /// Resolve `name` from `scope` outward.
    pub fn get_binding(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(&binding) = scope.bindings.get(name) {
                return Some(binding);
            }
            current = scope.parent;
        }
        None
    }

    /// Whether `name` resolves from `scope` to exactly `binding`.
    #[inline]
    pub fn binding_identifier_equals(&self, scope: ScopeId, name: &str, binding: BindingId) -> bool {
        self.get_binding(scope, name) == Some(binding)
    }

    pub fn remove_own_binding(&mut self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.scopes
            .get_mut(scope.0 as usize)?
            .bindings
            .shift_remove(name)
    }

    /// Map `name` to `binding` in `scope`, replacing any previous entry.
    pub fn set_own_binding(&mut self, scope: ScopeId, name: impl Into<String>, binding: BindingId) -> bool {
        match self.scopes.get_mut(scope.0 as usize) {
            Some(scope) => {
                scope.bindings.insert(name.into(), binding);
                true
            }
            None => false,
        }
    }

    /// Whether any scope declares `name`.
    pub fn has_name(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.bindings.contains_key(name))
    }

    /// Whether `name` appears anywhere in the program text as an identifier,
    /// including free references and labels.
    pub fn has_reference(&self, name: &str) -> bool {
        self.references.contains(name)
    }

    /// Record a name introduced after binding, so later uniqueness checks see it.
    pub fn add_reference(&mut self, name: impl Into<String>) {
        self.references.insert(name.into());
    }

    /// Bindings currently mapped under `name`, in scope creation order.
    pub fn bindings_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = BindingId> + 'a {
        self.scopes
            .iter()
            .filter_map(move |scope| scope.bindings.get(name).copied())
    }

    /// Name `binding` is currently mapped under in its owning scope.
    pub fn binding_name(&self, binding: BindingId) -> Option<&str> {
        let owner = self.binding(binding)?.scope;
        self.scope(owner)?
            .bindings
            .iter()
            .find(|&(_, &id)| id == binding)
            .map(|(name, _)| name.as_str())
    }
}
