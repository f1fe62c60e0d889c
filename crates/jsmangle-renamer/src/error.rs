use jsmangle_binder::{BindingId, ScopeId};
use jsmangle_parser::NodeIndex;

/// Misuse of handles passed to the renamer. Well-formed trees never produce
/// these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenameError {
    #[error("binding {0:?} does not exist in the scope tree")]
    UnknownBinding(BindingId),
    #[error("node {0:?} is not attached to the syntax tree")]
    DetachedNode(NodeIndex),
    #[error("scope {0:?} does not exist in the scope tree")]
    MissingScope(ScopeId),
}
