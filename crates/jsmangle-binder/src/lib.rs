//! Scope-tree construction for the jsmangle renamer.
//!
//! `Binder::bind` walks a parsed program once and produces a `ScopeTree`:
//! one `Scope` per scope-introducing node, each owning a name -> `BindingId`
//! map. Names are resolved by walking from a scope to its ancestors.

mod binder;
pub use binder::{Binder, DEFAULT_EXPORT_KEY};

pub mod scope;
pub use scope::{Binding, BindingId, BindingKind, Scope, ScopeId, ScopeKind, ScopeTree};

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
