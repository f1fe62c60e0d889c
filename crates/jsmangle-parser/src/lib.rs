//! JavaScript parser and arena syntax tree for the jsmangle renamer.
//!
//! This crate provides:
//! - `NodeIndex` / `NodeArena` - Arena-allocated nodes with parent links
//! - `NodeData` - The closed set of node kinds
//! - Classification queries (declarations, export wrappers, label operands,
//!   outer binding identifiers)
//! - Structural mutation (`replace_node`, `insert_after`, statement lists)
//! - `ParserState` - Recursive-descent parser producing the arena

pub mod base;
pub use base::NodeIndex;

pub mod node;
pub use node::{
    ClassData, FunctionData, MethodKind, Node, NodeArena, NodeData, PropertyKey, PropertyKind,
    SourceType, VarKind,
};

mod node_arena;
mod node_mutation;

pub mod node_access;
pub use node_access::BindingIdentifiers;

pub mod parser;
pub use parser::{ParseError, ParserState, parse, parse_module, parse_script};

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod node_tests;
