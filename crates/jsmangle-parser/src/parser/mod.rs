//! Recursive-descent parser for the JavaScript subset the renamer handles.
//!
//! Supported: variable/function/class declarations, the usual statements
//! (including labels, `for`-`in`/`of`, `try`/`catch`), imports and exports,
//! destructuring patterns, arrow functions, and the common expression forms.
//! Not supported: regular expression and template literals, `async`/`await`,
//! generators, `switch`, and class fields.

mod state;
mod state_expressions;
mod state_statements;

pub use state::ParserState;

use crate::base::NodeIndex;
use crate::node::{NodeArena, SourceType};
use jsmangle_scanner::ScanError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("expected {expected} but found {found:?} at offset {pos}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: u32,
    },
    #[error("invalid assignment target at offset {pos}")]
    InvalidAssignmentTarget { pos: u32 },
    #[error("'{keyword}' declarations are only allowed in modules (offset {pos})")]
    ModuleSyntaxInScript { keyword: String, pos: u32 },
}

/// Parse source text as an ES module.
pub fn parse_module(source: &str) -> Result<(NodeArena, NodeIndex), ParseError> {
    parse(source, SourceType::Module)
}

/// Parse source text as a classic script.
pub fn parse_script(source: &str) -> Result<(NodeArena, NodeIndex), ParseError> {
    parse(source, SourceType::Script)
}

pub fn parse(source: &str, source_type: SourceType) -> Result<(NodeArena, NodeIndex), ParseError> {
    let mut parser = ParserState::new(source, source_type)?;
    let root = parser.parse_program()?;
    let arena = parser.into_arena();
    tracing::trace!(?source_type, nodes = arena.len(), "parsed program");
    Ok((arena, root))
}
