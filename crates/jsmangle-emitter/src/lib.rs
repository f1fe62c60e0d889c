//! Printer for jsmangle syntax trees.
//!
//! Output is compact and deterministic: top-level statements are separated by
//! newlines and blocks are printed on one line (`{ a; b; }`). Parentheses come
//! only from `ParenthesizedExpression` nodes, so a tree printed after renaming
//! keeps the grouping of its source.

mod emitter;
pub use emitter::Printer;

#[cfg(test)]
#[path = "../tests/emitter_tests.rs"]
mod tests;
