//! Statement reordering by hoist priority.

use jsmangle_parser::NodeArena;
use jsmangle_parser::NodeIndex;
use std::cmp::Reverse;

/// Priority of statements that carry no explicit hoist value.
pub const DEFAULT_HOIST_PRIORITY: u8 = 1;

/// Stable-sort the statements of a program or block so that higher hoist
/// priorities come first. Returns `false` when `block` holds no statement
/// list.
pub fn apply_block_hoist(arena: &mut NodeArena, block: NodeIndex) -> bool {
    let Some(statements) = arena.statement_list(block) else {
        return false;
    };
    let mut statements = statements.to_vec();
    statements.sort_by_key(|&statement| {
        Reverse(
            arena
                .get(statement)
                .and_then(|node| node.block_hoist)
                .unwrap_or(DEFAULT_HOIST_PRIORITY),
        )
    });
    arena.set_statement_list(block, statements)
}
