//! Collision-free internal identifiers.

use jsmangle_binder::ScopeTree;
use jsmangle_scanner::is_identifier_part;
use rustc_hash::FxHashSet;

/// Generates `_base`, `_base2`, `_base3`, ... skipping any name that is
/// declared in some scope, appears in the program text, or was generated
/// before by this generator.
#[derive(Clone, Debug, Default)]
pub struct UidGenerator {
    generated: FxHashSet<String>,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return a fresh name derived from `base`. The name is also
    /// recorded in `scopes` so later lookups treat it as taken.
    pub fn generate(&mut self, scopes: &mut ScopeTree, base: &str) -> String {
        let base = uid_base(base);
        let mut counter = 1u32;
        loop {
            let candidate = if counter == 1 {
                format!("_{base}")
            } else {
                format!("_{base}{counter}")
            };
            if !self.is_taken(scopes, &candidate) {
                scopes.add_reference(candidate.as_str());
                self.generated.insert(candidate.clone());
                return candidate;
            }
            counter += 1;
        }
    }

    fn is_taken(&self, scopes: &ScopeTree, name: &str) -> bool {
        self.generated.contains(name) || scopes.has_name(name) || scopes.has_reference(name)
    }
}

/// Identifier characters of `name` without leading underscores or trailing
/// digits; `ref` when nothing is left.
fn uid_base(name: &str) -> String {
    let cleaned: String = name.chars().filter(|&ch| is_identifier_part(ch)).collect();
    let trimmed = cleaned
        .trim_start_matches('_')
        .trim_end_matches(|ch: char| ch.is_ascii_digit());
    if trimmed.is_empty() {
        "ref".to_string()
    } else {
        trimmed.to_string()
    }
}
