//! Scope-aware renaming of a single binding.
//!
//! This crate provides:
//! - `Renamer` - Rewrites every occurrence of one binding that is visible
//!   from its scope, leaving shadowing bindings and labels alone
//! - Export preservation - Splits `export` wrappers so the public name of a
//!   renamed export stays stable
//! - `UidGenerator` - Collision-free names for unnamed default exports
//! - `apply_block_hoist` - Reorders statements by hoist priority

mod block_hoist;
pub use block_hoist::{DEFAULT_HOIST_PRIORITY, apply_block_hoist};

pub mod error;
pub use error::RenameError;

mod export_preservation;
pub use export_preservation::ExportConversion;

pub mod options;
pub use options::RenameOptions;

mod renamer;
pub use renamer::{RenameOutcome, Renamer, rename_binding};

mod uid;
pub use uid::UidGenerator;

#[cfg(test)]
#[path = "../tests/renamer_tests.rs"]
mod renamer_tests;

#[cfg(test)]
#[path = "../tests/export_preservation_tests.rs"]
mod export_preservation_tests;

#[cfg(test)]
#[path = "../tests/support_tests.rs"]
mod support_tests;
