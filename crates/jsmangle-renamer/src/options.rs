//! Renamer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling export preservation and hoisting.
///
/// Deserialized from camelCase JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameOptions {
    /// Rewrite `export` wrappers so renamed exports keep their public name.
    pub preserve_exports: bool,
    /// Hoist priority put on the specifier statement produced for an
    /// exported function declaration.
    pub function_export_hoist: u8,
    /// Base name for identifiers synthesized for unnamed default exports.
    pub default_export_uid: String,
    /// Reorder the enclosing statement list by hoist priority after each
    /// export conversion.
    pub hoist_export_specifiers: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        RenameOptions {
            preserve_exports: true,
            function_export_hoist: 3,
            default_export_uid: "default".to_string(),
            hoist_export_specifiers: false,
        }
    }
}

impl RenameOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
