use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the jsmangle binary.
#[derive(Parser, Debug)]
#[command(
    name = "jsmangle",
    version,
    about = "Rename JavaScript bindings without changing what the program means"
)]
pub struct CliArgs {
    /// JavaScript file to read.
    pub file: PathBuf,

    /// Rename the first binding named OLD to NEW. May be repeated; renames
    /// apply in order.
    #[arg(short = 'r', long = "rename", value_name = "OLD=NEW", value_parser = parse_rename_pair)]
    pub renames: Vec<RenamePair>,

    /// Parse the input as a classic script instead of a module.
    #[arg(long)]
    pub script: bool,

    /// JSON file with renamer options (camelCase keys).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Print the bindings of every scope instead of renaming.
    #[arg(long = "list-bindings")]
    pub list_bindings: bool,

    /// With --list-bindings, print JSON.
    #[arg(long)]
    pub json: bool,

    /// Leave `export` declarations untouched when renaming exported bindings.
    #[arg(long = "no-preserve-exports")]
    pub no_preserve_exports: bool,

    /// Move generated export specifiers by hoist priority.
    #[arg(long = "hoist-export-specifiers")]
    pub hoist_export_specifiers: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamePair {
    pub old: String,
    pub new: String,
}

fn parse_rename_pair(value: &str) -> Result<RenamePair, String> {
    let Some((old, new)) = value.split_once('=') else {
        return Err(format!("expected OLD=NEW, got `{value}`"));
    };
    let (old, new) = (old.trim(), new.trim());
    if old.is_empty() || new.is_empty() {
        return Err(format!("both names are required in `{value}`"));
    }
    Ok(RenamePair {
        old: old.to_string(),
        new: new.to_string(),
    })
}
