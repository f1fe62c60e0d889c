//! Read, rename, print.

use anyhow::{Context, Result, bail};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::args::{CliArgs, RenamePair};
use jsmangle_binder::{Binder, ScopeTree};
use jsmangle_emitter::Printer;
use jsmangle_parser::{SourceType, parse};
use jsmangle_renamer::{RenameOptions, UidGenerator, rename_binding};
use jsmangle_scanner::{is_identifier_part, is_identifier_start, is_reserved_word};

/// Run one invocation and return what should be written out.
pub fn run(args: &CliArgs) -> Result<String> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let source_type = if args.script {
        SourceType::Script
    } else {
        SourceType::Module
    };

    if args.list_bindings {
        let (arena, root) = parse(&source, source_type)
            .with_context(|| format!("failed to parse {}", args.file.display()))?;
        let scopes = Binder::bind(&arena, root);
        return Ok(list_bindings(&scopes, args.json));
    }

    let options = load_options(args)?;
    apply_renames(&source, source_type, &args.renames, &options)
        .with_context(|| format!("failed to rename in {}", args.file.display()))
}

/// Options from `--config`, then overridden by command-line flags.
pub fn load_options(args: &CliArgs) -> Result<RenameOptions> {
    let mut options = match &args.config {
        Some(path) => read_options(path)?,
        None => RenameOptions::default(),
    };
    if args.no_preserve_exports {
        options.preserve_exports = false;
    }
    if args.hoist_export_specifiers {
        options.hoist_export_specifiers = true;
    }
    Ok(options)
}

fn read_options(path: &Path) -> Result<RenameOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    RenameOptions::from_json(&text)
        .with_context(|| format!("invalid renamer options in {}", path.display()))
}

/// Parse `source`, apply `renames` in order and print the result.
///
/// Each rename targets the first binding currently named `old`, in scope
/// creation order.
pub fn apply_renames(
    source: &str,
    source_type: SourceType,
    renames: &[RenamePair],
    options: &RenameOptions,
) -> Result<String> {
    let (mut arena, root) = parse(source, source_type)?;
    let mut scopes = Binder::bind(&arena, root);
    let mut uids = UidGenerator::new();

    for pair in renames {
        validate_new_name(&pair.new)?;
        let Some(binding) = scopes.bindings_named(&pair.old).next() else {
            bail!("no binding named `{}`", pair.old);
        };
        let outcome = rename_binding(
            &mut arena,
            &mut scopes,
            &mut uids,
            binding,
            &pair.new,
            options,
        )?;
        info!(
            old = %pair.old,
            new = %pair.new,
            rewritten = outcome.rewritten,
            converted_export = outcome.export.is_some(),
            "renamed binding"
        );
    }

    let mut output = Printer::emit_to_string(&arena, root);
    output.push('\n');
    Ok(output)
}

fn validate_new_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part);
    if !valid {
        bail!("`{name}` is not a valid identifier");
    }
    if is_reserved_word(name) {
        bail!("`{name}` is a reserved word");
    }
    Ok(())
}

/// One line per binding: `scope kind name binding-kind`, or a JSON array of
/// scopes when `json` is set.
pub fn list_bindings(scopes: &ScopeTree, json: bool) -> String {
    if json {
        let entries: Vec<serde_json::Value> = scopes
            .scopes()
            .map(|(id, scope)| {
                let bindings: serde_json::Map<String, serde_json::Value> = scope
                    .bindings
                    .iter()
                    .filter_map(|(name, &binding)| {
                        let binding = scopes.binding(binding)?;
                        Some((name.clone(), serde_json::json!(binding.kind.as_str())))
                    })
                    .collect();
                serde_json::json!({
                    "scope": id.0,
                    "kind": scope.kind.as_str(),
                    "parent": scope.parent.map(|parent| parent.0),
                    "bindings": bindings,
                })
            })
            .collect();
        let mut output = serde_json::Value::Array(entries).to_string();
        output.push('\n');
        return output;
    }

    let mut output = String::new();
    for (id, scope) in scopes.scopes() {
        for (name, &binding) in &scope.bindings {
            if let Some(binding) = scopes.binding(binding) {
                let _ = writeln!(
                    output,
                    "{} {} {} {}",
                    id.0,
                    scope.kind.as_str(),
                    name,
                    binding.kind.as_str()
                );
            }
        }
    }
    output
}
