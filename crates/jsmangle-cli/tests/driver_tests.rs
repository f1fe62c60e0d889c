use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::args::{CliArgs, RenamePair};
use crate::driver;
use crate::tracing_config::LogFormat;
use jsmangle_parser::SourceType;
use jsmangle_renamer::RenameOptions;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn parse_args(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("jsmangle").chain(args.iter().copied()))
        .expect("arguments should parse")
}

fn pair(old: &str, new: &str) -> RenamePair {
    RenamePair {
        old: old.to_string(),
        new: new.to_string(),
    }
}

#[test]
fn test_args_collect_renames_in_order() {
    let args = parse_args(&["in.js", "-r", "a=b", "--rename", "c = d", "--script"]);
    assert_eq!(args.file, PathBuf::from("in.js"));
    assert_eq!(args.renames, vec![pair("a", "b"), pair("c", "d")]);
    assert!(args.script);
    assert!(!args.list_bindings);
}

#[test]
fn test_args_reject_malformed_rename() {
    let argv = ["jsmangle", "in.js", "--rename", "a"];
    assert!(CliArgs::try_parse_from(argv).is_err());
    let argv = ["jsmangle", "in.js", "--rename", "=b"];
    assert!(CliArgs::try_parse_from(argv).is_err());
}

#[test]
fn test_run_renames_file() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        dir.path(),
        "input.js",
        "export function foo() {}\nfoo();\n",
    );
    let file = file.to_string_lossy().into_owned();
    let args = parse_args(&[&file, "--rename", "foo=f"]);
    let output = driver::run(&args).unwrap();
    assert_eq!(output, "function f() {}\nexport { f as foo };\nf();\n");
}

#[test]
fn test_run_applies_flags_over_config() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "input.js", "export let a = 1;\n");
    let config = write_file(dir.path(), "options.json", r#"{"preserveExports": true}"#);
    let file = file.to_string_lossy().into_owned();
    let config = config.to_string_lossy().into_owned();
    let args = parse_args(&[
        &file,
        "--config",
        &config,
        "--no-preserve-exports",
        "-r",
        "a=b",
    ]);
    assert!(!driver::load_options(&args).unwrap().preserve_exports);
    assert_eq!(driver::run(&args).unwrap(), "export let b = 1;\n");
}

#[test]
fn test_run_reports_bad_config() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "input.js", "let a;\n");
    let config = write_file(dir.path(), "options.json", "{ not json");
    let file = file.to_string_lossy().into_owned();
    let config = config.to_string_lossy().into_owned();
    let args = parse_args(&[&file, "--config", &config]);
    let error = driver::run(&args).unwrap_err();
    assert!(format!("{error}").starts_with("invalid renamer options"));
}

#[test]
fn test_run_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.js");
    let missing = missing.to_string_lossy().into_owned();
    let args = parse_args(&[&missing]);
    let error = driver::run(&args).unwrap_err();
    assert!(format!("{error}").starts_with("failed to read"));
}

#[test]
fn test_apply_renames_in_sequence() {
    let output = driver::apply_renames(
        "let a = 1;\nlet b = a;",
        SourceType::Module,
        &[pair("a", "x"), pair("b", "a")],
        &RenameOptions::default(),
    )
    .unwrap();
    assert_eq!(output, "let x = 1;\nlet a = x;\n");
}

#[test]
fn test_apply_renames_unnamed_default_export() {
    let output = driver::apply_renames(
        "export default class {}",
        SourceType::Module,
        &[pair("default", "Main")],
        &RenameOptions::default(),
    )
    .unwrap();
    assert_eq!(output, "class Main {}\nexport { Main as default };\n");
}

#[test]
fn test_apply_renames_rejects_unknown_binding() {
    let error = driver::apply_renames(
        "let a;",
        SourceType::Module,
        &[pair("zzz", "y")],
        &RenameOptions::default(),
    )
    .unwrap_err();
    assert_eq!(error.to_string(), "no binding named `zzz`");
}

#[test]
fn test_apply_renames_rejects_invalid_new_names() {
    for bad in ["1a", "a-b", "class"] {
        let result = driver::apply_renames(
            "let a;",
            SourceType::Module,
            &[pair("a", bad)],
            &RenameOptions::default(),
        );
        assert!(result.is_err(), "`{bad}` should be rejected");
    }
}

#[test]
fn test_apply_renames_script_rejects_module_syntax() {
    let result = driver::apply_renames(
        "export let a;",
        SourceType::Script,
        &[],
        &RenameOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_list_bindings_text() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "input.js", "let a;\nfunction f(x) {}\n");
    let file = file.to_string_lossy().into_owned();
    let args = parse_args(&[&file, "--list-bindings"]);
    assert_eq!(
        driver::run(&args).unwrap(),
        "0 program a let\n0 program f hoisted\n1 function x param\n"
    );
}

#[test]
fn test_list_bindings_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "input.js", "{ const c = 1; }\n");
    let file = file.to_string_lossy().into_owned();
    let args = parse_args(&[&file, "--list-bindings", "--json"]);
    let output = driver::run(&args).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["kind"], "program");
    assert_eq!(value[0]["parent"], serde_json::Value::Null);
    assert_eq!(value[1]["kind"], "block");
    assert_eq!(value[1]["parent"], 0);
    assert_eq!(value[1]["bindings"]["c"], "const");
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("TREE"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
}
