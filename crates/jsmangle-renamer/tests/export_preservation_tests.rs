use super::*;
use jsmangle_binder::{Binder, BindingId, DEFAULT_EXPORT_KEY, ScopeTree};
use jsmangle_emitter::Printer;
use jsmangle_parser::{NodeArena, NodeIndex, parse_module};

fn setup(source: &str) -> (NodeArena, NodeIndex, ScopeTree) {
    let (arena, root) = parse_module(source).expect("parse should succeed");
    let scopes = Binder::bind(&arena, root);
    (arena, root, scopes)
}

fn first_binding(scopes: &ScopeTree, name: &str) -> BindingId {
    scopes
        .bindings_named(name)
        .next()
        .unwrap_or_else(|| panic!("no binding named {name}"))
}

fn rename_with(source: &str, old: &str, new: &str, options: &RenameOptions) -> String {
    let (mut arena, root, mut scopes) = setup(source);
    let binding = first_binding(&scopes, old);
    let mut uids = UidGenerator::new();
    rename_binding(&mut arena, &mut scopes, &mut uids, binding, new, options)
        .expect("rename should succeed");
    Printer::emit_to_string(&arena, root)
}

#[test]
fn test_named_function_export_is_split() {
    let (mut arena, root, mut scopes) = setup("export function foo() {}\nfoo();");
    let binding = first_binding(&scopes, "foo");
    let mut uids = UidGenerator::new();
    let outcome = rename_binding(
        &mut arena,
        &mut scopes,
        &mut uids,
        binding,
        "foo$1",
        &RenameOptions::default(),
    )
    .unwrap();

    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "function foo$1() {}\nexport { foo$1 as foo };\nfoo$1();"
    );
    let conversion = outcome.export.expect("export was converted");
    assert_eq!(conversion.synthesized, None);
    assert_eq!(arena.statement_list(root).unwrap()[0], conversion.declaration);
    assert_eq!(arena.statement_list(root).unwrap()[1], conversion.statement);
    assert_eq!(arena.parent(conversion.declaration), root);
    assert_eq!(arena.get(conversion.statement).unwrap().block_hoist, Some(3));
}

#[test]
fn test_variable_export_lists_every_declared_name() {
    assert_eq!(
        rename_with(
            "export const a = 1, b = 2;\nuse(a);",
            "a",
            "z",
            &RenameOptions::default()
        ),
        "const z = 1, b = 2;\nexport { z as a, b };\nuse(z);"
    );
}

#[test]
fn test_variable_export_specifier_has_no_hoist_priority() {
    let (mut arena, _, mut scopes) = setup("export let a;");
    let binding = first_binding(&scopes, "a");
    let mut uids = UidGenerator::new();
    let outcome = Renamer::new(binding, "a", "b")
        .rename(&mut arena, &mut scopes, &mut uids, None)
        .unwrap();
    let statement = outcome.export.unwrap().statement;
    assert_eq!(arena.get(statement).unwrap().block_hoist, None);
}

#[test]
fn test_class_export_is_split() {
    assert_eq!(
        rename_with(
            "export class A {}\nnew A();",
            "A",
            "B",
            &RenameOptions::default()
        ),
        "class B {}\nexport { B as A };\nnew B();"
    );
}

#[test]
fn test_named_default_export_is_split() {
    assert_eq!(
        rename_with(
            "export default function main() { return main; }",
            "main",
            "m",
            &RenameOptions::default()
        ),
        "function m() { return m; }\nexport { m as default };"
    );
}

#[test]
fn test_unnamed_default_function_gets_a_name() {
    let (mut arena, root, mut scopes) = setup("export default function () {}");
    let binding = scopes
        .own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY)
        .expect("placeholder binding");
    let mut uids = UidGenerator::new();
    let outcome = rename_binding(
        &mut arena,
        &mut scopes,
        &mut uids,
        binding,
        "x$1",
        &RenameOptions::default(),
    )
    .unwrap();

    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "function x$1() {}\nexport { x$1 as default };"
    );
    assert_eq!(
        outcome.export.unwrap().synthesized.as_deref(),
        Some("_default")
    );
    assert_eq!(scopes.own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY), None);
    assert_eq!(scopes.own_binding(ScopeTree::ROOT, "_default"), None);
    assert_eq!(scopes.own_binding(ScopeTree::ROOT, "x$1"), Some(binding));
    let identifier = scopes.binding(binding).unwrap().identifier;
    assert_eq!(arena.identifier_name(identifier), Some("x$1"));
}

#[test]
fn test_unnamed_default_class_avoids_taken_names() {
    let (mut arena, root, mut scopes) = setup("let _default = 1;\nexport default class {}");
    let binding = scopes
        .own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY)
        .expect("placeholder binding");
    let mut uids = UidGenerator::new();
    let outcome = rename_binding(
        &mut arena,
        &mut scopes,
        &mut uids,
        binding,
        "K",
        &RenameOptions::default(),
    )
    .unwrap();

    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "let _default = 1;\nclass K {}\nexport { K as default };"
    );
    let conversion = outcome.export.unwrap();
    assert_eq!(conversion.synthesized.as_deref(), Some("_default2"));
    assert_eq!(arena.get(conversion.statement).unwrap().block_hoist, None);
}

#[test]
fn test_preserve_export_alone_keeps_old_local_name_when_new_equals_old() {
    let (mut arena, root, mut scopes) = setup("export function foo() {}");
    let binding = first_binding(&scopes, "foo");
    let mut uids = UidGenerator::new();
    let conversion = Renamer::new(binding, "foo", "foo")
        .preserve_export(&mut arena, &mut scopes, &mut uids)
        .unwrap();
    assert!(conversion.is_some());
    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "function foo() {}\nexport { foo };"
    );
}

#[test]
fn test_parameter_of_exported_function_splits_export() {
    let (mut arena, root, mut scopes) = setup("export function f(x) { return x; }");
    let binding = first_binding(&scopes, "x");
    let mut uids = UidGenerator::new();
    let outcome = rename_binding(
        &mut arena,
        &mut scopes,
        &mut uids,
        binding,
        "y",
        &RenameOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.rewritten, 2);
    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "function f(y) { return y; }\nexport { f };"
    );
    let conversion = outcome.export.expect("enclosing export was converted");
    assert_eq!(conversion.synthesized, None);
    assert_eq!(conversion.old_name, "x");
    assert_eq!(arena.get(conversion.statement).unwrap().block_hoist, Some(3));
}

#[test]
fn test_parameter_of_unnamed_default_function_names_the_function() {
    let (mut arena, root, mut scopes) = setup("export default function (x) { return x; }");
    let placeholder = scopes
        .own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY)
        .expect("placeholder binding");
    let binding = first_binding(&scopes, "x");
    let mut uids = UidGenerator::new();
    let outcome = rename_binding(
        &mut arena,
        &mut scopes,
        &mut uids,
        binding,
        "y",
        &RenameOptions::default(),
    )
    .unwrap();

    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "function _default(y) { return y; }\nexport { _default as default };"
    );
    let conversion = outcome.export.unwrap();
    assert_eq!(conversion.synthesized.as_deref(), Some("_default"));
    assert_eq!(conversion.old_name, "x");
    assert_eq!(scopes.own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY), None);
    assert_eq!(scopes.own_binding(ScopeTree::ROOT, "_default"), Some(placeholder));
    let identifier = scopes.binding(placeholder).unwrap().identifier;
    assert_eq!(arena.identifier_name(identifier), Some("_default"));
    assert_eq!(scopes.binding_name(binding), Some("y"));
}

#[test]
fn test_parameter_of_exported_arrow_splits_variable_export() {
    assert_eq!(
        rename_with(
            "export const g = (x) => x;",
            "x",
            "y",
            &RenameOptions::default()
        ),
        "const g = (y) => y;\nexport { g };"
    );
}

#[test]
fn test_nested_declaration_is_not_an_export() {
    assert_eq!(
        rename_with(
            "export function f() { let a = 1; return a; }",
            "a",
            "b",
            &RenameOptions::default()
        ),
        "export function f() { let b = 1; return b; }"
    );
}

#[test]
fn test_preserve_exports_disabled() {
    let options = RenameOptions {
        preserve_exports: false,
        ..RenameOptions::default()
    };
    assert_eq!(
        rename_with("export function foo() {}\nfoo();", "foo", "bar", &options),
        "export function bar() {}\nbar();"
    );
}

#[test]
fn test_hoisted_export_specifier_moves_to_front() {
    let options = RenameOptions {
        hoist_export_specifiers: true,
        ..RenameOptions::default()
    };
    assert_eq!(
        rename_with("foo();\nexport function foo() {}", "foo", "foo$1", &options),
        "export { foo$1 as foo };\nfoo$1();\nfunction foo$1() {}"
    );
}

#[test]
fn test_custom_function_export_hoist() {
    let (mut arena, _, mut scopes) = setup("export function foo() {}");
    let binding = first_binding(&scopes, "foo");
    let mut uids = UidGenerator::new();
    let options = RenameOptions {
        function_export_hoist: 7,
        ..RenameOptions::default()
    };
    let outcome = rename_binding(&mut arena, &mut scopes, &mut uids, binding, "g", &options)
        .unwrap();
    let statement = outcome.export.unwrap().statement;
    assert_eq!(arena.get(statement).unwrap().block_hoist, Some(7));
}
