use super::*;
use jsmangle_binder::{Binder, BindingId, ScopeTree};
use jsmangle_emitter::Printer;
use jsmangle_parser::{NodeArena, NodeIndex, parse_module};

struct Fixture {
    arena: NodeArena,
    root: NodeIndex,
    scopes: ScopeTree,
    uids: UidGenerator,
}

impl Fixture {
    fn new(source: &str) -> Self {
        let (arena, root) = parse_module(source).expect("parse should succeed");
        let scopes = Binder::bind(&arena, root);
        Fixture {
            arena,
            root,
            scopes,
            uids: UidGenerator::new(),
        }
    }

    fn binding(&self, name: &str) -> BindingId {
        self.scopes
            .bindings_named(name)
            .next()
            .unwrap_or_else(|| panic!("no binding named {name}"))
    }

    fn rename(&mut self, old: &str, new: &str) -> RenameOutcome {
        let binding = self.binding(old);
        rename_binding(
            &mut self.arena,
            &mut self.scopes,
            &mut self.uids,
            binding,
            new,
            &RenameOptions::default(),
        )
        .expect("rename should succeed")
    }

    fn print(&self) -> String {
        Printer::emit_to_string(&self.arena, self.root)
    }

    fn statement(&self, position: usize) -> NodeIndex {
        self.arena.statement_list(self.root).expect("program")[position]
    }
}

fn rename(source: &str, old: &str, new: &str) -> String {
    let mut fixture = Fixture::new(source);
    fixture.rename(old, new);
    fixture.print()
}

#[test]
fn test_rename_top_level_let() {
    assert_eq!(
        rename("let a = 1;\nuse(a, a + 1);", "a", "b"),
        "let b = 1;\nuse(b, b + 1);"
    );
}

#[test]
fn test_rename_leaves_shadowing_binding_alone() {
    assert_eq!(
        rename(
            "let a = 1;\nfunction f() { let a = 2; return a; }\nuse(a);",
            "a",
            "b"
        ),
        "let b = 1;\nfunction f() { let a = 2; return a; }\nuse(b);"
    );
}

#[test]
fn test_rename_enters_scopes_that_still_see_binding() {
    assert_eq!(
        rename(
            "let a = 1;\nfunction f(x) { if (x) { return a; } }",
            "a",
            "b"
        ),
        "let b = 1;\nfunction f(x) { if (x) { return b; } }"
    );
}

#[test]
fn test_rename_skips_labels() {
    assert_eq!(
        rename("let a = 1;\na: for (;;) { break a; }\nuse(a);", "a", "b"),
        "let b = 1;\na: for (;;) { break a; }\nuse(b);"
    );
}

#[test]
fn test_rename_parameter_leaves_labels_alone() {
    assert_eq!(
        rename(
            "function f(x) { L: for (;;) { if (x) break L; } return x; }",
            "x",
            "x$1"
        ),
        "function f(x$1) { L: for (;;) { if (x$1) break L; } return x$1; }"
    );
}

#[test]
fn test_rename_parameter_skips_shadowing_function() {
    assert_eq!(
        rename(
            "function f(x) { function g(x) { return x; } return x; }",
            "x",
            "x$1"
        ),
        "function f(x$1) { function g(x) { return x; } return x$1; }"
    );
}

#[test]
fn test_rename_parameter() {
    let mut fixture = Fixture::new("function f(x) { return x; }\nx;");
    let outcome = fixture.rename("x", "y");
    assert_eq!(fixture.print(), "function f(y) { return y; }\nx;");
    assert_eq!(outcome.rewritten, 2);
    assert_eq!(outcome.export, None);
}

#[test]
fn test_rename_function_declaration_name_from_outer_scope() {
    assert_eq!(
        rename("function f() { return f; }\nf();", "f", "g"),
        "function g() { return g; }\ng();"
    );
}

#[test]
fn test_rename_function_expression_name() {
    assert_eq!(
        rename("const g = function f() { return f; };\nf;", "f", "h"),
        "const g = function h() { return h; };\nf;"
    );
}

#[test]
fn test_rename_class_declaration() {
    assert_eq!(
        rename("class A { m() { return A; } }\nuse(A);", "A", "B"),
        "class B { m() { return B; } }\nuse(B);"
    );
}

#[test]
fn test_rename_catch_parameter() {
    assert_eq!(
        rename("try {} catch (e) { use(e); }\ne;", "e", "err"),
        "try {} catch (err) { use(err); }\ne;"
    );
}

#[test]
fn test_rename_for_loop_binding() {
    assert_eq!(
        rename("for (let i = 0; i < n; i++) { use(i); }", "i", "j"),
        "for (let j = 0; j < n; j++) { use(j); }"
    );
}

#[test]
fn test_rename_destructuring_declaration_expands_shorthand() {
    assert_eq!(
        rename("const { a } = o;\nuse({ a });", "a", "a$1"),
        "const { a: a$1 } = o;\nuse({ a: a$1 });"
    );
}

#[test]
fn test_rename_destructuring_assignment_target() {
    assert_eq!(
        rename("let a;\n({ a } = o);\nuse(a);", "a", "q"),
        "let q;\n({ a: q } = o);\nuse(q);"
    );
}

#[test]
fn test_rename_import_binding() {
    assert_eq!(
        rename("import { a } from 'm';\na();", "a", "b"),
        "import { a as b } from 'm';\nb();"
    );
    assert_eq!(
        rename("import d from 'm';\nd();", "d", "e"),
        "import e from 'm';\ne();"
    );
}

#[test]
fn test_rename_keeps_reexport_local_names() {
    assert_eq!(
        rename("let a;\nexport { a } from 'm';\nuse(a);", "a", "b"),
        "let b;\nexport { a } from 'm';\nuse(b);"
    );
}

#[test]
fn test_rename_local_export_specifier_keeps_public_name() {
    assert_eq!(
        rename("let a;\nexport { a };", "a", "b"),
        "let b;\nexport { b as a };"
    );
}

#[test]
fn test_rename_updates_scope_bookkeeping() {
    let mut fixture = Fixture::new("let a = 1;\nlet c = a;");
    let binding = fixture.binding("a");
    fixture.rename("a", "b");
    assert_eq!(fixture.scopes.own_binding(ScopeTree::ROOT, "a"), None);
    assert_eq!(fixture.scopes.own_binding(ScopeTree::ROOT, "b"), Some(binding));
    assert_eq!(fixture.scopes.binding_name(binding), Some("b"));
    let identifier = fixture.scopes.binding(binding).unwrap().identifier;
    assert_eq!(fixture.arena.identifier_name(identifier), Some("b"));
}

#[test]
fn test_rename_round_trip_restores_source() {
    let source = "let a = 1;\nfunction f(a) { return a; }\nuse(a);";
    let mut fixture = Fixture::new(source);
    let binding = fixture.binding("a");
    assert_eq!(fixture.scopes.binding(binding).unwrap().scope, ScopeTree::ROOT);
    fixture.rename("a", "tmp");
    assert_eq!(
        fixture.print(),
        "let tmp = 1;\nfunction f(a) { return a; }\nuse(tmp);"
    );
    rename_binding(
        &mut fixture.arena,
        &mut fixture.scopes,
        &mut fixture.uids,
        binding,
        "a",
        &RenameOptions::default(),
    )
    .unwrap();
    assert_eq!(fixture.print(), source);
}

#[test]
fn test_rename_twice_renames_nothing_the_second_time() {
    let mut fixture = Fixture::new("let a = 1;\nuse(a);");
    let binding = fixture.binding("a");
    let renamer = Renamer::new(binding, "a", "b");
    let first = renamer
        .rename(&mut fixture.arena, &mut fixture.scopes, &mut fixture.uids, None)
        .unwrap();
    assert_eq!(first.rewritten, 2);
    let second = renamer
        .rename(&mut fixture.arena, &mut fixture.scopes, &mut fixture.uids, None)
        .unwrap();
    assert_eq!(second.rewritten, 0);
    assert_eq!(fixture.print(), "let b = 1;\nuse(b);");
}

#[test]
fn test_rename_with_scope_root_is_confined_and_keeps_bookkeeping() {
    let mut fixture = Fixture::new("let a = 1;\nfunction f() { use(a); }\nuse(a);");
    let binding = fixture.binding("a");
    let function = fixture.statement(1);
    let outcome = Renamer::new(binding, "a", "z")
        .rename(
            &mut fixture.arena,
            &mut fixture.scopes,
            &mut fixture.uids,
            Some(function),
        )
        .unwrap();
    assert_eq!(outcome.rewritten, 1);
    assert_eq!(
        fixture.print(),
        "let a = 1;\nfunction f() { use(z); }\nuse(a);"
    );
    assert_eq!(fixture.scopes.own_binding(ScopeTree::ROOT, "a"), Some(binding));
    assert_eq!(fixture.scopes.own_binding(ScopeTree::ROOT, "z"), None);
}

#[test]
fn test_rename_occurrences_only() {
    let mut fixture = Fixture::new("export let a = 1;\nuse(a);");
    let binding = fixture.binding("a");
    let rewritten = Renamer::new(binding, "a", "b")
        .rename_occurrences(&mut fixture.arena, &fixture.scopes, None)
        .unwrap();
    assert_eq!(rewritten, 2);
    assert_eq!(fixture.print(), "export let b = 1;\nuse(b);");
    assert_eq!(fixture.scopes.own_binding(ScopeTree::ROOT, "a"), Some(binding));
}

#[test]
fn test_rename_unknown_binding_is_an_error() {
    let mut fixture = Fixture::new("let a;");
    let missing = BindingId(99);
    let result = Renamer::new(missing, "a", "b").rename(
        &mut fixture.arena,
        &mut fixture.scopes,
        &mut fixture.uids,
        None,
    );
    assert_eq!(result, Err(RenameError::UnknownBinding(missing)));
    assert_eq!(fixture.print(), "let a;");
}

#[test]
fn test_rename_detached_scope_root_is_an_error() {
    let mut fixture = Fixture::new("let a;");
    let binding = fixture.binding("a");
    let result = Renamer::new(binding, "a", "b").rename_occurrences(
        &mut fixture.arena,
        &fixture.scopes,
        Some(NodeIndex(9999)),
    );
    assert_eq!(result, Err(RenameError::DetachedNode(NodeIndex(9999))));
}
