use super::*;
use jsmangle_parser::{NodeArena, NodeData, NodeIndex, parse_module};

fn bind(source: &str) -> (NodeArena, NodeIndex, ScopeTree) {
    let (arena, root) = parse_module(source).expect("parse should succeed");
    let scopes = Binder::bind(&arena, root);
    (arena, root, scopes)
}

fn own_names(scopes: &ScopeTree, scope: ScopeId) -> Vec<String> {
    scopes
        .scope(scope)
        .expect("scope exists")
        .bindings
        .keys()
        .cloned()
        .collect()
}

fn scope_kinds(scopes: &ScopeTree) -> Vec<ScopeKind> {
    scopes.scopes().map(|(_, scope)| scope.kind).collect()
}

fn first_statement(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    arena.statement_list(root).expect("program")[0]
}

#[test]
fn test_program_scope_is_root() {
    let (_, root, scopes) = bind("let a = 1;");
    assert_eq!(scopes.root(), ScopeTree::ROOT);
    assert_eq!(scopes.scope_of_node(root), Some(ScopeTree::ROOT));
    assert_eq!(scopes.parent(ScopeTree::ROOT), None);
    assert_eq!(own_names(&scopes, ScopeTree::ROOT), vec!["a"]);
}

#[test]
fn test_var_hoists_to_function_scope() {
    let (arena, root, scopes) = bind("function f() { if (x) { var v = 1; let l = 2; } }");
    let function = first_statement(&arena, root);
    let function_scope = scopes.scope_of_node(function).expect("function scope");
    assert_eq!(own_names(&scopes, function_scope), vec!["v"]);
    assert_eq!(own_names(&scopes, ScopeTree::ROOT), vec!["f"]);

    let l = scopes.bindings_named("l").next().expect("l is bound");
    let l_scope = scopes.binding(l).unwrap().scope;
    assert_eq!(scopes.scope(l_scope).unwrap().kind, ScopeKind::Block);
    assert_eq!(scopes.parent(l_scope), Some(function_scope));
}

#[test]
fn test_function_body_shares_function_scope() {
    let (_, _, scopes) = bind("function f(a) { let b; }");
    assert_eq!(
        scope_kinds(&scopes),
        vec![ScopeKind::Program, ScopeKind::Function]
    );
    let function_scope = ScopeId(1);
    assert_eq!(own_names(&scopes, function_scope), vec!["a", "b"]);
    let a = scopes.own_binding(function_scope, "a").unwrap();
    assert_eq!(scopes.binding(a).unwrap().kind, BindingKind::Param);
}

#[test]
fn test_binding_kinds() {
    let (_, _, scopes) = bind(
        "import d, { n } from 'm';\nvar v;\nlet l;\nconst c = 1;\nfunction f() {}\nclass K {}",
    );
    let kinds: Vec<_> = ["d", "n", "v", "l", "c", "f", "K"]
        .iter()
        .map(|name| {
            let id = scopes.own_binding(ScopeTree::ROOT, name).expect(name);
            scopes.binding(id).unwrap().kind
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            BindingKind::Module,
            BindingKind::Module,
            BindingKind::Var,
            BindingKind::Let,
            BindingKind::Const,
            BindingKind::Hoisted,
            BindingKind::Let,
        ]
    );
}

#[test]
fn test_named_function_expression_binds_locally() {
    let (_, _, scopes) = bind("const g = function inner(p) { return inner; };");
    assert!(scopes.own_binding(ScopeTree::ROOT, "inner").is_none());
    let inner = scopes.bindings_named("inner").next().expect("inner bound");
    let binding = scopes.binding(inner).unwrap();
    assert_eq!(binding.kind, BindingKind::Local);
    assert_eq!(scopes.scope(binding.scope).unwrap().kind, ScopeKind::Function);
}

#[test]
fn test_class_expression_name_binds_in_class_scope() {
    let (_, _, scopes) = bind("const C = class Named { m() { return Named; } };");
    let named = scopes.bindings_named("Named").next().expect("bound");
    let binding = scopes.binding(named).unwrap();
    assert_eq!(binding.kind, BindingKind::Local);
    assert_eq!(scopes.scope(binding.scope).unwrap().kind, ScopeKind::Class);
}

#[test]
fn test_catch_parameter_binds_in_catch_scope() {
    let (_, _, scopes) = bind("try {} catch (err) { let inner; }");
    let err = scopes.bindings_named("err").next().unwrap();
    let catch_scope = scopes.binding(err).unwrap().scope;
    assert_eq!(scopes.scope(catch_scope).unwrap().kind, ScopeKind::Catch);
    assert_eq!(own_names(&scopes, catch_scope), vec!["err", "inner"]);
}

#[test]
fn test_for_head_opens_block_scope() {
    let (arena, root, scopes) = bind("for (let i = 0; i < n; i++) { let j; }");
    let for_scope = scopes
        .scope_of_node(first_statement(&arena, root))
        .expect("for scope");
    assert_eq!(own_names(&scopes, for_scope), vec!["i"]);
    assert!(own_names(&scopes, ScopeTree::ROOT).is_empty());
}

#[test]
fn test_destructuring_declares_every_name() {
    let (_, _, scopes) = bind("const { a, b: [c, ...d], e = f } = obj;");
    assert_eq!(own_names(&scopes, ScopeTree::ROOT), vec!["a", "c", "d", "e"]);
}

#[test]
fn test_redeclaration_reuses_first_binding() {
    let (arena, root, scopes) = bind("var a = 1;\nvar a = 2;");
    let a = scopes.own_binding(ScopeTree::ROOT, "a").unwrap();
    assert_eq!(scopes.binding_count(), 1);
    let first_declarator = match arena.data(first_statement(&arena, root)) {
        Some(NodeData::VariableDeclaration { declarations, .. }) => declarations[0],
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(scopes.binding(a).unwrap().declaration, first_declarator);
}

#[test]
fn test_anonymous_default_export_gets_placeholder_binding() {
    let (arena, root, scopes) = bind("export default function () {}");
    let binding = scopes
        .own_binding(ScopeTree::ROOT, DEFAULT_EXPORT_KEY)
        .expect("placeholder binding");
    let binding = scopes.binding(binding).unwrap();
    assert!(binding.identifier.is_none());
    assert_eq!(binding.kind, BindingKind::Hoisted);
    let Some(NodeData::ExportDefaultDeclaration { declaration }) =
        arena.data(first_statement(&arena, root))
    else {
        panic!("expected default export");
    };
    assert_eq!(binding.declaration, *declaration);
}

#[test]
fn test_resolution_walks_outward_and_respects_shadowing() {
    let (arena, root, scopes) = bind("let x;\nfunction f(x) { { let y; } }");
    let outer = scopes.own_binding(ScopeTree::ROOT, "x").unwrap();
    let function = arena.statement_list(root).unwrap()[1];
    let function_scope = scopes.scope_of_node(function).unwrap();
    let inner_block = scopes.scope(function_scope).unwrap().children[0];

    assert!(scopes.binding_identifier_equals(ScopeTree::ROOT, "x", outer));
    assert!(!scopes.binding_identifier_equals(inner_block, "x", outer));
    assert_eq!(
        scopes.get_binding(inner_block, "x"),
        scopes.own_binding(function_scope, "x")
    );
    assert_eq!(scopes.get_binding(inner_block, "missing"), None);
}

#[test]
fn test_remove_and_set_own_binding() {
    let (_, _, mut scopes) = bind("let a;");
    let a = scopes.remove_own_binding(ScopeTree::ROOT, "a").unwrap();
    assert!(!scopes.has_name("a"));
    assert!(scopes.set_own_binding(ScopeTree::ROOT, "b", a));
    assert_eq!(scopes.binding_name(a), Some("b"));
    assert!(scopes.has_name("b"));
    assert!(!scopes.set_own_binding(ScopeId(99), "c", a));
}

#[test]
fn test_references_include_free_names_and_labels() {
    let (_, _, scopes) = bind("outer: for (;;) { use(free); break outer; }");
    assert!(scopes.has_reference("free"));
    assert!(scopes.has_reference("outer"));
    assert!(!scopes.has_name("free"));
}

#[test]
fn test_kinds_serialize_lowercase() {
    let json = serde_json::to_string(&(ScopeKind::Catch, BindingKind::Hoisted)).unwrap();
    assert_eq!(json, r#"["catch","hoisted"]"#);
}
