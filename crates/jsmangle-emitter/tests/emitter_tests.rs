use super::*;
use jsmangle_parser::{parse_module, parse_script};

fn print(source: &str) -> String {
    let (arena, root) = parse_module(source).expect("parse should succeed");
    Printer::emit_to_string(&arena, root)
}

#[test]
fn test_print_declarations() {
    assert_eq!(print("let a = 1, b;"), "let a = 1, b;");
    assert_eq!(print("function f(x, y = 2, ...rest) { return x; }"), "function f(x, y = 2, ...rest) { return x; }");
    assert_eq!(print("class A extends B { static m() {} get v() { return 1; } }"), "class A extends B { static m() {} get v() { return 1; } }");
    assert_eq!(print("class E {}"), "class E {}");
}

#[test]
fn test_print_separates_top_level_statements_with_newlines() {
    assert_eq!(print("a;b;\n\nc"), "a;\nb;\nc;");
}

#[test]
fn test_print_blocks_on_one_line() {
    assert_eq!(
        print("function f(x) { L: for (;;) { if (x) break L; } return x; }"),
        "function f(x) { L: for (;;) { if (x) break L; } return x; }"
    );
    assert_eq!(print("{}"), "{}");
}

#[test]
fn test_print_control_flow() {
    assert_eq!(
        print("for (let i = 0; i < n; i++) { continue; }"),
        "for (let i = 0; i < n; i++) { continue; }"
    );
    assert_eq!(print("for (const k in o) f(k);"), "for (const k in o) f(k);");
    assert_eq!(print("for (x of xs) {}"), "for (x of xs) {}");
    assert_eq!(print("while (a) b(); do { c(); } while (d);"), "while (a) b();\ndo { c(); } while (d);");
    assert_eq!(print("if (a) b(); else { c(); }"), "if (a) b(); else { c(); }");
    assert_eq!(
        print("try { a(); } catch (e) { throw e; } finally { b(); }"),
        "try { a(); } catch (e) { throw e; } finally { b(); }"
    );
    assert_eq!(print("try {} catch {}"), "try {} catch {}");
}

#[test]
fn test_print_modules() {
    assert_eq!(
        print("import d, { a as b, c } from \"m\";"),
        "import d, { a as b, c } from \"m\";"
    );
    assert_eq!(print("import * as ns from 'm';"), "import * as ns from 'm';");
    assert_eq!(print("import 'side';"), "import 'side';");
    assert_eq!(print("export { a as b, c };"), "export { a as b, c };");
    assert_eq!(print("export { x } from \"m\";"), "export { x } from \"m\";");
    assert_eq!(print("export const a = 1;"), "export const a = 1;");
    assert_eq!(print("export default function () {}"), "export default function () {}");
    assert_eq!(print("export default a + b;"), "export default a + b;");
    assert_eq!(print("export {};"), "export {};");
}

#[test]
fn test_print_expressions() {
    assert_eq!(print("a = b ? c : d, e;"), "a = b ? c : d, e;");
    assert_eq!(print("x = (a + b) * c;"), "x = (a + b) * c;");
    assert_eq!(print("new Foo(1).bar?.baz[0]?.(q);"), "new Foo(1).bar?.baz[0]?.(q);");
    assert_eq!(print("typeof a; void 0; !b; - -c; -(-d);"), "typeof a;\nvoid 0;\n!b;\n- -c;\n-(-d);");
    assert_eq!(print("i++; --j;"), "i++;\n--j;");
    assert_eq!(print("f = (a, b) => a; g = x => { return x; };"), "f = (a, b) => a;\ng = (x) => { return x; };");
    assert_eq!(print("h = function named() {};"), "h = function named() {};");
    assert_eq!(print("k = class {};"), "k = class {};");
    assert_eq!(print("t = this; n = null; y = true;"), "t = this;\nn = null;\ny = true;");
}

#[test]
fn test_print_literals_keep_raw_text() {
    assert_eq!(print("x = ['a', \"b\", 0x1F, , ...r];"), "x = ['a', \"b\", 0x1F,, ...r];");
    assert_eq!(print("x = [, ];"), "x = [,];");
}

#[test]
fn test_print_object_literals() {
    assert_eq!(
        print("o = { a, 'b': 1, [c]: 2, m(x) {}, get g() { return 1; }, set s(v) {}, ...r };"),
        "o = { a, 'b': 1, [c]: 2, m(x) {}, get g() { return 1; }, set s(v) {}, ...r };"
    );
    assert_eq!(print("o = {};"), "o = {};");
}

#[test]
fn test_print_patterns() {
    assert_eq!(
        print("const { a, b: [c = 1, ...d], e = 2 } = obj;"),
        "const { a, b: [c = 1, ...d], e = 2 } = obj;"
    );
    assert_eq!(print("({ a, b } = o);"), "({ a, b } = o);");
    assert_eq!(print("[x, , y] = list;"), "[x,, y] = list;");
}

#[test]
fn test_print_shorthand_expands_after_rename() {
    let (mut arena, root) = parse_module("const { a } = o;\nuse({ a });").unwrap();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        if arena.identifier_name(index) == Some("a") {
            arena.set_identifier_name(index, "a$1");
        }
        stack.extend(arena.children(index));
    }
    assert_eq!(
        Printer::emit_to_string(&arena, root),
        "const { a: a$1 } = o;\nuse({ a: a$1 });"
    );
}

#[test]
fn test_print_script() {
    let (arena, root) = parse_script("var x = 1").unwrap();
    assert_eq!(Printer::emit_to_string(&arena, root), "var x = 1;");
}
