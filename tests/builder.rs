//! Builder API tests: build ASTs programmatically, format, and verify.

mod common;

use common::{assert_ast_roundtrip, parse_ok, shape};
use ucyan::{Coord, Expression, Node, Program, Statement, format, preorder};

fn counter_loop() -> Program {
    Program::new()
        .statement(Statement::var("i", Some("int"), Some(Expression::int("0"))))
        .statement(Statement::while_loop(
            Expression::binary("<", Expression::location("i"), Expression::int("3")),
            vec![
                Statement::print(Expression::location("i")),
                Statement::assign(
                    "i",
                    Expression::binary("+", Expression::location("i"), Expression::int("1")),
                ),
            ],
        ))
}

#[test]
fn builder_roundtrip_simple() {
    assert_ast_roundtrip(&counter_loop());
}

#[test]
fn builder_formats_expected_source() {
    assert_eq!(
        format(&counter_loop()),
        "var int i = 0;\nwhile i < 3 {\n\tprint i;\n\ti = i + 1;\n}\n"
    );
}

#[test]
fn builder_matches_parsed_tree() {
    let parsed = parse_ok("var int i = 0;\nwhile i < 3 { print i; i = i + 1; }");
    assert_eq!(shape(&parsed), shape(&counter_loop()));
}

#[test]
fn builder_roundtrip_if_chain() {
    let program = Program::new().statement(Statement::if_else(
        Expression::unary("!", Expression::location("ready")),
        vec![Statement::continue_loop()],
        vec![Statement::if_then(
            Expression::binary(
                "||",
                Expression::bool(true),
                Expression::binary("==", Expression::char("'y'"), Expression::location("c")),
            ),
            vec![Statement::break_loop()],
        )],
    ));
    assert_ast_roundtrip(&program);
}

#[test]
fn builder_roundtrip_grouping() {
    // (a - b) - (c - d): only the right operand needs parentheses
    let program = Program::new().statement(Statement::expression(Expression::binary(
        "-",
        Expression::binary("-", Expression::location("a"), Expression::location("b")),
        Expression::binary("-", Expression::location("c"), Expression::location("d")),
    )));
    assert_eq!(format(&program), "a - b - (c - d);\n");
    assert_ast_roundtrip(&program);
}

#[test]
fn builder_roundtrip_constants() {
    let program = Program::new()
        .statement(Statement::constant("pi", Some("float"), Expression::float("3.14")))
        .statement(Statement::constant("nl", None, Expression::char("'\\n'")));
    assert_eq!(format(&program), "let float pi = 3.14;\nlet nl = '\\n';\n");
    assert_ast_roundtrip(&program);
}

#[test]
fn builder_nodes_are_unpositioned() {
    let program = counter_loop();
    assert!(preorder(&program)
        .into_iter()
        .all(|node: Node<'_>| node.coord() == Coord::UNKNOWN));
}

#[test]
fn builder_default() {
    let program = Program::default();
    assert!(program.statements.is_empty());
    assert_eq!(format(&program), "\n");
}
