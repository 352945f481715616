#![allow(dead_code)]

use ucyan::{Diagnostics, Program, ShowOptions, format, parse, parse_str, show};

pub fn parse_ok(input: &str) -> Program {
    parse_str(input).unwrap_or_else(|e| panic!("parse failed for {input:?}:\n{e}"))
}

pub fn parse_err(input: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let program = parse(input, &mut diagnostics);
    assert!(program.is_none(), "expected {input:?} to be rejected");
    assert!(!diagnostics.is_empty(), "rejected without a diagnostic");
    diagnostics
}

/// Tree dump with roles and attribute names but no coordinates, so
/// parsed and hand-built trees can be compared.
pub fn shape(program: &Program) -> String {
    show(program, &ShowOptions::new().attr_names(true).node_names(true))
}

/// Parse then format should reproduce canonical input verbatim.
pub fn roundtrip(input: &str) {
    let program = parse_ok(input);
    let output = format(&program);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Helper: format an AST, parse it back, assert structural equality.
pub fn assert_ast_roundtrip(original: &Program) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });

    assert_eq!(
        shape(original),
        shape(&parsed),
        "tree mismatch\n--- formatted ---\n{formatted}"
    );
}
