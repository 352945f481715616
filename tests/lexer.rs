//! Scanner behaviour through the public API.

use ucyan::{Coord, LexError, LexErrorKind, Token, TokenKind, scan, tokenize};

fn tokens(input: &str) -> Vec<Token> {
    tokenize(input)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("tokenize failed: {e}"))
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|t| t.kind).collect()
}

fn errors(input: &str) -> Vec<LexError> {
    tokenize(input).filter_map(Result::err).collect()
}

// -----------------------------------------------------------
// Token classes
// -----------------------------------------------------------

#[test]
fn every_keyword() {
    assert_eq!(
        kinds("print if else var while true false let break continue"),
        vec![
            TokenKind::Print,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Var,
            TokenKind::While,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Let,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_lookalikes_are_identifiers() {
    assert_eq!(
        kinds("variable iff _print Print"),
        vec![
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Eof
        ]
    );
}

#[test]
fn every_operator() {
    assert_eq!(
        kinds("== != ! || && = ; < <= > >= { } * + - / ( )"),
        vec![
            TokenKind::Eq,
            TokenKind::Ne,
            TokenKind::Not,
            TokenKind::Or,
            TokenKind::And,
            TokenKind::Equals,
            TokenKind::Semi,
            TokenKind::Lt,
            TokenKind::Le,
            TokenKind::Gt,
            TokenKind::Ge,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Times,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Divide,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn operators_without_spaces() {
    assert_eq!(
        kinds("a<=b==c"),
        vec![
            TokenKind::Id,
            TokenKind::Le,
            TokenKind::Id,
            TokenKind::Eq,
            TokenKind::Id,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("!!x"),
        vec![TokenKind::Not, TokenKind::Not, TokenKind::Id, TokenKind::Eof]
    );
}

#[test]
fn float_needs_digits_on_both_sides() {
    let toks = tokens("1.5 7");
    assert_eq!(toks[0].kind, TokenKind::FloatConst);
    assert_eq!(toks[1].kind, TokenKind::IntConst);
    assert_eq!(errors("1."), vec![LexError {
        kind: LexErrorKind::IllegalCharacter('.'),
        coord: Coord::new(1, 2),
    }]);
}

#[test]
fn escaped_quote_char_constant() {
    let toks = tokens(r"'\''");
    assert_eq!(toks[0].kind, TokenKind::CharConst);
    assert_eq!(toks[0].lexeme, r"'\''");
}

// -----------------------------------------------------------
// Positions
// -----------------------------------------------------------

#[test]
fn columns_restart_after_newline() {
    let toks = tokens("var x = 1;\n  print x;");
    let print = toks.iter().find(|t| t.kind == TokenKind::Print).unwrap();
    assert_eq!(print.coord, Coord::new(2, 3));
}

#[test]
fn carriage_returns_are_whitespace() {
    let toks = tokens("x\r\ny");
    assert_eq!(toks[1].lexeme, "y");
    assert_eq!(toks[1].coord, Coord::new(2, 1));
}

#[test]
fn eof_sits_past_last_character() {
    let toks = tokens("ab\n");
    let eof = toks.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.coord, Coord::new(2, 1));
    assert_eq!(tokens("ab").last().unwrap().coord, Coord::new(1, 3));
}

#[test]
fn column_counts_characters_not_bytes() {
    let items: Vec<_> = tokenize("é x").collect();
    assert!(items[0].is_err());
    let x = items[1].clone().unwrap();
    assert_eq!(x.coord, Coord::new(1, 3));
}

// -----------------------------------------------------------
// Error recovery
// -----------------------------------------------------------

#[test]
fn several_errors_in_one_pass() {
    let found = errors("@ x # 'ab' y");
    let messages: Vec<_> = found.iter().map(|e| e.kind.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Illegal character '@'",
            "Illegal character '#'",
            "Malformed character constant 'ab'",
        ]
    );
    assert_eq!(found[2].coord, Coord::new(1, 7));
}

#[test]
fn scanning_continues_after_unterminated_char() {
    let items: Vec<_> = tokenize("x = 'a\ny;").collect();
    let good: Vec<_> = items
        .iter()
        .filter_map(|i| i.as_ref().ok())
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(good, vec!["x", "=", "y", ";", ""]);
}

#[test]
fn error_display_includes_position() {
    let err = errors("\n  /* open").remove(0);
    assert_eq!(
        err.to_string(),
        "Unterminated comment at line 2, column 3"
    );
}

// -----------------------------------------------------------
// Dump
// -----------------------------------------------------------

#[test]
fn scan_renders_errors_inline() {
    assert_eq!(
        scan("print $;"),
        "PRINT 'print' @ 1:1\nerror: Illegal character '$' @ 1:7\nSEMI ';' @ 1:8\nEOF '' @ 1:9\n"
    );
}
