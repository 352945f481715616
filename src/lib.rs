//! Front end for the uCyan teaching language: lexer, parser, and a
//! typed syntax tree with a generic visitor and printer.
//!
//! # Quick start
//!
//! ## Parse and dump a program
//!
//! ```
//! use ucyan::{parse_str, show, ShowOptions};
//!
//! let program = parse_str("var x = 1;\nprint x;\n").unwrap();
//! let dump = show(&program, &ShowOptions::default());
//! assert_eq!(
//!     dump,
//!     "Program:\n    VarDefinition: x\n        Literal: int, 1\n    PrintStatement:\n        Location: x\n"
//! );
//! ```
//!
//! ## Collect diagnostics
//!
//! ```
//! use ucyan::{parse, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! assert!(parse("1 @ 2;", &mut diagnostics).is_none());
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics.errors()[0].coord().column, 3);
//! ```
//!
//! ## Build a program and render it as source
//!
//! ```
//! use ucyan::{Expression, Program, Statement, format};
//!
//! let program = Program::new()
//!     .statement(Statement::var("x", None, Some(Expression::int("1"))))
//!     .statement(Statement::print(Expression::location("x")));
//! assert_eq!(format(&program), "var x = 1;\nprint x;\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod attrs;
pub mod builder;
pub mod diagnostics;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;
pub mod visitor;

pub use ast::{
    AssignmentStatement, BinaryOp, BreakStatement, ConstDefinition, ContinueStatement, Expression,
    ExpressionAsStatement, IfStatement, Literal, LiteralKind, Location, Node, PrintStatement,
    Program, Role, Statement, Type, UnaryOp, VarDefinition, WhileStatement,
};
pub use attrs::{AttrError, Attributes};
pub use diagnostics::{Diagnostics, Reporter, StderrReporter};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, Lexer, scan, tokenize};
pub use parser::{Assoc, ParseError, ParseErrorKind, parse};
pub use printer::{ShowOptions, show, write_show};
pub use token::{Coord, Token, TokenKind};
pub use visitor::{Visitor, preorder};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Where the error was found.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        match self {
            Self::Lex(e) => e.coord,
            Self::Parse(e) => e.coord,
        }
    }

    /// The message without its position.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex(e) => e.kind.to_string(),
            Self::Parse(e) => e.kind.to_string(),
        }
    }

    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self, Self::Lex(_))
    }
}

/// Parse a uCyan source string, collecting every diagnostic.
pub fn parse_str(input: &str) -> Result<Program, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    parse(input, &mut diagnostics).ok_or(diagnostics)
}
