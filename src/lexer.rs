use std::fmt;
use std::fmt::Write as _;
use std::iter::FusedIterator;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::{Coord, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    IllegalCharacter(char),
    /// `/*` with no closing `*/`.
    UnterminatedComment,
    /// Opening `'` with no closing quote on the same line.
    UnterminatedChar,
    /// Quoted span that is not exactly one character or escape.
    MalformedChar(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalCharacter(ch) => {
                write!(f, "Illegal character {ch:?}")
            }
            Self::UnterminatedComment => {
                write!(f, "Unterminated comment")
            }
            Self::UnterminatedChar => {
                write!(f, "Unterminated character constant")
            }
            Self::MalformedChar(text) => {
                write!(f, "Malformed character constant {text}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", coord.line, coord.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub coord: Coord,
}

/// What to do with the text a rule matched.
#[derive(Debug, Clone, Copy)]
enum Action {
    Emit(TokenKind),
    /// Identifier, reclassified through the keyword table.
    Identifier,
    /// Whitespace, newlines and comments.
    Skip,
    UnterminatedComment,
    UnterminatedChar,
    MalformedChar,
}

/// Lexical rules in declaration order. The longest match wins; ties
/// go to the rule declared first.
const RULES: &[(&str, Action)] = &[
    (r"[ \t\r]+", Action::Skip),
    (r"\n+", Action::Skip),
    (r"//[^\n]*", Action::Skip),
    (r"/\*(?s:.*?)\*/", Action::Skip),
    (r"/\*", Action::UnterminatedComment),
    (r"[0-9]+\.[0-9]+", Action::Emit(TokenKind::FloatConst)),
    (r"[0-9]+", Action::Emit(TokenKind::IntConst)),
    (r"'(?:[^'\\\n]|\\.)'", Action::Emit(TokenKind::CharConst)),
    (r"'[^'\n]*'", Action::MalformedChar),
    (r"'", Action::UnterminatedChar),
    (r"[A-Za-z_][A-Za-z0-9_]*", Action::Identifier),
    (r"==", Action::Emit(TokenKind::Eq)),
    (r"!=", Action::Emit(TokenKind::Ne)),
    (r"<=", Action::Emit(TokenKind::Le)),
    (r">=", Action::Emit(TokenKind::Ge)),
    (r"\|\|", Action::Emit(TokenKind::Or)),
    (r"&&", Action::Emit(TokenKind::And)),
    (r"!", Action::Emit(TokenKind::Not)),
    (r"=", Action::Emit(TokenKind::Equals)),
    (r";", Action::Emit(TokenKind::Semi)),
    (r"<", Action::Emit(TokenKind::Lt)),
    (r">", Action::Emit(TokenKind::Gt)),
    (r"\{", Action::Emit(TokenKind::LBrace)),
    (r"\}", Action::Emit(TokenKind::RBrace)),
    (r"\*", Action::Emit(TokenKind::Times)),
    (r"\+", Action::Emit(TokenKind::Plus)),
    (r"-", Action::Emit(TokenKind::Minus)),
    (r"/", Action::Emit(TokenKind::Divide)),
    (r"\(", Action::Emit(TokenKind::LParen)),
    (r"\)", Action::Emit(TokenKind::RParen)),
];

/// Rules compiled once, each anchored at the current position.
static COMPILED_RULES: Lazy<Vec<(Regex, Action)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|(pattern, action)| {
            let anchored = format!(r"\A(?:{pattern})");
            let regex = Regex::new(&anchored).expect("lexer rule is a valid regex");
            (regex, *action)
        })
        .collect()
});

/// Tokenize a uCyan source string.
///
/// The returned lexer is a lazy iterator: tokens are produced as they
/// are pulled. Lexical errors are yielded in-stream and scanning
/// resumes after the offending text, so one pass can surface several
/// errors. The last item is always a single `Eof` token.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Render every token (and lexical error) of `input`, one per line.
#[must_use]
pub fn scan(input: &str) -> String {
    let mut out = String::new();
    for item in tokenize(input) {
        match item {
            Ok(token) => {
                let _ = writeln!(out, "{token}");
            }
            Err(err) => {
                let _ = writeln!(out, "error: {} @ {}", err.kind, err.coord);
            }
        }
    }
    out
}

/// Scanner state for one compilation unit.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    /// Column of `pos`, counted in characters.
    column: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        let start = if source.starts_with('\u{FEFF}') {
            '\u{FEFF}'.len_utf8()
        } else {
            0
        };
        Self {
            source,
            pos: start,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    const fn coord(&self) -> Coord {
        Coord::new(self.line, self.column)
    }

    /// Advance past `len` bytes, keeping line and column in step.
    fn consume(&mut self, len: usize) -> &'src str {
        let source = self.source;
        let text = &source[self.pos..self.pos + len];
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len;
        text
    }

    fn longest_match(&self) -> Option<(usize, Action)> {
        let rest = &self.source[self.pos..];
        let mut best: Option<(usize, Action)> = None;
        for (regex, action) in COMPILED_RULES.iter() {
            let Some(found) = regex.find(rest) else {
                continue;
            };
            let len = found.end();
            if len > 0 && best.is_none_or(|(longest, _)| len > longest) {
                best = Some((len, *action));
            }
        }
        best
    }

    fn rest_of_line(&self) -> usize {
        let rest = &self.source[self.pos..];
        rest.find('\n').unwrap_or(rest.len())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let coord = self.coord();
            if self.pos >= self.source.len() {
                self.finished = true;
                return Some(Ok(Token {
                    kind: TokenKind::Eof,
                    lexeme: String::new(),
                    coord,
                }));
            }

            let Some((len, action)) = self.longest_match() else {
                let ch = self.source[self.pos..].chars().next()?;
                self.consume(ch.len_utf8());
                return Some(Err(LexError {
                    kind: LexErrorKind::IllegalCharacter(ch),
                    coord,
                }));
            };

            let text = self.consume(len);
            let kind = match action {
                Action::Skip => continue,
                Action::Emit(kind) => kind,
                Action::Identifier => TokenKind::keyword(text).unwrap_or(TokenKind::Id),
                Action::UnterminatedComment => {
                    // the comment swallows everything up to end of input
                    let rest = self.source.len() - self.pos;
                    self.consume(rest);
                    return Some(Err(LexError {
                        kind: LexErrorKind::UnterminatedComment,
                        coord,
                    }));
                }
                Action::UnterminatedChar => {
                    let rest = self.rest_of_line();
                    self.consume(rest);
                    return Some(Err(LexError {
                        kind: LexErrorKind::UnterminatedChar,
                        coord,
                    }));
                }
                Action::MalformedChar => {
                    return Some(Err(LexError {
                        kind: LexErrorKind::MalformedChar(text.to_string()),
                        coord,
                    }));
                }
            };

            return Some(Ok(Token {
                kind,
                lexeme: text.to_string(),
                coord,
            }));
        }
    }
}

impl FusedIterator for Lexer<'_> {}
