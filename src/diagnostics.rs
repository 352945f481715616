//! Error reporting seam shared by the lexer and the parser.
//!
//! The front end never prints or aborts on its own. Every lexical or
//! syntax error is handed to a [`Reporter`] supplied by the caller.

use crate::Error;

/// Receives every error found while scanning and parsing.
pub trait Reporter {
    fn report(&mut self, error: &Error);
}

/// Any `FnMut(message, line, column)` closure is a reporter.
impl<F> Reporter for F
where
    F: FnMut(&str, usize, usize),
{
    fn report(&mut self, error: &Error) {
        let coord = error.coord();
        self(&error.message(), coord.line, coord.column);
    }
}

/// Reporter that keeps every error, in the order reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.errors))]
pub struct Diagnostics {
    errors: Vec<Error>,
}

fn render(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Lexical errors only.
    pub fn lexical(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter().filter(|e| e.is_lexical())
    }

    /// Syntax errors only.
    pub fn syntax(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter().filter(|e| !e.is_lexical())
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: &Error) {
        self.errors.push(error.clone());
    }
}

/// Reporter that prints each error to stderr as it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl StderrReporter {
    /// The line printed for `error`.
    #[must_use]
    pub fn line(error: &Error) -> String {
        let label = if error.is_lexical() {
            "Lexical error"
        } else {
            "Syntax error"
        };
        let coord = error.coord();
        format!(
            "{label}: {} at {}:{}",
            error.message(),
            coord.line,
            coord.column
        )
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, error: &Error) {
        eprintln!("{}", Self::line(error));
    }
}
