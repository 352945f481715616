use std::fmt;

/// Source coordinate: 1-based line and column.
///
/// `Coord::UNKNOWN` (0:0) marks nodes that were built programmatically
/// and never came from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub line: usize,
    pub column: usize,
}

impl Coord {
    pub const UNKNOWN: Self = Self { line: 0, column: 0 };

    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier that is not a keyword.
    Id,
    IntConst,
    FloatConst,
    /// Quoted character constant, quotes included in the lexeme.
    CharConst,

    // Keywords
    Print,
    If,
    Else,
    Var,
    While,
    True,
    False,
    Let,
    Break,
    Continue,

    // Operators and punctuation
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `!`
    Not,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `=`
    Equals,
    /// `;`
    Semi,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `*`
    Times,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `/`
    Divide,
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of input.
    Eof,
}

/// Reserved words, looked up right after the identifier rule matches.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("print", TokenKind::Print),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("let", TokenKind::Let),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
];

impl TokenKind {
    /// Keyword tag for an identifier lexeme, if it is reserved.
    #[must_use]
    pub fn keyword(lexeme: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lexeme)
            .map(|(_, kind)| *kind)
    }

    /// Operator tag for an operator lexeme such as `"<="`.
    #[must_use]
    pub fn operator(lexeme: &str) -> Option<Self> {
        let kind = match lexeme {
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "!" => Self::Not,
            "||" => Self::Or,
            "&&" => Self::And,
            "=" => Self::Equals,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "*" => Self::Times,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "/" => Self::Divide,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether `word` is a reserved keyword.
    #[must_use]
    pub fn is_keyword(word: &str) -> bool {
        Self::keyword(word).is_some()
    }

    /// Stable upper-case tag name used in token dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::IntConst => "INT_CONST",
            Self::FloatConst => "FLOAT_CONST",
            Self::CharConst => "CHAR_CONST",
            Self::Print => "PRINT",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Var => "VAR",
            Self::While => "WHILE",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Let => "LET",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::And => "AND",
            Self::Equals => "EQUALS",
            Self::Semi => "SEMI",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Times => "TIMES",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Divide => "DIVIDE",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Eof => "EOF",
        }
    }

    /// Whether this token can begin a statement keyword form.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::Print
                | Self::If
                | Self::Var
                | Self::Let
                | Self::While
                | Self::Break
                | Self::Continue
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, matched text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub coord: Coord,
}

impl Token {
    /// Human-facing rendering of the token for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            self.lexeme.clone()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' @ {}", self.kind, self.lexeme, self.coord)
    }
}
