use std::fmt;

use crate::Error;
use crate::ast::{
    AssignmentStatement, BinaryOp, BreakStatement, ConstDefinition, ContinueStatement, Expression,
    ExpressionAsStatement, IfStatement, Literal, LiteralKind, Location, PrintStatement, Program,
    Statement, Type, UnaryOp, VarDefinition, WhileStatement,
};
use crate::diagnostics::Reporter;
use crate::lexer::{Lexer, tokenize};
use crate::token::{Coord, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required, something else was found.
    Expected {
        expected: &'static str,
        found: String,
    },
    /// Input ended while a rule was still open.
    UnexpectedEof { expected: &'static str },
    /// Token that cannot start or continue any rule here.
    UnexpectedToken(String),
    /// `=` after something other than a plain identifier.
    InvalidAssignmentTarget,
    /// Blocks, parentheses, prefix operators or operator chains nested
    /// deeper than `MAX_NESTING`.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, got '{found}'")
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::UnexpectedToken(found) => {
                write!(f, "syntax error near the symbol '{found}'")
            }
            Self::InvalidAssignmentTarget => {
                write!(f, "left-hand side of '=' must be a location")
            }
            Self::NestingTooDeep => {
                write!(f, "nesting exceeds {MAX_NESTING} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", coord.line, coord.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub coord: Coord,
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Precedence table, lowest to highest. The row index is the binding
/// level.
pub const PRECEDENCE: &[(Assoc, &[TokenKind])] = &[
    (Assoc::Right, &[TokenKind::Equals]),
    (
        Assoc::Left,
        &[TokenKind::Or, TokenKind::And, TokenKind::Eq, TokenKind::Ne],
    ),
    (
        Assoc::Left,
        &[TokenKind::Lt, TokenKind::Gt, TokenKind::Le, TokenKind::Ge],
    ),
    (Assoc::Left, &[TokenKind::Plus, TokenKind::Minus]),
    (Assoc::Left, &[TokenKind::Times, TokenKind::Divide]),
    (Assoc::Right, &[TokenKind::Not]),
    (Assoc::Right, &[TokenKind::Else]),
];

const ASSIGNMENT_LEVEL: usize = 0;

/// Binding level of prefix operators (`!`, unary `-` and `+`).
pub const UNARY_LEVEL: usize = 5;

/// Level of `else`. Right associativity makes a trailing `else` bind to
/// the innermost open `if`.
pub const ELSE_LEVEL: usize = 6;

/// Deepest syntactic nesting accepted. A level is a block, a
/// parenthesized expression, a prefix operator or one link of a binary
/// operator chain; this also bounds the height of every parsed tree.
pub const MAX_NESTING: usize = 256;

fn precedence_of(kind: TokenKind) -> Option<(usize, Assoc)> {
    PRECEDENCE
        .iter()
        .position(|(_, kinds)| kinds.contains(&kind))
        .map(|level| (level, PRECEDENCE[level].0))
}

/// Level and associativity of `kind` used as an infix expression
/// operator. `=` and `!` are not infix expression operators.
#[must_use]
pub fn infix_precedence(kind: TokenKind) -> Option<(usize, Assoc)> {
    precedence_of(kind).filter(|(level, _)| *level > ASSIGNMENT_LEVEL && *level < UNARY_LEVEL)
}

const fn is_prefix_operator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Not | TokenKind::Minus | TokenKind::Plus)
}

/// Parse uCyan source into a `Program`.
///
/// Lexical and syntax errors go to `reporter` as they are found. The
/// parser recovers at statement boundaries so a single call can report
/// several errors. If anything was reported, no program is returned.
pub fn parse<R: Reporter + ?Sized>(input: &str, reporter: &mut R) -> Option<Program> {
    Parser::new(input, reporter).parse_program()
}

struct Parser<'src, 'r, R: Reporter + ?Sized> {
    lexer: Lexer<'src>,
    /// One token of lookahead.
    current: Token,
    reporter: &'r mut R,
    /// Tokens consumed so far; used to guarantee progress on errors.
    consumed: usize,
    errors: usize,
    /// A lexical error was reported inside the current statement.
    lex_error_pending: bool,
    /// Current syntactic nesting, bounded by `MAX_NESTING`.
    depth: usize,
}

impl<'src, 'r, R: Reporter + ?Sized> Parser<'src, 'r, R> {
    fn new(input: &'src str, reporter: &'r mut R) -> Self {
        let mut parser = Self {
            lexer: tokenize(input),
            current: Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                coord: Coord::new(1, 1),
            },
            reporter,
            consumed: 0,
            errors: 0,
            lex_error_pending: false,
            depth: 0,
        };
        parser.current = parser.pull();
        parser
    }

    fn parse_program(mut self) -> Option<Program> {
        let coord = self.current.coord;
        let statements = self.parse_statements(TokenKind::Eof);
        if self.errors > 0 {
            return None;
        }
        Some(Program { statements, coord })
    }

    // -- token plumbing --

    /// Pull the next token from the scanner, forwarding lexical errors.
    fn pull(&mut self) -> Token {
        loop {
            match self.lexer.next() {
                Some(Ok(token)) => return token,
                Some(Err(err)) => {
                    self.lex_error_pending = true;
                    self.emit(&Error::Lex(err));
                }
                None => {
                    return Token {
                        kind: TokenKind::Eof,
                        lexeme: String::new(),
                        coord: self.current.coord,
                    };
                }
            }
        }
    }

    /// Consume the lookahead token and return it. At end of input the
    /// `Eof` token is returned again without advancing.
    fn advance(&mut self) -> Token {
        if self.current.kind == TokenKind::Eof {
            return self.current.clone();
        }
        let next = self.pull();
        self.consumed += 1;
        std::mem::replace(&mut self.current, next)
    }

    const fn peek(&self) -> TokenKind {
        self.current.kind
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn error_here(&self, expected: &'static str) -> ParseError {
        let kind = if self.check(TokenKind::Eof) {
            ParseErrorKind::UnexpectedEof { expected }
        } else {
            ParseErrorKind::Expected {
                expected,
                found: self.current.lexeme.clone(),
            }
        };
        ParseError {
            kind,
            coord: self.current.coord,
        }
    }

    fn emit(&mut self, error: &Error) {
        self.errors += 1;
        self.reporter.report(error);
    }

    /// Report a syntax error unless it follows a lexical error in the
    /// same statement, in which case it is almost always a cascade.
    fn syntax_error(&mut self, err: ParseError) {
        if self.lex_error_pending {
            return;
        }
        self.emit(&Error::Parse(err));
    }

    /// Go one nesting level deeper, failing past `MAX_NESTING`.
    fn deepen(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep,
                coord: self.current.coord,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Run `rule` one nesting level deeper.
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.deepen()?;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Panic-mode recovery: discard tokens up to a statement boundary.
    fn synchronize(&mut self, closing: TokenKind) {
        loop {
            match self.peek() {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::Eof => return,
                TokenKind::RBrace if closing == TokenKind::RBrace => return,
                kind if kind.starts_statement() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // -- statements --

    /// `statement*` up to (not including) `closing` or end of input.
    fn parse_statements(&mut self, closing: TokenKind) -> Vec<Statement> {
        let mut statements = Vec::new();
        while !self.check(closing) && !self.check(TokenKind::Eof) {
            let start = self.consumed;
            self.lex_error_pending = false;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.syntax_error(err);
                    if self.consumed == start {
                        self.advance();
                    }
                    self.synchronize(closing);
                }
            }
        }
        statements
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek() {
            TokenKind::Print => self.parse_print(),
            TokenKind::Var => self.parse_var_definition(),
            TokenKind::Let => self.parse_const_definition(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Break => {
                let keyword = self.advance();
                self.expect(TokenKind::Semi, "';'")?;
                Ok(Statement::Break(BreakStatement {
                    coord: keyword.coord,
                }))
            }
            TokenKind::Continue => {
                let keyword = self.advance();
                self.expect(TokenKind::Semi, "';'")?;
                Ok(Statement::Continue(ContinueStatement {
                    coord: keyword.coord,
                }))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_print(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        Ok(Statement::Print(PrintStatement {
            expression,
            coord: keyword.coord,
        }))
    }

    /// `[type] ID` after `var` / `let`.
    fn parse_declared_name(&mut self) -> Result<(String, Option<Type>), ParseError> {
        let first = self.expect(TokenKind::Id, "identifier")?;
        if self.check(TokenKind::Id) {
            let name = self.advance();
            let dtype = Type {
                name: first.lexeme,
                coord: first.coord,
            };
            Ok((name.lexeme, Some(dtype)))
        } else {
            Ok((first.lexeme, None))
        }
    }

    fn parse_var_definition(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let (name, dtype) = self.parse_declared_name()?;
        let expression = if self.check(TokenKind::Equals) {
            self.advance();
            Some(self.parse_expression()?)
        } else if dtype.is_none() {
            // without a type the initializer is mandatory
            return Err(self.error_here("'='"));
        } else {
            None
        };
        self.expect(TokenKind::Semi, "';'")?;
        Ok(Statement::VarDefinition(VarDefinition {
            name,
            dtype,
            expression,
            coord: keyword.coord,
        }))
    }

    fn parse_const_definition(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let (name, dtype) = self.parse_declared_name()?;
        self.expect(TokenKind::Equals, "'='")?;
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        Ok(Statement::ConstDefinition(ConstDefinition {
            name,
            dtype,
            expression: Some(expression),
            coord: keyword.coord,
        }))
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let condition = self.parse_expression()?;
        let then_body = self.parse_block()?;
        let else_body = if self.binds_else() {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            condition,
            then_body,
            else_body,
            coord: keyword.coord,
        }))
    }

    /// Whether a pending `else` belongs to the `if` being parsed. It
    /// always does: the `else` row is right-associative, so it binds to
    /// the innermost open `if`.
    fn binds_else(&self) -> bool {
        self.check(TokenKind::Else)
            && precedence_of(TokenKind::Else) == Some((ELSE_LEVEL, Assoc::Right))
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.advance();
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(Statement::While(WhileStatement {
            condition,
            body,
            coord: keyword.coord,
        }))
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let body = self.nested(|parser| Ok(parser.parse_statements(TokenKind::RBrace)))?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(body)
    }

    /// `expr ;` or, when the expression is a lone identifier followed
    /// by `=`, an assignment.
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let first = self.current.clone();
        let start = self.consumed;
        let expression = self.parse_expression()?;

        if !self.check(TokenKind::Equals) {
            self.expect(TokenKind::Semi, "';'")?;
            return Ok(Statement::Expression(ExpressionAsStatement {
                expression,
                coord: first.coord,
            }));
        }

        let lone_identifier = first.kind == TokenKind::Id && self.consumed - start == 1;
        let location = match expression {
            Expression::Location(location) if lone_identifier => location,
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::InvalidAssignmentTarget,
                    coord: self.current.coord,
                });
            }
        };
        self.advance();
        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';'")?;
        Ok(Statement::Assignment(AssignmentStatement {
            location,
            expression,
            coord: first.coord,
        }))
    }

    // -- expressions --

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(ASSIGNMENT_LEVEL + 1)
            .map(|(expression, _)| expression)
    }

    /// Precedence climbing over the binary rows of `PRECEDENCE`.
    /// Returns the expression and the coordinate of its first token.
    fn parse_binary(&mut self, min_level: usize) -> Result<(Expression, Coord), ParseError> {
        let depth = self.depth;
        let result = self.parse_binary_chain(min_level);
        self.depth = depth;
        result
    }

    /// Each link of the chain deepens the tree by one level.
    fn parse_binary_chain(&mut self, min_level: usize) -> Result<(Expression, Coord), ParseError> {
        let (mut left, start) = self.parse_unary()?;

        while let Some((level, assoc)) = infix_precedence(self.peek()) {
            if level < min_level {
                break;
            }
            self.deepen()?;
            let op = self.advance();
            let next_level = match assoc {
                Assoc::Left => level + 1,
                Assoc::Right => level,
            };
            let (right, _) = self.parse_binary(next_level)?;
            left = Expression::Binary(BinaryOp {
                op: op.lexeme,
                left: Box::new(left),
                right: Box::new(right),
                coord: start,
            });
        }

        Ok((left, start))
    }

    fn parse_unary(&mut self) -> Result<(Expression, Coord), ParseError> {
        if !is_prefix_operator(self.peek()) {
            return self.parse_primary();
        }
        let op = self.advance();
        let (operand, _) = self.nested(Self::parse_unary)?;
        let expression = Expression::Unary(UnaryOp {
            op: op.lexeme,
            expression: Box::new(operand),
            coord: op.coord,
        });
        Ok((expression, op.coord))
    }

    fn parse_primary(&mut self) -> Result<(Expression, Coord), ParseError> {
        let kind = match self.peek() {
            TokenKind::LParen => {
                let open = self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok((inner, open.coord));
            }
            TokenKind::Id => {
                let token = self.advance();
                let location = Location {
                    name: token.lexeme,
                    coord: token.coord,
                };
                return Ok((Expression::Location(location), token.coord));
            }
            TokenKind::IntConst => LiteralKind::Int,
            TokenKind::FloatConst => LiteralKind::Float,
            TokenKind::CharConst => LiteralKind::Char,
            TokenKind::True | TokenKind::False => LiteralKind::Bool,
            TokenKind::Eof => {
                return Err(ParseError {
                    kind: ParseErrorKind::UnexpectedEof {
                        expected: "expression",
                    },
                    coord: self.current.coord,
                });
            }
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::UnexpectedToken(self.current.describe()),
                    coord: self.current.coord,
                });
            }
        };

        let token = self.advance();
        let literal = Literal {
            kind,
            value: token.lexeme,
            coord: token.coord,
        };
        Ok((Expression::Literal(literal), token.coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn parse_ok(input: &str) -> Program {
        let mut diagnostics = Diagnostics::new();
        parse(input, &mut diagnostics)
            .unwrap_or_else(|| panic!("parse failed: {diagnostics}"))
    }

    fn parse_err(input: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let program = parse(input, &mut diagnostics);
        assert!(program.is_none(), "expected failure for {input:?}");
        diagnostics
    }

    fn expression_of(program: &Program) -> &Expression {
        match &program.statements[0] {
            Statement::Expression(s) => &s.expression,
            Statement::Print(s) => &s.expression,
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn precedence_table_levels() {
        assert_eq!(precedence_of(TokenKind::Equals), Some((0, Assoc::Right)));
        assert_eq!(precedence_of(TokenKind::Not), Some((UNARY_LEVEL, Assoc::Right)));
        assert_eq!(infix_precedence(TokenKind::Equals), None);
        assert_eq!(infix_precedence(TokenKind::Not), None);
        assert_eq!(infix_precedence(TokenKind::Times), Some((4, Assoc::Left)));
        assert_eq!(infix_precedence(TokenKind::Or), Some((1, Assoc::Left)));
    }

    #[test]
    fn else_row_is_right_associative() {
        assert_eq!(precedence_of(TokenKind::Else), Some((ELSE_LEVEL, Assoc::Right)));
        assert_eq!(infix_precedence(TokenKind::Else), None);
    }

    #[test]
    fn multiplication_binds_tighter() {
        let program = parse_ok("1 + 2 * 3;");
        let Expression::Binary(add) = expression_of(&program) else {
            panic!("expected binary op");
        };
        assert_eq!(add.op, "+");
        assert!(matches!(add.left.as_ref(), Expression::Literal(l) if l.value == "1"));
        let Expression::Binary(mul) = add.right.as_ref() else {
            panic!("expected nested binary op");
        };
        assert_eq!(mul.op, "*");
    }

    #[test]
    fn left_associative_subtraction() {
        let program = parse_ok("a - b - c;");
        let Expression::Binary(outer) = expression_of(&program) else {
            panic!("expected binary op");
        };
        assert!(matches!(outer.right.as_ref(), Expression::Location(l) if l.name == "c"));
        assert!(matches!(outer.left.as_ref(), Expression::Binary(inner) if inner.op == "-"));
    }

    #[test]
    fn logical_row_is_one_level() {
        // `==` and `&&` share a row, so they associate left to right
        let program = parse_ok("a == b && c;");
        let Expression::Binary(outer) = expression_of(&program) else {
            panic!("expected binary op");
        };
        assert_eq!(outer.op, "&&");
        assert!(matches!(outer.left.as_ref(), Expression::Binary(inner) if inner.op == "=="));
    }

    #[test]
    fn unary_binds_tightest() {
        let program = parse_ok("!a == b;");
        let Expression::Binary(eq) = expression_of(&program) else {
            panic!("expected binary op");
        };
        assert_eq!(eq.op, "==");
        assert!(matches!(eq.left.as_ref(), Expression::Unary(u) if u.op == "!"));
    }

    #[test]
    fn parentheses_override_precedence() {
        let program = parse_ok("(1 + 2) * 3;");
        let Expression::Binary(mul) = expression_of(&program) else {
            panic!("expected binary op");
        };
        assert_eq!(mul.op, "*");
        assert_eq!(mul.coord, Coord::new(1, 1));
        let Expression::Binary(add) = mul.left.as_ref() else {
            panic!("expected nested binary op");
        };
        assert_eq!(add.coord, Coord::new(1, 2));
    }

    #[test]
    fn var_definition_forms() {
        let program = parse_ok("var int x;\nvar y = 2;\nvar float z = 1.5;\n");
        assert_eq!(program.statements.len(), 3);
        let Statement::VarDefinition(first) = &program.statements[0] else {
            panic!("expected var definition");
        };
        assert_eq!(first.name, "x");
        assert_eq!(first.dtype.as_ref().map(|t| t.name.as_str()), Some("int"));
        assert!(first.expression.is_none());
        let Statement::VarDefinition(second) = &program.statements[1] else {
            panic!("expected var definition");
        };
        assert!(second.dtype.is_none());
        assert!(second.expression.is_some());
    }

    #[test]
    fn var_without_type_or_initializer_is_rejected() {
        let diagnostics = parse_err("var x;");
        assert_eq!(diagnostics.len(), 1);
        let Error::Parse(err) = &diagnostics.errors()[0] else {
            panic!("expected syntax error");
        };
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "'='",
                found: ";".to_string()
            }
        );
        assert_eq!(err.coord, Coord::new(1, 6));
    }

    #[test]
    fn let_requires_initializer() {
        parse_err("let int x;");
        let program = parse_ok("let int x = 3;");
        assert!(matches!(
            &program.statements[0],
            Statement::ConstDefinition(c) if c.expression.is_some() && c.dtype.is_some()
        ));
    }

    #[test]
    fn assignment_and_expression_statement() {
        let program = parse_ok("x = x + 1;\nx + 1;\n");
        assert!(matches!(&program.statements[0], Statement::Assignment(a) if a.location.name == "x"));
        assert!(matches!(&program.statements[1], Statement::Expression(_)));
    }

    #[test]
    fn parenthesized_assignment_target_is_rejected() {
        let diagnostics = parse_err("(x) = 1;");
        let Error::Parse(err) = &diagnostics.errors()[0] else {
            panic!("expected syntax error");
        };
        assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
        assert_eq!(err.coord, Coord::new(1, 5));
    }

    #[test]
    fn chained_assignment_is_rejected() {
        parse_err("a = b = c;");
    }

    #[test]
    fn recovery_reports_each_bad_statement() {
        let diagnostics = parse_err("print ;\nvar x = 1;\nprint 2\nprint 3;\n");
        assert_eq!(diagnostics.len(), 2);
        let coords: Vec<_> = diagnostics.errors().iter().map(Error::coord).collect();
        assert_eq!(coords, vec![Coord::new(1, 7), Coord::new(4, 1)]);
    }

    #[test]
    fn stray_close_brace_makes_progress() {
        let diagnostics = parse_err("} print 1;");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn unclosed_block_reports_eof() {
        let diagnostics = parse_err("while x { print 1;");
        let Error::Parse(err) = &diagnostics.errors()[0] else {
            panic!("expected syntax error");
        };
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof { expected: "'}'" });
    }

    #[test]
    fn lexical_error_suppresses_cascade() {
        let diagnostics = parse_err("1 @ 2;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.errors()[0].is_lexical());
    }

    #[test]
    fn empty_program() {
        let program = parse_ok("");
        assert!(program.statements.is_empty());
        assert_eq!(program.coord, Coord::new(1, 1));
    }

    fn nesting_error(input: &str) {
        let diagnostics = parse_err(input);
        assert_eq!(diagnostics.len(), 1);
        let Error::Parse(err) = &diagnostics.errors()[0] else {
            panic!("expected syntax error");
        };
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let depth = 20_000;
        nesting_error(&format!("print {}1{};", "(".repeat(depth), ")".repeat(depth)));
    }

    #[test]
    fn deep_prefix_operators_are_rejected() {
        nesting_error(&format!("{}x;", "!".repeat(20_000)));
    }

    #[test]
    fn long_operator_chain_is_rejected() {
        let terms = vec!["1"; 100_000].join("+");
        nesting_error(&format!("print {terms};"));
    }

    #[test]
    fn deep_blocks_are_rejected() {
        let depth = 5_000;
        let source = format!("{}{}", "while x {".repeat(depth), "}".repeat(depth));
        let diagnostics = parse_err(&source);
        assert!(diagnostics.errors().iter().all(|e| matches!(
            e,
            Error::Parse(ParseError {
                kind: ParseErrorKind::NestingTooDeep | ParseErrorKind::UnexpectedToken(_),
                ..
            })
        )));
    }

    #[test]
    fn nesting_within_limit_parses() {
        let depth = MAX_NESTING - 8;
        let program = parse_ok(&format!("print {}1{};", "(".repeat(depth), ")".repeat(depth)));
        assert!(matches!(expression_of(&program), Expression::Literal(_)));

        let terms = vec!["1"; MAX_NESTING].join("+");
        parse_ok(&format!("print {terms};"));
    }

    #[test]
    fn nesting_resets_between_statements() {
        let depth = MAX_NESTING - 8;
        let nested = format!("print {}1{};\n", "(".repeat(depth), ")".repeat(depth));
        let program = parse_ok(&nested.repeat(3));
        assert_eq!(program.statements.len(), 3);
    }
}
