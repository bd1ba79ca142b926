use crate::ast::*;
use crate::lexer::{Keyword, Result, SyntaxError, Token, TokenKind};

/// Binding powers following R's operator precedence (see `?Syntax`).
/// Left-associative operators bind `(2n, 2n + 1)`, right-associative ones
/// `(2n + 1, 2n)`.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
enum Precedence {
    Lowest = 0,
    Help = 2,
    EqualAssign = 4,
    LeftAssign = 6,
    RightAssign = 8,
    Tilde = 10,
    Or = 12,
    And = 14,
    Not = 16,
    Comparison = 18,
    Term = 20,
    Factor = 22,
    Special = 24,
    Range = 26,
    Unary = 28,
    Power = 30,
    Member = 32,
    Postfix = 34,
}

impl Precedence {
    fn infix(kind: &TokenKind) -> Option<(u8, u8)> {
        let (level, right_assoc) = match kind {
            TokenKind::Question => (Precedence::Help, false),
            TokenKind::EqualAssign => (Precedence::EqualAssign, true),
            TokenKind::LeftAssign | TokenKind::SuperAssign | TokenKind::ColonAssign => {
                (Precedence::LeftAssign, true)
            }
            TokenKind::RightAssign | TokenKind::SuperRightAssign => {
                (Precedence::RightAssign, false)
            }
            TokenKind::Tilde => (Precedence::Tilde, false),
            TokenKind::Pipe | TokenKind::PipePipe => (Precedence::Or, false),
            TokenKind::Ampersand | TokenKind::AmpersandAmpersand => (Precedence::And, false),
            TokenKind::DoubleEqual
            | TokenKind::BangEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => (Precedence::Comparison, false),
            TokenKind::Plus | TokenKind::Minus => (Precedence::Term, false),
            TokenKind::Star | TokenKind::Slash => (Precedence::Factor, false),
            TokenKind::Special | TokenKind::PipeGreater => (Precedence::Special, false),
            TokenKind::Colon => (Precedence::Range, false),
            TokenKind::Caret => (Precedence::Power, true),
            _ => return None,
        };
        let level = level as u8;
        Some(if right_assoc {
            (level + 1, level)
        } else {
            (level, level + 1)
        })
    }
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    previous: usize,
    /// Whether newlines terminate expressions in the innermost bracket context.
    newline_sensitive: Vec<bool>,
}

impl<'a> Parser<'a> {
    /// Argument values and parameter defaults stop before a bare `=`.
    const ARGUMENT_BP: u8 = Precedence::EqualAssign as u8 + 2;

    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            previous: 0,
            newline_sensitive: vec![true],
        }
    }

    pub fn parse(&mut self) -> Result<Module> {
        let mut expressions = Vec::new();

        loop {
            self.skip_separators();
            if self.at(&TokenKind::Eof) {
                break;
            }
            expressions.push(self.parse_expression(Precedence::Lowest as u8)?);
            self.expect_expression_end(&TokenKind::Eof)?;
        }

        Ok(Module::new(expressions))
    }

    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_prefix()?;

        loop {
            let token = self.peek();
            let kind = token.kind.clone();
            if kind == TokenKind::Newline {
                break;
            }

            match kind {
                TokenKind::LParen if Precedence::Postfix as u8 >= min_bp => {
                    self.advance();
                    let arguments = self.parse_arguments(&TokenKind::RParen)?;
                    let start = left.tokens.start;
                    left = self.finish(
                        start,
                        ExprKind::Call(CallExpr {
                            callee: Box::new(left),
                            arguments,
                        }),
                    );
                }
                TokenKind::LBracket | TokenKind::DoubleLBracket
                    if Precedence::Postfix as u8 >= min_bp =>
                {
                    self.advance();
                    let double = kind == TokenKind::DoubleLBracket;
                    let arguments = self.parse_arguments(&TokenKind::RBracket)?;
                    if double {
                        self.expect(&TokenKind::RBracket)?;
                    }
                    let start = left.tokens.start;
                    left = self.finish(
                        start,
                        ExprKind::Index(IndexExpr {
                            target: Box::new(left),
                            arguments,
                            double,
                        }),
                    );
                }
                TokenKind::Dollar | TokenKind::At if Precedence::Member as u8 >= min_bp => {
                    self.advance();
                    self.skip_newlines();
                    let name_token = self.advance().clone();
                    let name = match &name_token.kind {
                        TokenKind::Identifier => name_token.name().to_string(),
                        TokenKind::StringLiteral(value) => value.clone(),
                        TokenKind::Keyword(_) => name_token.lexeme.clone(),
                        _ => return Err(Self::unexpected(&name_token)),
                    };
                    let start = left.tokens.start;
                    left = self.finish(
                        start,
                        ExprKind::Member(MemberExpr {
                            target: Box::new(left),
                            name,
                            slot: kind == TokenKind::At,
                        }),
                    );
                }
                _ => {
                    let Some((left_bp, right_bp)) = Precedence::infix(&kind) else {
                        break;
                    };
                    if left_bp < min_bp {
                        break;
                    }
                    let operator_token = self.advance().clone();
                    self.skip_newlines();
                    let right = self.parse_expression(right_bp)?;
                    let start = left.tokens.start;
                    let node = Self::infix_node(&operator_token, left, right);
                    left = self.finish(start, node);
                }
            }
        }

        Ok(left)
    }

    fn infix_node(operator: &Token, left: Expr, right: Expr) -> ExprKind {
        let left = Box::new(left);
        let right = Box::new(right);

        let assign_operator = match &operator.kind {
            TokenKind::LeftAssign => Some(AssignOperator::Left),
            TokenKind::SuperAssign => Some(AssignOperator::SuperLeft),
            TokenKind::EqualAssign => Some(AssignOperator::Equal),
            TokenKind::RightAssign => Some(AssignOperator::Right),
            TokenKind::SuperRightAssign => Some(AssignOperator::SuperRight),
            _ => None,
        };
        if let Some(assign_operator) = assign_operator {
            return ExprKind::Assign(AssignExpr {
                operator: assign_operator,
                operator_span: Self::span_from_token(operator),
                left,
                right,
            });
        }
        if operator.kind == TokenKind::Tilde {
            return ExprKind::Formula(FormulaExpr {
                left: Some(left),
                right,
            });
        }

        let binary_operator = match &operator.kind {
            TokenKind::Question => BinaryOperator::Help,
            TokenKind::Pipe => BinaryOperator::Or,
            TokenKind::PipePipe => BinaryOperator::OrOr,
            TokenKind::Ampersand => BinaryOperator::And,
            TokenKind::AmpersandAmpersand => BinaryOperator::AndAnd,
            TokenKind::DoubleEqual => BinaryOperator::Equal,
            TokenKind::BangEqual => BinaryOperator::NotEqual,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEqual => BinaryOperator::LessEqual,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Caret => BinaryOperator::Power,
            TokenKind::Colon => BinaryOperator::Range,
            TokenKind::PipeGreater => BinaryOperator::Pipe,
            _ => BinaryOperator::Special(operator.lexeme.clone()),
        };
        ExprKind::Binary(BinaryExpr {
            operator: binary_operator,
            left,
            right,
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let token = self.peek().clone();
        let start = self.current;

        match &token.kind {
            TokenKind::Identifier => {
                self.advance();
                let next = self.tokens[self.current].kind.clone();
                if matches!(next, TokenKind::DoubleColon | TokenKind::TripleColon) {
                    self.advance();
                    let name_token = self.advance().clone();
                    let name = match &name_token.kind {
                        TokenKind::Identifier => name_token.name().to_string(),
                        TokenKind::StringLiteral(value) => value.clone(),
                        _ => return Err(Self::unexpected(&name_token)),
                    };
                    return Ok(self.finish(
                        start,
                        ExprKind::Namespace(NamespaceAccess {
                            package: token.name().to_string(),
                            name,
                            internal: next == TokenKind::TripleColon,
                        }),
                    ));
                }
                Ok(self.finish(start, ExprKind::Identifier(token.name().to_string())))
            }
            TokenKind::IntegerLiteral => {
                self.advance();
                Ok(self.finish(start, ExprKind::Literal(Literal::Integer(token.lexeme))))
            }
            TokenKind::FloatLiteral => {
                self.advance();
                Ok(self.finish(start, ExprKind::Literal(Literal::Float(token.lexeme))))
            }
            TokenKind::ComplexLiteral => {
                self.advance();
                Ok(self.finish(start, ExprKind::Literal(Literal::Complex(token.lexeme))))
            }
            TokenKind::StringLiteral(value) => {
                self.advance();
                Ok(self.finish(start, ExprKind::Literal(Literal::String(value.clone()))))
            }
            TokenKind::Keyword(keyword) => self.parse_keyword(*keyword, start),
            TokenKind::LParen => {
                self.advance();
                self.newline_sensitive.push(false);
                let inner = self.parse_expression(Precedence::Lowest as u8)?;
                self.expect(&TokenKind::RParen)?;
                self.newline_sensitive.pop();
                Ok(self.finish(start, ExprKind::Paren(Box::new(inner))))
            }
            TokenKind::LBrace => self.parse_block(start),
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang | TokenKind::Question => {
                self.advance();
                self.skip_newlines();
                let (operator, bp) = match token.kind {
                    TokenKind::Minus => (UnaryOperator::Negate, Precedence::Unary),
                    TokenKind::Plus => (UnaryOperator::Plus, Precedence::Unary),
                    TokenKind::Bang => (UnaryOperator::Not, Precedence::Not),
                    _ => (UnaryOperator::Help, Precedence::Help),
                };
                let operand = self.parse_expression(bp as u8)?;
                Ok(self.finish(
                    start,
                    ExprKind::Unary(UnaryExpr {
                        operator,
                        operand: Box::new(operand),
                    }),
                ))
            }
            TokenKind::Tilde => {
                self.advance();
                self.skip_newlines();
                let right = self.parse_expression(Precedence::Tilde as u8 + 1)?;
                Ok(self.finish(
                    start,
                    ExprKind::Formula(FormulaExpr {
                        left: None,
                        right: Box::new(right),
                    }),
                ))
            }
            TokenKind::Backslash => {
                self.advance();
                self.parse_function(start)
            }
            _ => Err(Self::unexpected(&token)),
        }
    }

    fn parse_keyword(&mut self, keyword: Keyword, start: usize) -> Result<Expr> {
        let token = self.advance().clone();
        let literal = |literal| Ok(ExprKind::Literal(literal));
        let kind = match keyword {
            Keyword::True => literal(Literal::Logical(true)),
            Keyword::False => literal(Literal::Logical(false)),
            Keyword::Null => literal(Literal::Null),
            Keyword::Na => literal(Literal::Na),
            Keyword::NaInteger => literal(Literal::NaInteger),
            Keyword::NaReal => literal(Literal::NaReal),
            Keyword::NaCharacter => literal(Literal::NaCharacter),
            Keyword::Inf => literal(Literal::Inf),
            Keyword::NaN => literal(Literal::NaN),
            Keyword::Break => Ok(ExprKind::Break),
            Keyword::Next => Ok(ExprKind::Next),
            Keyword::Function => return self.parse_function(start),
            Keyword::If => self.parse_if(),
            Keyword::For => self.parse_for(),
            Keyword::While => self.parse_while(),
            Keyword::Repeat => {
                self.skip_newlines();
                let body = self.parse_expression(Precedence::EqualAssign as u8)?;
                Ok(ExprKind::Repeat(Box::new(body)))
            }
            Keyword::Else | Keyword::In => Err(Self::unexpected(&token)),
        }?;
        Ok(self.finish(start, kind))
    }

    fn parse_block(&mut self, start: usize) -> Result<Expr> {
        self.advance(); // consume '{'
        self.newline_sensitive.push(true);
        let mut expressions = Vec::new();

        loop {
            self.skip_separators();
            if self.at(&TokenKind::RBrace) {
                break;
            }
            expressions.push(self.parse_expression(Precedence::Lowest as u8)?);
            self.expect_expression_end(&TokenKind::RBrace)?;
        }

        self.advance(); // consume '}'
        self.newline_sensitive.pop();
        Ok(self.finish(start, ExprKind::Block(expressions)))
    }

    fn parse_function(&mut self, start: usize) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        self.newline_sensitive.push(false);
        let mut parameters = Vec::new();

        if !self.at(&TokenKind::RParen) {
            loop {
                let name_token = self.advance().clone();
                if name_token.kind != TokenKind::Identifier {
                    return Err(Self::unexpected(&name_token));
                }
                let default = if self.at(&TokenKind::EqualAssign) {
                    self.advance();
                    Some(self.parse_expression(Self::ARGUMENT_BP)?)
                } else {
                    None
                };
                parameters.push(Parameter {
                    name: name_token.name().to_string(),
                    default,
                });
                if self.at(&TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }

        self.expect(&TokenKind::RParen)?;
        self.newline_sensitive.pop();
        self.skip_newlines();
        let body = self.parse_expression(Precedence::EqualAssign as u8)?;
        Ok(self.finish(
            start,
            ExprKind::Function(FunctionExpr {
                parameters,
                body: Box::new(body),
            }),
        ))
    }

    fn parse_condition(&mut self) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        self.newline_sensitive.push(false);
        let condition = self.parse_expression(Precedence::Lowest as u8)?;
        self.expect(&TokenKind::RParen)?;
        self.newline_sensitive.pop();
        self.skip_newlines();
        Ok(condition)
    }

    fn parse_if(&mut self) -> Result<ExprKind> {
        let condition = self.parse_condition()?;
        let consequent = self.parse_expression(Precedence::EqualAssign as u8)?;

        // Inside brackets `else` may start a new line; at top level it may not.
        let nested = self.newline_sensitive.len() > 1;
        let checkpoint = self.current;
        if nested {
            self.skip_newlines();
        }
        let alternative = if self.peek().kind == TokenKind::Keyword(Keyword::Else) {
            self.advance();
            self.skip_newlines();
            Some(Box::new(self.parse_expression(Precedence::EqualAssign as u8)?))
        } else {
            self.current = checkpoint;
            None
        };

        Ok(ExprKind::If(IfExpr {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative,
        }))
    }

    fn parse_for(&mut self) -> Result<ExprKind> {
        self.expect(&TokenKind::LParen)?;
        self.newline_sensitive.push(false);
        let variable = self.advance().clone();
        if variable.kind != TokenKind::Identifier {
            return Err(Self::unexpected(&variable));
        }
        self.expect(&TokenKind::Keyword(Keyword::In))?;
        let sequence = self.parse_expression(Precedence::Lowest as u8)?;
        self.expect(&TokenKind::RParen)?;
        self.newline_sensitive.pop();
        self.skip_newlines();
        let body = self.parse_expression(Precedence::EqualAssign as u8)?;
        Ok(ExprKind::For(ForExpr {
            variable: variable.name().to_string(),
            sequence: Box::new(sequence),
            body: Box::new(body),
        }))
    }

    fn parse_while(&mut self) -> Result<ExprKind> {
        let condition = self.parse_condition()?;
        let body = self.parse_expression(Precedence::EqualAssign as u8)?;
        Ok(ExprKind::While(WhileExpr {
            condition: Box::new(condition),
            body: Box::new(body),
        }))
    }

    /// Parses call or index arguments after the opening bracket, consuming `close`.
    fn parse_arguments(&mut self, close: &TokenKind) -> Result<Vec<Argument>> {
        self.newline_sensitive.push(false);
        let mut arguments = Vec::new();

        if self.at(close) {
            self.advance();
            self.newline_sensitive.pop();
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_argument(close)?);
            let token = self.advance().clone();
            if token.kind == TokenKind::Comma {
                continue;
            }
            if &token.kind == close {
                break;
            }
            return Err(Self::unexpected(&token));
        }

        self.newline_sensitive.pop();
        Ok(arguments)
    }

    fn parse_argument(&mut self, close: &TokenKind) -> Result<Argument> {
        if self.at(&TokenKind::Comma) || self.at(close) {
            return Ok(Argument {
                name: None,
                value: None,
            });
        }

        let token = self.peek().clone();
        let nameable = matches!(
            token.kind,
            TokenKind::Identifier | TokenKind::StringLiteral(_) | TokenKind::Keyword(Keyword::Null)
        );
        if nameable && self.next_significant_is(&TokenKind::EqualAssign) {
            self.advance();
            self.advance(); // consume '='
            let name = match &token.kind {
                TokenKind::StringLiteral(value) => value.clone(),
                _ => token.name().to_string(),
            };
            let value = if self.at(&TokenKind::Comma) || self.at(close) {
                None
            } else {
                Some(self.parse_expression(Self::ARGUMENT_BP)?)
            };
            return Ok(Argument {
                name: Some(name),
                value,
            });
        }

        Ok(Argument {
            name: None,
            value: Some(self.parse_expression(Self::ARGUMENT_BP)?),
        })
    }

    fn expect_expression_end(&mut self, terminator: &TokenKind) -> Result<()> {
        let token = &self.tokens[self.current];
        match &token.kind {
            TokenKind::Newline | TokenKind::Semicolon => Ok(()),
            kind if kind == terminator => Ok(()),
            _ => Err(Self::unexpected(token)),
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token> {
        let token = self.peek();
        if &token.kind == kind {
            Ok(self.advance())
        } else {
            Err(Self::unexpected(token))
        }
    }

    fn at(&mut self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn next_significant_is(&self, kind: &TokenKind) -> bool {
        self.tokens[self.current + 1..]
            .iter()
            .find(|token| token.kind != TokenKind::Newline)
            .is_some_and(|token| &token.kind == kind)
    }

    /// Current token, skipping newlines where the bracket context ignores them.
    fn peek(&mut self) -> &'a Token {
        if !self.newline_sensitive.last().copied().unwrap_or(true) {
            self.skip_newlines();
        }
        let tokens = self.tokens;
        &tokens[self.current]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.previous = self.current;
            self.current += 1;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while self.tokens[self.current].kind == TokenKind::Newline {
            self.current += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.tokens[self.current].kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.current += 1;
        }
    }

    fn finish(&self, start: usize, kind: ExprKind) -> Expr {
        let first = &self.tokens[start];
        let last = &self.tokens[self.previous.max(start)];
        Expr {
            span: SourceSpan::new(first.line, first.column, last.end_line, last.end_column),
            tokens: start..self.previous.max(start) + 1,
            kind,
        }
    }

    fn span_from_token(token: &Token) -> SourceSpan {
        SourceSpan::new(token.line, token.column, token.end_line, token.end_column)
    }

    fn unexpected(token: &Token) -> SyntaxError {
        let what = match &token.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Identifier => "symbol".to_string(),
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral | TokenKind::ComplexLiteral => {
                "numeric constant".to_string()
            }
            TokenKind::StringLiteral(_) => "string constant".to_string(),
            TokenKind::Newline => "newline".to_string(),
            kind if kind.is_assignment() => "assignment".to_string(),
            _ => format!("'{}'", token.lexeme),
        };
        SyntaxError::new(format!("unexpected {what}"), token.line, token.column)
    }
}

/// Tokenizes and parses `input` into a module plus the token vector its
/// expression ranges index into.
pub fn parse_source(input: &str) -> Result<(Vec<Token>, Module)> {
    let tokens = crate::lexer::tokenize(input)?;
    let module = Parser::new(&tokens).parse()?;
    Ok((tokens, module))
}
