use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Token {
    fn new(
        kind: TokenKind,
        lexeme: String,
        (line, column): (usize, usize),
        (end_line, end_column): (usize, usize),
    ) -> Self {
        Self {
            kind,
            lexeme,
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Symbol name with surrounding backticks removed.
    pub fn name(&self) -> &str {
        self.lexeme
            .strip_prefix('`')
            .and_then(|rest| rest.strip_suffix('`'))
            .unwrap_or(&self.lexeme)
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Eof)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier,
    /// Numeral with no fractional part or exponent, an `L` suffix, or hex.
    IntegerLiteral,
    FloatLiteral,
    ComplexLiteral,
    StringLiteral(String),
    Keyword(Keyword),
    Newline,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    DoubleLBracket,
    RBracket,
    Comma,
    Semicolon,
    LeftAssign,       // <-
    SuperAssign,      // <<-
    RightAssign,      // ->
    SuperRightAssign, // ->>
    EqualAssign,      // =
    DoubleEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Bang,
    Ampersand,
    AmpersandAmpersand,
    Pipe,
    PipePipe,
    PipeGreater,
    Tilde,
    Question,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    /// `%op%` infix operators such as `%in%`, `%%` and `%>%`.
    Special,
    Colon,
    /// data.table's `:=`; R's grammar treats it as a left assignment.
    ColonAssign,
    DoubleColon,
    TripleColon,
    Dollar,
    At,
    Backslash,
    Eof,
}

impl TokenKind {
    /// Token name as reported by R's own parse data.
    pub fn parse_data_name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "SYMBOL",
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral | TokenKind::ComplexLiteral => {
                "NUM_CONST"
            }
            TokenKind::StringLiteral(_) => "STR_CONST",
            TokenKind::Keyword(keyword) => keyword.parse_data_name(),
            TokenKind::Newline => "NEWLINE",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::DoubleLBracket => "LBB",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::LeftAssign | TokenKind::SuperAssign | TokenKind::ColonAssign => {
                "LEFT_ASSIGN"
            }
            TokenKind::RightAssign | TokenKind::SuperRightAssign => "RIGHT_ASSIGN",
            TokenKind::EqualAssign => "EQ_ASSIGN",
            TokenKind::DoubleEqual => "EQ",
            TokenKind::BangEqual => "NE",
            TokenKind::Less => "LT",
            TokenKind::LessEqual => "LE",
            TokenKind::Greater => "GT",
            TokenKind::GreaterEqual => "GE",
            TokenKind::Bang => "'!'",
            TokenKind::Ampersand => "AND",
            TokenKind::AmpersandAmpersand => "AND2",
            TokenKind::Pipe => "OR",
            TokenKind::PipePipe => "OR2",
            TokenKind::PipeGreater => "PIPE",
            TokenKind::Tilde => "'~'",
            TokenKind::Question => "'?'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Special => "SPECIAL",
            TokenKind::Colon => "':'",
            TokenKind::DoubleColon => "NS_GET",
            TokenKind::TripleColon => "NS_GET_INT",
            TokenKind::Dollar => "'$'",
            TokenKind::At => "'@'",
            TokenKind::Backslash => "'\\\\'",
            TokenKind::Eof => "END_OF_INPUT",
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::LeftAssign
                | TokenKind::SuperAssign
                | TokenKind::RightAssign
                | TokenKind::SuperRightAssign
                | TokenKind::EqualAssign
                | TokenKind::ColonAssign
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    Repeat,
    While,
    Function,
    For,
    In,
    Next,
    Break,
    True,
    False,
    Null,
    Inf,
    NaN,
    Na,
    NaInteger,
    NaReal,
    NaCharacter,
}

impl Keyword {
    fn parse_data_name(self) -> &'static str {
        match self {
            Keyword::If => "IF",
            Keyword::Else => "ELSE",
            Keyword::Repeat => "REPEAT",
            Keyword::While => "WHILE",
            Keyword::Function => "FUNCTION",
            Keyword::For => "FOR",
            Keyword::In => "IN",
            Keyword::Next => "NEXT",
            Keyword::Break => "BREAK",
            Keyword::Null => "NULL_CONST",
            Keyword::True
            | Keyword::False
            | Keyword::Inf
            | Keyword::NaN
            | Keyword::Na
            | Keyword::NaInteger
            | Keyword::NaReal
            | Keyword::NaCharacter => "NUM_CONST",
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\u{c}' => {
                    self.advance_char();
                }
                '\r' | '\n' => {
                    let start = self.location();
                    self.advance_char();
                    tokens.push(Token::new(TokenKind::Newline, "\n".to_string(), start, start));
                }
                '#' => self.skip_comment(),
                '"' | '\'' => tokens.push(self.lex_string()?),
                '`' => tokens.push(self.lex_backtick_symbol()?),
                '0'..='9' => tokens.push(self.lex_number()?),
                '.' if matches!(self.peek_next_char(), Some('0'..='9')) => {
                    tokens.push(self.lex_number()?)
                }
                'r' | 'R' if matches!(self.peek_next_char(), Some('"' | '\'')) => {
                    tokens.push(self.lex_raw_string()?)
                }
                c if c.is_alphabetic() || c == '.' || c == '_' => {
                    tokens.push(self.lex_identifier_or_keyword())
                }
                '(' => tokens.push(self.simple_token(TokenKind::LParen, 1)),
                ')' => tokens.push(self.simple_token(TokenKind::RParen, 1)),
                '{' => tokens.push(self.simple_token(TokenKind::LBrace, 1)),
                '}' => tokens.push(self.simple_token(TokenKind::RBrace, 1)),
                '[' => {
                    if self.peek_next_char() == Some('[') {
                        tokens.push(self.simple_token(TokenKind::DoubleLBracket, 2))
                    } else {
                        tokens.push(self.simple_token(TokenKind::LBracket, 1))
                    }
                }
                ']' => tokens.push(self.simple_token(TokenKind::RBracket, 1)),
                ',' => tokens.push(self.simple_token(TokenKind::Comma, 1)),
                ';' => tokens.push(self.simple_token(TokenKind::Semicolon, 1)),
                '~' => tokens.push(self.simple_token(TokenKind::Tilde, 1)),
                '?' => tokens.push(self.simple_token(TokenKind::Question, 1)),
                '+' => tokens.push(self.simple_token(TokenKind::Plus, 1)),
                '/' => tokens.push(self.simple_token(TokenKind::Slash, 1)),
                '^' => tokens.push(self.simple_token(TokenKind::Caret, 1)),
                '$' => tokens.push(self.simple_token(TokenKind::Dollar, 1)),
                '@' => tokens.push(self.simple_token(TokenKind::At, 1)),
                '\\' => tokens.push(self.simple_token(TokenKind::Backslash, 1)),
                '*' => {
                    // `**` is an old spelling of `^`.
                    if self.peek_next_char() == Some('*') {
                        tokens.push(self.simple_token(TokenKind::Caret, 2))
                    } else {
                        tokens.push(self.simple_token(TokenKind::Star, 1))
                    }
                }
                '<' => tokens.push(self.lex_less_variants()),
                '-' => tokens.push(self.lex_minus_variants()),
                '=' => tokens.push(self.lex_pair('=', TokenKind::DoubleEqual, TokenKind::EqualAssign)),
                '!' => tokens.push(self.lex_pair('=', TokenKind::BangEqual, TokenKind::Bang)),
                '>' => {
                    tokens.push(self.lex_pair('=', TokenKind::GreaterEqual, TokenKind::Greater))
                }
                '&' => tokens.push(self.lex_pair(
                    '&',
                    TokenKind::AmpersandAmpersand,
                    TokenKind::Ampersand,
                )),
                '|' => tokens.push(self.lex_pipe_variants()),
                ':' => tokens.push(self.lex_colon_variants()),
                '%' => tokens.push(self.lex_special()?),
                other => {
                    return Err(SyntaxError::new(
                        format!("unexpected character '{other}'"),
                        self.line,
                        self.column,
                    ));
                }
            }
        }

        let end = self.location();
        tokens.push(Token::new(TokenKind::Eof, String::new(), end, end));

        Ok(tokens)
    }

    fn location(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance_char();
        }
    }

    fn lex_string(&mut self) -> Result<Token> {
        let start = self.position;
        let start_loc = self.location();
        let quote = self.peek_char().unwrap_or('"');
        self.advance_char(); // consume opening quote

        let mut value = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == quote {
                let end_loc = self.location();
                self.advance_char();
                return Ok(Token::new(
                    TokenKind::StringLiteral(value),
                    self.slice(start, self.position).to_string(),
                    start_loc,
                    end_loc,
                ));
            }
            if ch == '\\' {
                self.advance_char();
                let escaped = self.peek_char().ok_or_else(|| {
                    SyntaxError::new(
                        "unterminated escape sequence in string literal",
                        start_loc.0,
                        start_loc.1,
                    )
                })?;
                value.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '0' => '\0',
                    other => other,
                });
                self.advance_char();
                continue;
            }
            value.push(ch);
            self.advance_char();
        }

        Err(SyntaxError::new(
            "unterminated string literal",
            start_loc.0,
            start_loc.1,
        ))
    }

    fn lex_raw_string(&mut self) -> Result<Token> {
        let start = self.position;
        let start_loc = self.location();
        self.advance_char(); // consume r / R
        let quote = self.peek_char().unwrap_or('"');
        self.advance_char();

        let mut dashes = 0usize;
        while self.peek_char() == Some('-') {
            dashes += 1;
            self.advance_char();
        }
        let close = match self.peek_char() {
            Some('(') => ')',
            Some('[') => ']',
            Some('{') => '}',
            _ => {
                return Err(SyntaxError::new(
                    "malformed raw string literal",
                    start_loc.0,
                    start_loc.1,
                ))
            }
        };
        self.advance_char();

        let terminator: String = std::iter::once(close)
            .chain(std::iter::repeat('-').take(dashes))
            .chain(std::iter::once(quote))
            .collect();
        let body_start = self.position;
        while self.peek_char().is_some() {
            if self.input[self.position..].starts_with(&terminator) {
                let value = self.slice(body_start, self.position).to_string();
                for _ in 0..terminator.chars().count() - 1 {
                    self.advance_char();
                }
                let end_loc = self.location();
                self.advance_char();
                return Ok(Token::new(
                    TokenKind::StringLiteral(value),
                    self.slice(start, self.position).to_string(),
                    start_loc,
                    end_loc,
                ));
            }
            self.advance_char();
        }

        Err(SyntaxError::new(
            "unterminated raw string literal",
            start_loc.0,
            start_loc.1,
        ))
    }

    fn lex_backtick_symbol(&mut self) -> Result<Token> {
        let start = self.position;
        let start_loc = self.location();
        self.advance_char(); // consume opening backtick

        while let Some(ch) = self.peek_char() {
            if ch == '`' {
                let end_loc = self.location();
                self.advance_char();
                return Ok(Token::new(
                    TokenKind::Identifier,
                    self.slice(start, self.position).to_string(),
                    start_loc,
                    end_loc,
                ));
            }
            if ch == '\\' {
                self.advance_char();
            }
            self.advance_char();
        }

        Err(SyntaxError::new(
            "unterminated backtick-quoted name",
            start_loc.0,
            start_loc.1,
        ))
    }

    fn lex_number(&mut self) -> Result<Token> {
        let start = self.position;
        let start_loc = self.location();
        let mut end_loc = start_loc;
        let mut is_float = false;

        if self.peek_char() == Some('0') && matches!(self.peek_next_char(), Some('x' | 'X')) {
            self.advance_char();
            end_loc = self.location();
            self.advance_char();
            let mut saw_digit = false;
            while let Some(ch) = self.peek_char() {
                if !ch.is_ascii_hexdigit() {
                    break;
                }
                saw_digit = true;
                end_loc = self.location();
                self.advance_char();
            }
            if !saw_digit {
                return Err(SyntaxError::new(
                    "malformed hexadecimal constant",
                    start_loc.0,
                    start_loc.1,
                ));
            }
        } else {
            while let Some(ch) = self.peek_char() {
                match ch {
                    '0'..='9' => {}
                    '.' if !is_float => is_float = true,
                    'e' | 'E' => {
                        is_float = true;
                        end_loc = self.location();
                        self.advance_char();
                        if matches!(self.peek_char(), Some('+' | '-')) {
                            end_loc = self.location();
                            self.advance_char();
                        }
                        if !matches!(self.peek_char(), Some('0'..='9')) {
                            return Err(SyntaxError::new(
                                "malformed exponent in numeric constant",
                                start_loc.0,
                                start_loc.1,
                            ));
                        }
                        continue;
                    }
                    _ => break,
                }
                end_loc = self.location();
                self.advance_char();
            }
        }

        let kind = match self.peek_char() {
            Some('L') => {
                // `1.5L` stays a double in R; `1e3L` and `1.0L` are whole and become integers.
                let whole = !is_float
                    || self.input[start..self.position]
                        .parse::<f64>()
                        .is_ok_and(|value| value.fract() == 0.0);
                end_loc = self.location();
                self.advance_char();
                if whole {
                    TokenKind::IntegerLiteral
                } else {
                    TokenKind::FloatLiteral
                }
            }
            Some('i') => {
                end_loc = self.location();
                self.advance_char();
                TokenKind::ComplexLiteral
            }
            _ if is_float => TokenKind::FloatLiteral,
            _ => TokenKind::IntegerLiteral,
        };

        Ok(Token::new(
            kind,
            self.slice(start, self.position).to_string(),
            start_loc,
            end_loc,
        ))
    }

    fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.position;
        let start_loc = self.location();
        let mut end_loc = start_loc;
        self.advance_char();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '.' || ch == '_' {
                end_loc = self.location();
                self.advance_char();
            } else {
                break;
            }
        }

        let lexeme = self.slice(start, self.position).to_string();
        let kind = match keyword_from_lexeme(&lexeme) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        Token::new(kind, lexeme, start_loc, end_loc)
    }

    fn lex_less_variants(&mut self) -> Token {
        if self.input[self.position..].starts_with("<<-") {
            self.simple_token(TokenKind::SuperAssign, 3)
        } else if self.input[self.position..].starts_with("<-") {
            self.simple_token(TokenKind::LeftAssign, 2)
        } else if self.input[self.position..].starts_with("<=") {
            self.simple_token(TokenKind::LessEqual, 2)
        } else {
            self.simple_token(TokenKind::Less, 1)
        }
    }

    fn lex_minus_variants(&mut self) -> Token {
        if self.input[self.position..].starts_with("->>") {
            self.simple_token(TokenKind::SuperRightAssign, 3)
        } else if self.input[self.position..].starts_with("->") {
            self.simple_token(TokenKind::RightAssign, 2)
        } else {
            self.simple_token(TokenKind::Minus, 1)
        }
    }

    fn lex_pipe_variants(&mut self) -> Token {
        match self.peek_next_char() {
            Some('|') => self.simple_token(TokenKind::PipePipe, 2),
            Some('>') => self.simple_token(TokenKind::PipeGreater, 2),
            _ => self.simple_token(TokenKind::Pipe, 1),
        }
    }

    fn lex_colon_variants(&mut self) -> Token {
        if self.input[self.position..].starts_with(":::") {
            self.simple_token(TokenKind::TripleColon, 3)
        } else if self.input[self.position..].starts_with("::") {
            self.simple_token(TokenKind::DoubleColon, 2)
        } else if self.peek_next_char() == Some('=') {
            self.simple_token(TokenKind::ColonAssign, 2)
        } else {
            self.simple_token(TokenKind::Colon, 1)
        }
    }

    /// Two-character operator when `second` follows, otherwise the single form.
    fn lex_pair(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
        if self.peek_next_char() == Some(second) {
            self.simple_token(double, 2)
        } else {
            self.simple_token(single, 1)
        }
    }

    fn lex_special(&mut self) -> Result<Token> {
        let start = self.position;
        let start_loc = self.location();
        self.advance_char(); // consume opening '%'

        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            if ch == '%' {
                let end_loc = self.location();
                self.advance_char();
                return Ok(Token::new(
                    TokenKind::Special,
                    self.slice(start, self.position).to_string(),
                    start_loc,
                    end_loc,
                ));
            }
            self.advance_char();
        }

        Err(SyntaxError::new(
            "unterminated %-operator",
            start_loc.0,
            start_loc.1,
        ))
    }

    fn simple_token(&mut self, kind: TokenKind, width: usize) -> Token {
        let start = self.position;
        let start_loc = self.location();
        let mut end_loc = start_loc;
        for _ in 0..width {
            end_loc = self.location();
            self.advance_char();
        }
        Token::new(
            kind,
            self.slice(start, self.position).to_string(),
            start_loc,
            end_loc,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_next_char(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next()?;
        iter.next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\r' || ch == '\n' {
            if ch == '\r' && self.peek_char() == Some('\n') {
                self.position += 1;
            }
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        &self.input[start..end]
    }
}

fn keyword_from_lexeme(lexeme: &str) -> Option<Keyword> {
    match lexeme {
        "if" => Some(Keyword::If),
        "else" => Some(Keyword::Else),
        "repeat" => Some(Keyword::Repeat),
        "while" => Some(Keyword::While),
        "function" => Some(Keyword::Function),
        "for" => Some(Keyword::For),
        "in" => Some(Keyword::In),
        "next" => Some(Keyword::Next),
        "break" => Some(Keyword::Break),
        "TRUE" => Some(Keyword::True),
        "FALSE" => Some(Keyword::False),
        "NULL" => Some(Keyword::Null),
        "Inf" => Some(Keyword::Inf),
        "NaN" => Some(Keyword::NaN),
        "NA" => Some(Keyword::Na),
        "NA_integer_" => Some(Keyword::NaInteger),
        "NA_real_" => Some(Keyword::NaReal),
        "NA_character_" => Some(Keyword::NaCharacter),
        _ => None,
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
