//! Tokenization of raw source text.
//!
//! The lexer walks the source with a cursor and hands out one token at a
//! time; [`Lexer::tokenize`] collects the whole stream. Scanning is
//! permissive by design:
//!
//! - an identifier whose text equals a keyword becomes that keyword token,
//!   never a plain identifier
//! - strings have no escape sequences; an unterminated string consumes the
//!   rest of the input
//! - a number greedily takes digits and dots, and keeps the longest prefix
//!   that converts (so `1.2.3` scans as `1.2`)
//! - an unrecognized character is logged and skipped, it never halts the scan

use std::fmt;

use log::warn;

/// Source position of a token, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Span { line: 1, column: 1 }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// What a token is, plus its payload for identifiers and literals.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),
    Let,
    Const,
    Var,
    If,
    Else,
    While,
    Print,
    Function,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    Eq,
    Gt,
    Lt,
    AndAnd,
    OrOr,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Number(n) => format!("number '{n}'"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::Let => "'let'".to_string(),
            TokenKind::Const => "'const'".to_string(),
            TokenKind::Var => "'var'".to_string(),
            TokenKind::If => "'if'".to_string(),
            TokenKind::Else => "'else'".to_string(),
            TokenKind::While => "'while'".to_string(),
            TokenKind::Print => "'print'".to_string(),
            TokenKind::Function => "'function'".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::Eq => "'=='".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::AndAnd => "'&&'".to_string(),
            TokenKind::OrOr => "'||'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Semi => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
        }
    }
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Cursor-based scanner over source text.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan the whole source into a token stream.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            let span = self.span();
            let c = self.peek()?;

            if c.is_ascii_alphabetic() {
                return Some(Token {
                    kind: self.identifier_or_keyword(),
                    span,
                });
            }
            if c.is_ascii_digit() {
                return Some(Token {
                    kind: self.number(),
                    span,
                });
            }
            if c == '"' {
                return Some(Token {
                    kind: self.string(),
                    span,
                });
            }
            match self.symbol() {
                Some(kind) => return Some(Token { kind, span }),
                // Recoverable: skip the offending character and rescan.
                None => continue,
            }
        }
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() {
                break;
            }
            text.push(c);
            self.advance();
        }
        match text.as_str() {
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "print" => TokenKind::Print,
            "function" => TokenKind::Function,
            _ => TokenKind::Ident(text),
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() && c != '.' {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Number(number_value(&text))
    }

    fn string(&mut self) -> TokenKind {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some(c) => text.push(c),
                // Unterminated string: the scan ran to end of input.
                None => break,
            }
        }
        TokenKind::Str(text)
    }

    fn symbol(&mut self) -> Option<TokenKind> {
        let span = self.span();
        let c = self.advance()?;
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '>' => TokenKind::Gt,
            '<' => TokenKind::Lt,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '&' if self.peek() == Some('&') => {
                self.advance();
                TokenKind::AndAnd
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                TokenKind::OrOr
            }
            other => {
                warn!("skipping unrecognized character '{other}' at {span}");
                return None;
            }
        };
        Some(kind)
    }
}

/// Convert the scanned digit/dot run to a number, keeping the longest prefix
/// that parses. `1.2.3` converts to `1.2`, like a C `strtod`.
fn number_value(text: &str) -> f64 {
    let mut end = text.len();
    while end > 0 {
        if let Ok(value) = text[..end].parse::<f64>() {
            return value;
        }
        end -= 1;
    }
    0.0
}
