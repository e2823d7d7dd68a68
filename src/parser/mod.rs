//! Recursive-descent parsing of a token stream into an AST.
//!
//! [`parse`] consumes the lexer's token stream and produces the sequence of
//! top-level statements, failing with a position-tagged [`SyntaxError`] the
//! first time a required token is absent. Grammar rules live in
//! [`grammar`]; this module holds the shared cursor state and the error
//! type.

mod grammar;

pub use grammar::parse;

use thiserror::Error;

use crate::lexer::{Span, Token};

/// A malformed token sequence, reported at the offending position.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error at {span}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Cursor over the token stream.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        ParseState { tokens, index: 0 }
    }

    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Position to report when the stream ends unexpectedly: the last
    /// token's span, or the start of the source for empty input.
    pub fn eof_span(&self) -> Span {
        self.tokens.last().map(|t| t.span).unwrap_or_default()
    }
}
