//! Grammar rules for the MiniJS language.
//!
//! Precedence, low to high: comparison (single, non-associative) →
//! additive (left) → multiplicative (left) → primary.

use std::rc::Rc;

use crate::ast::{BinOpKind, Node};
use crate::lexer::{Token, TokenKind};

use super::{ParseResult, ParseState, SyntaxError};

/// program := statement*
pub fn parse(tokens: Vec<Token>) -> ParseResult<Vec<Node>> {
    let mut state = ParseState::new(tokens);
    let mut program = Vec::new();
    while state.has_next() {
        program.push(statement(&mut state)?);
    }
    Ok(program)
}

/// Consume the next token if it satisfies `pred`, otherwise fail with a
/// message naming what was expected.
fn expect(
    state: &mut ParseState,
    pred: impl Fn(&TokenKind) -> bool,
    expected: &str,
) -> ParseResult<Token> {
    match state.next() {
        Some(token) if pred(&token.kind) => Ok(token),
        Some(token) => Err(SyntaxError::new(
            format!("expected {expected}, found {}", token.kind.describe()),
            token.span,
        )),
        None => Err(SyntaxError::new(
            format!("expected {expected}, found end of input"),
            state.eof_span(),
        )),
    }
}

/// ident := identifier token
fn ident(state: &mut ParseState) -> ParseResult<String> {
    let token = expect(state, |k| matches!(k, TokenKind::Ident(_)), "an identifier")?;
    match token.kind {
        TokenKind::Ident(name) => Ok(name),
        _ => unreachable!("expect() verified the token kind"),
    }
}

fn semi(state: &mut ParseState) -> ParseResult<()> {
    expect(state, |k| matches!(k, TokenKind::Semi), "';'")?;
    Ok(())
}

/// statement := var_decl | print_stmt | if_stmt | while_stmt
///            | function_decl | block | assignment | expression ";"
fn statement(state: &mut ParseState) -> ParseResult<Node> {
    match state.peek().map(|t| &t.kind) {
        Some(TokenKind::Let) => var_decl(state),
        Some(TokenKind::Const) => var_decl(state),
        Some(TokenKind::Var) => var_decl(state),
        Some(TokenKind::Print) => print_stmt(state),
        Some(TokenKind::If) => if_stmt(state),
        Some(TokenKind::While) => while_stmt(state),
        Some(TokenKind::Function) => function_decl(state),
        Some(TokenKind::LBrace) => block(state),
        _ => assignment_or_expression(state),
    }
}

/// var_decl := ("let" | "const" | "var") ident "=" expression ";"
fn var_decl(state: &mut ParseState) -> ParseResult<Node> {
    let keyword = expect(
        state,
        |k| matches!(k, TokenKind::Let | TokenKind::Const | TokenKind::Var),
        "a declaration keyword",
    )?;
    let constant = keyword.kind == TokenKind::Const;
    let name = ident(state)?;
    expect(state, |k| matches!(k, TokenKind::Assign), "'='")?;
    let init = expression(state)?;
    semi(state)?;
    Ok(Node::VarDecl {
        name,
        init: Box::new(init),
        constant,
    })
}

/// print_stmt := "print" expression ";"
///
/// Sugar for a call to the `print` native, so host-supplied replacements
/// of `print` see statement-form output too.
fn print_stmt(state: &mut ParseState) -> ParseResult<Node> {
    expect(state, |k| matches!(k, TokenKind::Print), "'print'")?;
    let value = expression(state)?;
    semi(state)?;
    Ok(Node::Call {
        callee: "print".to_string(),
        args: vec![value],
    })
}

/// if_stmt := "if" "(" expression ")" block ["else" block]
fn if_stmt(state: &mut ParseState) -> ParseResult<Node> {
    expect(state, |k| matches!(k, TokenKind::If), "'if'")?;
    expect(state, |k| matches!(k, TokenKind::LParen), "'('")?;
    let cond = expression(state)?;
    expect(state, |k| matches!(k, TokenKind::RParen), "')'")?;
    let then_branch = block(state)?;
    let else_branch = if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Else)) {
        state.next();
        Some(Box::new(block(state)?))
    } else {
        None
    };
    Ok(Node::If {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch,
    })
}

/// while_stmt := "while" "(" expression ")" block
fn while_stmt(state: &mut ParseState) -> ParseResult<Node> {
    expect(state, |k| matches!(k, TokenKind::While), "'while'")?;
    expect(state, |k| matches!(k, TokenKind::LParen), "'('")?;
    let cond = expression(state)?;
    expect(state, |k| matches!(k, TokenKind::RParen), "')'")?;
    let body = block(state)?;
    Ok(Node::While {
        cond: Box::new(cond),
        body: Box::new(body),
    })
}

/// function_decl := "function" ident "(" [ident ("," ident)*] ")" block
fn function_decl(state: &mut ParseState) -> ParseResult<Node> {
    expect(state, |k| matches!(k, TokenKind::Function), "'function'")?;
    let name = ident(state)?;
    expect(state, |k| matches!(k, TokenKind::LParen), "'('")?;
    let mut params = Vec::new();
    if !matches!(state.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
        loop {
            params.push(ident(state)?);
            if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
                state.next();
            } else {
                break;
            }
        }
    }
    expect(state, |k| matches!(k, TokenKind::RParen), "')'")?;
    let body = block(state)?;
    Ok(Node::FunctionDecl {
        name,
        params,
        body: Rc::new(body),
    })
}

/// block := "{" statement* "}"
fn block(state: &mut ParseState) -> ParseResult<Node> {
    expect(state, |k| matches!(k, TokenKind::LBrace), "'{'")?;
    let mut statements = Vec::new();
    while !matches!(state.peek().map(|t| &t.kind), Some(TokenKind::RBrace)) {
        if !state.has_next() {
            return Err(SyntaxError::new(
                "expected '}', found end of input",
                state.eof_span(),
            ));
        }
        statements.push(statement(state)?);
    }
    state.next(); // closing brace
    Ok(Node::Block(statements))
}

/// assignment := ident "=" expression ";"
///
/// Anything identifier-led that is not an assignment backtracks to a bare
/// expression statement.
fn assignment_or_expression(state: &mut ParseState) -> ParseResult<Node> {
    let checkpoint = state.position();
    if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Ident(_))) {
        let name = ident(state)?;
        if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Assign)) {
            state.next();
            let value = expression(state)?;
            semi(state)?;
            return Ok(Node::Assign {
                name,
                value: Box::new(value),
            });
        }
        state.restore(checkpoint);
    }
    let expr = expression(state)?;
    semi(state)?;
    Ok(expr)
}

/// expression := comparison
fn expression(state: &mut ParseState) -> ParseResult<Node> {
    comparison(state)
}

/// comparison := additive [(">" | "<" | "==") additive]
///
/// Non-associative: at most one comparison, chaining is a syntax error at
/// the statement level.
fn comparison(state: &mut ParseState) -> ParseResult<Node> {
    let left = additive(state)?;
    let op = match state.peek().map(|t| &t.kind) {
        Some(TokenKind::Gt) => BinOpKind::Gt,
        Some(TokenKind::Lt) => BinOpKind::Lt,
        Some(TokenKind::Eq) => BinOpKind::Eq,
        _ => return Ok(left),
    };
    state.next();
    let right = additive(state)?;
    Ok(Node::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// additive := multiplicative (("+" | "-") multiplicative)*
fn additive(state: &mut ParseState) -> ParseResult<Node> {
    let mut left = multiplicative(state)?;
    loop {
        let op = match state.peek().map(|t| &t.kind) {
            Some(TokenKind::Plus) => BinOpKind::Add,
            Some(TokenKind::Minus) => BinOpKind::Sub,
            _ => break,
        };
        state.next();
        let right = multiplicative(state)?;
        left = Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// multiplicative := primary (("*" | "/") primary)*
fn multiplicative(state: &mut ParseState) -> ParseResult<Node> {
    let mut left = primary(state)?;
    loop {
        let op = match state.peek().map(|t| &t.kind) {
            Some(TokenKind::Star) => BinOpKind::Mul,
            Some(TokenKind::Slash) => BinOpKind::Div,
            _ => break,
        };
        state.next();
        let right = primary(state)?;
        left = Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// primary := number | string | array_literal | "(" expression ")"
///          | ident ["(" [call_args] ")"]
fn primary(state: &mut ParseState) -> ParseResult<Node> {
    match state.next() {
        Some(Token {
            kind: TokenKind::Number(value),
            ..
        }) => Ok(Node::NumberLiteral(value)),
        Some(Token {
            kind: TokenKind::Str(value),
            ..
        }) => Ok(Node::StringLiteral(value)),
        Some(Token {
            kind: TokenKind::LBracket,
            ..
        }) => array_literal(state),
        Some(Token {
            kind: TokenKind::LParen,
            ..
        }) => {
            let inner = expression(state)?;
            expect(state, |k| matches!(k, TokenKind::RParen), "')'")?;
            Ok(inner)
        }
        Some(Token {
            kind: TokenKind::Ident(name),
            ..
        }) => {
            if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
                state.next();
                let args = call_args(state)?;
                Ok(Node::Call { callee: name, args })
            } else {
                Ok(Node::Identifier(name))
            }
        }
        Some(token) => Err(SyntaxError::new(
            format!("expected an expression, found {}", token.kind.describe()),
            token.span,
        )),
        None => Err(SyntaxError::new(
            "expected an expression, found end of input",
            state.eof_span(),
        )),
    }
}

/// array_literal := "[" [expression ("," expression)*] "]"
///
/// The opening bracket has already been consumed.
fn array_literal(state: &mut ParseState) -> ParseResult<Node> {
    let mut elements = Vec::new();
    if !matches!(state.peek().map(|t| &t.kind), Some(TokenKind::RBracket)) {
        loop {
            elements.push(expression(state)?);
            if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
                state.next();
            } else {
                break;
            }
        }
    }
    expect(state, |k| matches!(k, TokenKind::RBracket), "']'")?;
    Ok(Node::ArrayLiteral(elements))
}

/// call_args := [expression ("," expression)*] ")"
///
/// The opening parenthesis has already been consumed.
fn call_args(state: &mut ParseState) -> ParseResult<Vec<Node>> {
    let mut args = Vec::new();
    if !matches!(state.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
        loop {
            args.push(expression(state)?);
            if matches!(state.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
                state.next();
            } else {
                break;
            }
        }
    }
    expect(state, |k| matches!(k, TokenKind::RParen), "')'")?;
    Ok(args)
}
