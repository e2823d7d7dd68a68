//! Abstract syntax tree definitions.
//!
//! A program is a sequence of [`Node`]s. The same enum covers expressions
//! and statements, matching the evaluator's single dispatch point: every
//! node evaluates to a value against an environment.
//!
//! Nodes are immutable once constructed and own their children exclusively,
//! with one exception: a function body is held behind `Rc` because the
//! function value produced at declaration time shares the block with the
//! tree and may evaluate it once per call.

use std::rc::Rc;

/// Binary operator kinds, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Gt,
    Lt,
}

/// A single AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    NumberLiteral(f64),
    StringLiteral(String),
    Identifier(String),
    ArrayLiteral(Vec<Node>),
    BinaryOp {
        op: BinOpKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Braced statement list; introduces a nested scope.
    Block(Vec<Node>),
    /// `let`/`const`/`var` declaration. `constant` marks the slot immutable.
    VarDecl {
        name: String,
        init: Box<Node>,
        constant: bool,
    },
    /// Assignment to an existing name somewhere on the scope chain.
    Assign {
        name: String,
        value: Box<Node>,
    },
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    /// Declares a function and binds it in the defining scope. The body
    /// block is shared with the produced function value.
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Rc<Node>,
    },
    /// Call of a named callee; resolution happens at evaluation time.
    Call {
        callee: String,
        args: Vec<Node>,
    },
}
