//! Unified error type for a whole engine run.
//!
//! Each pipeline stage has its own error: the parser reports
//! [`SyntaxError`](crate::parser::SyntaxError) with a source position, the
//! interpreter reports [`RuntimeError`](crate::interpreter::RuntimeError).
//! `Error` wraps both so `Engine::run` can surface a single diagnostic.

use thiserror::Error;

use crate::interpreter::RuntimeError;
use crate::parser::SyntaxError;

/// Any error produced by [`Engine::run`](crate::Engine::run).
///
/// A parse error prevents any evaluation from starting; a runtime error
/// aborts the remainder of the current run, including pending deferred
/// tasks. Side effects that already happened are not rolled back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
