//! Tree-walking execution engine.
//!
//! [`Engine`] owns everything one script universe needs: the environment
//! arena with its global frame, the deferred-task queue, the virtual clock,
//! and the output sink used by `print`. State persists across [`Engine::run`]
//! calls, so a later run sees names defined by an earlier one.

pub mod env;
mod eval;
pub mod scheduler;
mod value;

pub use env::{EnvId, Environments};
pub use scheduler::{Task, TaskQueue};
pub use value::{Function, NativeFn, Value};

use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, trace};
use thiserror::Error;

use crate::ast::Node;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::parser::parse;

/// Evaluation failure. Aborts the remainder of the current run, including
/// any deferred tasks that have not run yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("variable '{0}' is already declared in this scope")]
    DuplicateDeclaration(String),

    #[error("cannot assign to constant '{0}'")]
    ConstAssignment(String),

    #[error("'{0}' is not a function")]
    NotCallable(String),
}

/// An embeddable script engine instance.
pub struct Engine {
    pub(crate) envs: Environments,
    globals: EnvId,
    queue: TaskQueue,
    /// Virtual time in milliseconds; advances only while draining tasks.
    clock_ms: u64,
    out: Box<dyn Write>,
}

impl Engine {
    /// An engine that prints to standard output.
    pub fn new() -> Self {
        Engine::with_output(Box::new(io::stdout()))
    }

    /// An engine that prints to the given sink. Useful for embedders that
    /// capture script output.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        let mut envs = Environments::new();
        let globals = envs.push_frame(None);
        let mut engine = Engine {
            envs,
            globals,
            queue: TaskQueue::new(),
            clock_ms: 0,
            out,
        };
        engine.install_builtins();
        engine
    }

    /// Expose a host callable under `name` in the global scope. Call this
    /// before [`run`](Self::run); later registrations overwrite earlier
    /// ones, including the default `print` and `defer`.
    pub fn register_native<F>(&mut self, name: &str, native: F)
    where
        F: Fn(&mut Engine, &[Value]) -> Result<Value, RuntimeError> + 'static,
    {
        let value = Value::Native(Rc::new(native));
        self.envs.define(self.globals, name, value, true);
    }

    fn install_builtins(&mut self) {
        // print(args...) emits each argument's string form, space-separated.
        self.register_native("print", |engine, args| {
            let line = args
                .iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(engine.out, "{line}");
            Ok(Value::Null)
        });

        // defer(callback, delayMs) enqueues the callback at now + delayMs.
        // Like the rest of the language it is permissive: a missing or
        // non-function callback is a no-op, not an error.
        self.register_native("defer", |engine, args| {
            let (Some(callback), Some(delay)) = (args.first(), args.get(1)) else {
                return Ok(Value::Null);
            };
            if !matches!(callback, Value::Function(_)) {
                return Ok(Value::Null);
            }
            let delay_ms = delay.as_number().max(0.0) as u64;
            engine
                .queue
                .enqueue(engine.clock_ms + delay_ms, callback.clone());
            Ok(Value::Null)
        });
    }

    /// Execute a source text: run every top-level statement in order, then
    /// drain the deferred-task queue. Returns the last synchronous
    /// statement's value.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = Lexer::tokenize(source);
        debug!("lexed {} tokens", tokens.len());
        let program = parse(tokens)?;
        debug!("parsed {} top-level statements", program.len());

        match self.execute(&program) {
            Ok(value) => Ok(value),
            Err(err) => {
                // Abandon whatever was still queued for this run.
                self.queue.clear();
                Err(err.into())
            }
        }
    }

    fn execute(&mut self, program: &[Node]) -> Result<Value, RuntimeError> {
        let mut last = Value::Null;
        for statement in program {
            last = self.evaluate(statement, self.globals)?;
        }
        self.collect_environments(&last);
        self.drain_tasks(&last)?;
        self.collect_environments(&last);
        Ok(last)
    }

    /// Run deferred tasks until the queue is empty. Every synchronous
    /// statement has already finished by the time this is called. Among
    /// ready tasks, queue order decides; when nothing is ready the virtual
    /// clock advances to the earliest pending deadline instead of blocking.
    fn drain_tasks(&mut self, result: &Value) -> Result<(), RuntimeError> {
        if self.queue.is_empty() {
            return Ok(());
        }
        debug!("draining {} deferred tasks", self.queue.len());
        while !self.queue.is_empty() {
            if let Some(task) = self.queue.take_ready(self.clock_ms) {
                trace!(
                    "running task due at t={}ms (now t={}ms)",
                    task.execute_at,
                    self.clock_ms
                );
                self.call_function(&task.callback, &[])?;
            } else if let Some(deadline) = self.queue.earliest_deadline() {
                trace!("no task ready, advancing clock to t={deadline}ms");
                self.clock_ms = deadline;
                self.collect_environments(result);
            }
        }
        Ok(())
    }

    /// Reclaim scope frames nothing can reach anymore. Roots are the global
    /// frame, every queued callback, and the value about to be returned.
    fn collect_environments(&mut self, result: &Value) {
        let mut root_values: Vec<Value> = self.queue.callbacks().cloned().collect();
        root_values.push(result.clone());
        self.envs.sweep(&[self.globals], &root_values);
        trace!("{} environment frames live after sweep", self.envs.live_frames());
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
