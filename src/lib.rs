//! # MiniJS - An Embeddable Scripting Engine
//!
//! MiniJS executes a small, dynamically-typed, C-like scripting language by
//! walking an abstract syntax tree against a chain of lexical scopes. It is a
//! library, not a shell: the embedding application feeds it source text and
//! receives a value or a diagnostic back.
//!
//! ## Architecture Overview
//!
//! The engine pipeline consists of the following stages:
//!
//! 1. **Lexer** (`lexer`) - Scans source text into a stream of typed tokens
//! 2. **Parser** (`parser`) - Builds an AST from tokens via recursive descent
//! 3. **Interpreter** (`interpreter`) - Walks the AST against an environment
//!    chain, producing a value and performing side effects
//! 4. **Scheduler** (`interpreter::scheduler`) - Drains deferred callbacks
//!    after the synchronous statement list completes
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → AST (Vec<ast::Node>)
//!     ↓
//! [Interpreter] → Runtime Value (interpreter::Value)
//!     ↓
//! [Scheduler] → deferred callbacks, in virtual-time order
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Closures over mutable scopes
//! A function value captures the environment it was declared in *by
//! reference*: mutations of an outer variable remain visible through the
//! closure afterwards. Environments live in an arena owned by the engine and
//! are addressed by stable ids, so mutually-referencing closures cannot form
//! leaking ownership cycles; a mark/sweep pass reclaims unreachable frames.
//!
//! ### Cooperative scheduling
//! `defer(callback, delayMs)` enqueues a task with a virtual execute time.
//! All synchronous top-level statements complete before any task runs; among
//! ready tasks, queue insertion order decides. Nothing runs in parallel.
//!
//! ### Host natives
//! The embedder may register native functions in the global scope before
//! running. `print` and `defer` are installed by default.
//!
//! ## Example
//!
//! ```
//! use minijs::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! let value = engine.run("let x = 2 + 3 * 4; x;").unwrap();
//! assert_eq!(value, Value::Number(14.0));
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;

pub use error::Error;
pub use interpreter::{Engine, RuntimeError, Value};
pub use parser::SyntaxError;
