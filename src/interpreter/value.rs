//! Runtime value representation.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::Node;

use super::env::EnvId;
use super::{Engine, RuntimeError};

/// A host-provided callable exposed into the language's global scope.
pub type NativeFn = Rc<dyn Fn(&mut Engine, &[Value]) -> Result<Value, RuntimeError>>;

/// A user-defined function: parameter names, a shared body block, and the
/// environment captured at declaration time.
#[derive(Debug)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Rc<Node>,
    pub closure: EnvId,
}

/// A dynamically-typed runtime value. Exactly one variant is active;
/// string conversion and truthiness are total over all variants.
#[derive(Clone)]
pub enum Value {
    Null,
    Number(f64),
    Str(String),
    Bool(bool),
    List(Rc<Vec<Value>>),
    Object(Rc<HashMap<String, Value>>),
    Function(Rc<Function>),
    Native(NativeFn),
}

impl Value {
    /// The variant's name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
        }
    }

    /// Branch truthiness: booleans by value, numbers false only at exactly
    /// zero, every other variant true. Empty strings and empty lists are
    /// true on purpose.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            _ => true,
        }
    }

    /// Numeric view used by arithmetic: non-numbers read as zero rather
    /// than raising a type error the taxonomy does not have.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(_) => write!(f, "[Array]"),
            Value::Object(_) => write!(f, "[Object]"),
            Value::Function(_) | Value::Native(_) => write!(f, "[Function]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(func).finish(),
            Value::Native(_) => write!(f, "Native(..)"),
        }
    }
}

/// Structural equality for data variants; identity for callables.
/// Mixed-type comparisons are false.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
