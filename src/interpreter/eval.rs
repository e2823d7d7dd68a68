//! AST evaluation against the environment chain.

use std::rc::Rc;

use crate::ast::{BinOpKind, Node};

use super::env::EnvId;
use super::value::{Function, Value};
use super::{Engine, RuntimeError};

impl Engine {
    /// Evaluate one node in the given scope, producing a value or the first
    /// error encountered.
    pub(crate) fn evaluate(&mut self, node: &Node, env: EnvId) -> Result<Value, RuntimeError> {
        match node {
            Node::NumberLiteral(n) => Ok(Value::Number(*n)),
            Node::StringLiteral(s) => Ok(Value::Str(s.clone())),
            Node::Identifier(name) => self
                .envs
                .lookup(env, name)
                .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone())),
            Node::ArrayLiteral(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.evaluate(element, env)?);
                }
                Ok(Value::List(Rc::new(items)))
            }
            Node::BinaryOp { op, left, right } => {
                let lhs = self.evaluate(left, env)?;
                let rhs = self.evaluate(right, env)?;
                Ok(binary_op(*op, &lhs, &rhs))
            }
            Node::Block(statements) => {
                let scope = self.envs.push_frame(Some(env));
                let mut last = Value::Null;
                for statement in statements {
                    last = self.evaluate(statement, scope)?;
                }
                Ok(last)
            }
            Node::VarDecl {
                name,
                init,
                constant,
            } => {
                let value = self.evaluate(init, env)?;
                if self.envs.has_local(env, name) {
                    return Err(RuntimeError::DuplicateDeclaration(name.clone()));
                }
                self.envs.define(env, name, value.clone(), !constant);
                Ok(value)
            }
            Node::Assign { name, value } => {
                let value = self.evaluate(value, env)?;
                self.envs.assign(env, name, value.clone())?;
                Ok(value)
            }
            Node::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(cond, env)?.is_truthy() {
                    self.evaluate(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.evaluate(else_branch, env)
                } else {
                    Ok(Value::Null)
                }
            }
            Node::While { cond, body } => {
                while self.evaluate(cond, env)?.is_truthy() {
                    // The body is a block, so each iteration gets a fresh
                    // child scope.
                    self.evaluate(body, env)?;
                }
                Ok(Value::Null)
            }
            Node::FunctionDecl { name, params, body } => {
                let function = Value::Function(Rc::new(Function {
                    params: params.clone(),
                    body: Rc::clone(body),
                    closure: env,
                }));
                // Bound in the defining scope itself, which is what makes
                // direct and mutual recursion work.
                self.envs.define(env, name, function.clone(), true);
                Ok(function)
            }
            Node::Call { callee, args } => {
                let target = self
                    .envs
                    .lookup(env, callee)
                    .ok_or_else(|| RuntimeError::UndefinedVariable(callee.clone()))?;
                let mut argv = Vec::with_capacity(args.len());
                for arg in args {
                    argv.push(self.evaluate(arg, env)?);
                }
                match target {
                    Value::Function(_) | Value::Native(_) => self.call_function(&target, &argv),
                    _ => Err(RuntimeError::NotCallable(callee.clone())),
                }
            }
        }
    }

    /// Invoke a function or native value with already-evaluated arguments.
    ///
    /// For user functions the new scope's parent is the *closure*, not the
    /// caller's scope. Missing arguments bind to null; extra arguments are
    /// ignored.
    pub(crate) fn call_function(
        &mut self,
        callee: &Value,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(func) => {
                let func = Rc::clone(func);
                let scope = self.envs.push_frame(Some(func.closure));
                for (index, param) in func.params.iter().enumerate() {
                    let arg = args.get(index).cloned().unwrap_or(Value::Null);
                    self.envs.define(scope, param, arg, true);
                }
                self.evaluate(&func.body, scope)
            }
            Value::Native(native) => {
                let native = Rc::clone(native);
                native.as_ref()(self, args)
            }
            other => Err(RuntimeError::NotCallable(other.type_name().to_string())),
        }
    }
}

/// Apply a binary operator. Total: incompatible operands fall back to the
/// documented permissive behavior instead of erroring.
fn binary_op(op: BinOpKind, lhs: &Value, rhs: &Value) -> Value {
    match op {
        BinOpKind::Add => {
            // `+` concatenates if either side is a string.
            if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) {
                Value::Str(format!("{lhs}{rhs}"))
            } else {
                Value::Number(lhs.as_number() + rhs.as_number())
            }
        }
        BinOpKind::Sub => Value::Number(lhs.as_number() - rhs.as_number()),
        BinOpKind::Mul => Value::Number(lhs.as_number() * rhs.as_number()),
        BinOpKind::Div => Value::Number(lhs.as_number() / rhs.as_number()),
        BinOpKind::Eq => Value::Bool(lhs == rhs),
        BinOpKind::Gt => Value::Bool(compare(lhs, rhs, |o| o == std::cmp::Ordering::Greater)),
        BinOpKind::Lt => Value::Bool(compare(lhs, rhs, |o| o == std::cmp::Ordering::Less)),
    }
}

/// Ordering comparison: numeric for numbers, lexicographic for strings,
/// false for any other pairing.
fn compare(lhs: &Value, rhs: &Value, check: impl Fn(std::cmp::Ordering) -> bool) -> bool {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).map(&check).unwrap_or(false),
        (Value::Str(a), Value::Str(b)) => check(a.cmp(b)),
        _ => false,
    }
}
