//! Lexical scope frames, stored in an arena.
//!
//! A frame maps names to value slots and optionally points at a parent
//! frame. Lookup walks from the innermost frame outward; assignment mutates
//! the nearest frame that defines the name. Frames are addressed by
//! [`EnvId`] instead of owning pointers because closures routinely form
//! reference cycles (a function value captures the frame that holds the
//! function itself); [`Environments::sweep`] reclaims frames no live root
//! can reach.

use std::collections::HashMap;

use super::value::Value;
use super::RuntimeError;

/// Stable handle to a scope frame in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvId(usize);

#[derive(Debug)]
struct Slot {
    value: Value,
    mutable: bool,
}

#[derive(Debug)]
struct Frame {
    slots: HashMap<String, Slot>,
    parent: Option<EnvId>,
    marked: bool,
}

/// Arena of scope frames.
#[derive(Debug, Default)]
pub struct Environments {
    frames: Vec<Option<Frame>>,
    free: Vec<usize>,
}

impl Environments {
    pub fn new() -> Self {
        Environments::default()
    }

    /// Create a fresh frame chained to `parent`.
    pub fn push_frame(&mut self, parent: Option<EnvId>) -> EnvId {
        let frame = Frame {
            slots: HashMap::new(),
            parent,
            marked: false,
        };
        match self.free.pop() {
            Some(index) => {
                self.frames[index] = Some(frame);
                EnvId(index)
            }
            None => {
                self.frames.push(Some(frame));
                EnvId(self.frames.len() - 1)
            }
        }
    }

    fn frame(&self, id: EnvId) -> &Frame {
        self.frames[id.0]
            .as_ref()
            .expect("environment frame accessed after sweep")
    }

    fn frame_mut(&mut self, id: EnvId) -> &mut Frame {
        self.frames[id.0]
            .as_mut()
            .expect("environment frame accessed after sweep")
    }

    /// Bind `name` in `env` itself. An existing binding in the same frame
    /// is overwritten silently; declaration statements check
    /// [`has_local`](Self::has_local) first.
    pub fn define(&mut self, env: EnvId, name: &str, value: Value, mutable: bool) {
        self.frame_mut(env)
            .slots
            .insert(name.to_string(), Slot { value, mutable });
    }

    /// Whether `env`'s own frame (not its parents) binds `name`.
    pub fn has_local(&self, env: EnvId, name: &str) -> bool {
        self.frame(env).slots.contains_key(name)
    }

    /// Resolve `name` along the chain, innermost frame first.
    pub fn lookup(&self, env: EnvId, name: &str) -> Option<Value> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = self.frame(id);
            if let Some(slot) = frame.slots.get(name) {
                return Some(slot.value.clone());
            }
            current = frame.parent;
        }
        None
    }

    /// Mutate the nearest frame that defines `name`. Fails if no frame on
    /// the chain defines it, or if the defining slot is constant.
    pub fn assign(&mut self, env: EnvId, name: &str, value: Value) -> Result<(), RuntimeError> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = self.frame_mut(id);
            if let Some(slot) = frame.slots.get_mut(name) {
                if !slot.mutable {
                    return Err(RuntimeError::ConstAssignment(name.to_string()));
                }
                slot.value = value;
                return Ok(());
            }
            current = frame.parent;
        }
        Err(RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Mark frames reachable from the roots (frame ids plus values such as
    /// queued callbacks), then drop every other frame.
    pub fn sweep(&mut self, roots: &[EnvId], root_values: &[Value]) {
        for frame in self.frames.iter_mut().flatten() {
            frame.marked = false;
        }

        let mut pending: Vec<EnvId> = roots.to_vec();
        for value in root_values {
            trace_value(value, &mut pending);
        }
        while let Some(id) = pending.pop() {
            let frame = self.frame_mut(id);
            if frame.marked {
                continue;
            }
            frame.marked = true;
            if let Some(parent) = frame.parent {
                pending.push(parent);
            }
            let frame = self.frame(id);
            for slot in frame.slots.values() {
                trace_value(&slot.value, &mut pending);
            }
        }

        for (index, entry) in self.frames.iter_mut().enumerate() {
            let dead = matches!(entry, Some(frame) if !frame.marked);
            if dead {
                *entry = None;
                self.free.push(index);
            }
        }
    }

    /// Number of frames currently alive.
    pub fn live_frames(&self) -> usize {
        self.frames.iter().flatten().count()
    }
}

/// Push every frame id a value can reach onto the mark stack.
fn trace_value(value: &Value, pending: &mut Vec<EnvId>) {
    match value {
        Value::Function(func) => pending.push(func.closure),
        Value::List(items) => {
            for item in items.iter() {
                trace_value(item, pending);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                trace_value(item, pending);
            }
        }
        _ => {}
    }
}
