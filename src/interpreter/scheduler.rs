//! Deferred callbacks and their queue.
//!
//! A [`Task`] pairs a callback (a function value whose closure was captured
//! at enqueue time) with a virtual execute time in milliseconds. The queue
//! is append-only until drained; it is deliberately *not* time-sorted:
//! among tasks that are ready at scan time, insertion order decides. The
//! engine owns one queue per instance, so engines can coexist and be
//! tested in isolation.

use super::value::Value;

/// A scheduled unit of deferred work. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct Task {
    /// Virtual time in milliseconds at which the task becomes eligible.
    pub execute_at: u64,
    /// The function value to invoke with no arguments.
    pub callback: Value,
}

/// FIFO-ish task queue: scan order is insertion order, readiness is gated
/// by virtual time.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        TaskQueue::default()
    }

    /// Append a task; never reorders existing entries.
    pub fn enqueue(&mut self, execute_at: u64, callback: Value) {
        self.tasks.push(Task {
            execute_at,
            callback,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return the first task (in insertion order) whose time has
    /// arrived, if any.
    pub fn take_ready(&mut self, now: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.execute_at <= now)?;
        Some(self.tasks.remove(index))
    }

    /// The soonest pending execute time, if the queue is non-empty.
    pub fn earliest_deadline(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.execute_at).min()
    }

    /// Pending callbacks, for garbage-collection rooting.
    pub fn callbacks(&self) -> impl Iterator<Item = &Value> {
        self.tasks.iter().map(|t| &t.callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_ready_respects_insertion_order() {
        let mut queue = TaskQueue::new();
        queue.enqueue(10, Value::Str("a".to_string()));
        queue.enqueue(10, Value::Str("b".to_string()));

        let first = queue.take_ready(10).unwrap();
        let second = queue.take_ready(10).unwrap();
        assert_eq!(first.callback, Value::Str("a".to_string()));
        assert_eq!(second.callback, Value::Str("b".to_string()));
        assert!(queue.take_ready(10).is_none());
    }

    #[test]
    fn take_ready_gates_on_time() {
        let mut queue = TaskQueue::new();
        queue.enqueue(50, Value::Null);

        assert!(queue.take_ready(49).is_none());
        assert!(queue.take_ready(50).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn insertion_order_wins_over_deadline_order_once_ready() {
        let mut queue = TaskQueue::new();
        queue.enqueue(30, Value::Str("late-deadline".to_string()));
        queue.enqueue(10, Value::Str("early-deadline".to_string()));

        // Both are ready at t=30; the one enqueued first runs first.
        let first = queue.take_ready(30).unwrap();
        assert_eq!(first.callback, Value::Str("late-deadline".to_string()));
    }

    #[test]
    fn earliest_deadline_scans_the_whole_queue() {
        let mut queue = TaskQueue::new();
        assert_eq!(queue.earliest_deadline(), None);
        queue.enqueue(30, Value::Null);
        queue.enqueue(10, Value::Null);
        assert_eq!(queue.earliest_deadline(), Some(10));
    }
}
