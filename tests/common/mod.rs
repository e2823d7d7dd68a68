//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use minijs::{Engine, Error, Value};

/// A clonable sink that remembers everything the engine printed.
#[derive(Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An engine wired to a captured output sink.
pub fn engine_with_capture() -> (Engine, CapturedOutput) {
    let capture = CapturedOutput::default();
    let engine = Engine::with_output(Box::new(capture.clone()));
    (engine, capture)
}

/// Run one source text on a fresh engine, returning the result and
/// everything it printed.
pub fn run_capturing(source: &str) -> (Result<Value, Error>, String) {
    let (mut engine, capture) = engine_with_capture();
    let result = engine.run(source);
    (result, capture.contents())
}
