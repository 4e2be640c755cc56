//! Test fixtures and shared sinks for Crescent development.
//!
//! Task fixtures live in [`fixtures`]. [`SharedBuffer`] is an in-memory
//! [`Write`](std::io::Write) sink that stays readable after it has been
//! handed to a task as a boxed writer. [`BrokenSink`] fails every
//! write and flush.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CopyTask, CountingTask, FailingTask, FinishingTask, TraceTask, WriteTask};

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A cloneable, shared in-memory byte sink.
///
/// Every clone writes to the same buffer. Tasks are single-threaded, so
/// `Rc<RefCell<_>>` is enough.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink whose every write and flush fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "sink rejects writes"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "sink rejects flushes"))
    }
}
