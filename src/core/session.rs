//! Session handles
//!
//! A terminal-bearing tab owns a handle to its session. The broadcast core only
//! ever writes raw input through it; everything else about the session lives
//! in the terminal component.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is closed")]
    Closed,

    #[error("Tab has no session")]
    Missing,

    #[error("Session rejected input: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Input side of a terminal session
pub trait TerminalSession {
    /// Write raw bytes to the session
    fn send_input(&self, bytes: &[u8]) -> Result<()>;
}

/// Shared handle to a session, held by its tab
pub type SessionHandle = Rc<dyn TerminalSession>;

/// In-memory session that records everything written to it
#[derive(Default)]
pub struct BufferSession {
    received: RefCell<Vec<u8>>,
    writes: Cell<usize>,
    closed: Cell<bool>,
}

impl BufferSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session wrapped in a shareable handle
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// All bytes received so far
    pub fn received(&self) -> Vec<u8> {
        self.received.borrow().clone()
    }

    /// Number of successful `send_input` calls
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Drain the received bytes
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.received.borrow_mut())
    }

    /// Simulate the underlying connection going away
    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl TerminalSession for BufferSession {
    fn send_input(&self, bytes: &[u8]) -> Result<()> {
        if self.closed.get() {
            return Err(SessionError::Closed);
        }
        self.received.borrow_mut().extend_from_slice(bytes);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl fmt::Debug for BufferSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferSession")
            .field("received", &self.received.borrow().len())
            .field("closed", &self.closed.get())
            .finish()
    }
}

/// Render bytes the way a terminal log would show them (`\x1b[A`, `\n`, ...)
pub fn escape_bytes(bytes: &[u8]) -> String {
    bytes.iter().flat_map(|&b| std::ascii::escape_default(b)).map(char::from).collect()
}
