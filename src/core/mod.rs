//! Core session plumbing.
//!
//! - **session**: the input side of a terminal session as seen by this crate,
//!   plus an in-memory implementation used by the demo and tests
//!
//! The terminal emulator and its transport are external; a tab only carries a
//! `SessionHandle` to write into.

pub mod session;
