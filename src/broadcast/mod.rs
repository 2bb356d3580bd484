//! Broadcast session - type once, send to many terminals.
//!
//! While active, every key press is translated by [`KeyMapper`] and the
//! resulting bytes are written to each selected terminal tab's session.
//!
//! # Lifecycle
//!
//! ```text
//! stop ──start()──> active, nothing selected ──toggle_selection()──> active, N selected
//!   ^                                                                     │
//!   └───────────────────────────── stop() ────────────────────────────────┘
//! ```
//!
//! Delivery is per session: a session that rejects input is logged and
//! skipped, the rest still receive the bytes.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::session::SessionError;
use crate::ui::keymapper::{KeyInput, KeyMapper};
use crate::wm::tab::{find_tab, Tab, TabId};

/// Delay between `start()` and claiming focus for the capture input
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Whether a key event was used by the broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Bytes were sent; default handling should be suppressed
    Consumed,
    /// Left for normal UI handling
    Ignored,
}

/// Outcome of one dispatch
#[derive(Debug, Default, PartialEq)]
pub struct DispatchReport {
    pub delivered: Vec<TabId>,
    pub failed: Vec<(TabId, SessionError)>,
}

impl DispatchReport {
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty() && self.failed.is_empty()
    }
}

/// Selectable tabs for broadcast, in display order
pub fn terminal_tabs(tabs: &[Tab]) -> impl Iterator<Item = &Tab> {
    tabs.iter().filter(|tab| tab.kind.is_terminal())
}

/// Broadcast session state
#[derive(Debug, Default)]
pub struct BroadcastSession {
    active: bool,
    /// Selected tabs, in the order they were picked
    selected: Vec<TabId>,
    /// When the capture input should be focused
    focus_due: Option<Instant>,
}

impl BroadcastSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selected(&self) -> &[TabId] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: TabId) -> bool {
        self.selected.contains(&id)
    }

    /// The capture input is only enabled with something to send to
    pub fn accepts_input(&self) -> bool {
        self.active && !self.selected.is_empty()
    }

    /// Enter broadcast mode with an empty selection
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.active = true;
        self.selected.clear();
        self.focus_due = Some(now + FOCUS_DELAY);
        debug!("Broadcast started");
    }

    /// Leave broadcast mode, dropping the selection
    pub fn stop(&mut self) {
        self.active = false;
        self.selected.clear();
        self.focus_due = None;
        debug!("Broadcast stopped");
    }

    /// Returns true exactly once, when the deferred focus request is due
    pub fn poll_focus(&mut self, now: Instant) -> bool {
        match self.focus_due {
            Some(due) if now >= due => {
                self.focus_due = None;
                true
            }
            _ => false,
        }
    }

    /// Add or remove a terminal tab from the selection.
    ///
    /// Returns false if nothing changed: broadcast is off, or `id` is not a
    /// present terminal tab.
    pub fn toggle_selection(&mut self, id: TabId, tabs: &[Tab]) -> bool {
        if !self.active {
            return false;
        }
        if !find_tab(tabs, id).is_some_and(|tab| tab.kind.is_terminal()) {
            return false;
        }
        if let Some(pos) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
        debug!("Broadcast selection: {:?}", self.selected);
        true
    }

    /// Drop selections whose tab is gone or no longer a terminal
    pub fn retain_present(&mut self, tabs: &[Tab]) {
        self.selected
            .retain(|&id| find_tab(tabs, id).is_some_and(|tab| tab.kind.is_terminal()));
    }

    /// Translate and send one key press.
    pub fn handle_key(&self, input: &KeyInput, tabs: &[Tab]) -> KeyDisposition {
        if !self.accepts_input() {
            return KeyDisposition::Ignored;
        }
        match KeyMapper::translate(input) {
            Some(bytes) => {
                self.dispatch(&bytes, tabs);
                KeyDisposition::Consumed
            }
            None => KeyDisposition::Ignored,
        }
    }

    /// Send `bytes` to every selected session, in selection order.
    pub fn dispatch(&self, bytes: &[u8], tabs: &[Tab]) -> DispatchReport {
        let mut report = DispatchReport::default();
        if bytes.is_empty() {
            return report;
        }

        for &id in &self.selected {
            let Some(session) = find_tab(tabs, id).and_then(Tab::session) else {
                warn!("Tab {} has no session to broadcast to", id);
                report.failed.push((id, SessionError::Missing));
                continue;
            };
            match session.send_input(bytes) {
                Ok(()) => report.delivered.push(id),
                Err(e) => {
                    warn!("Broadcast to tab {} failed: {}", id, e);
                    report.failed.push((id, e));
                }
            }
        }
        report
    }
}
