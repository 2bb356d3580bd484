//! Window Manager - the top-level owner of tab state and the broadcast session

use std::time::Instant;

use tracing::debug;

use super::registry::{TabRegistry, TabSource, TabView};
use super::tab::{Tab, TabId};
use crate::broadcast::{terminal_tabs, BroadcastSession, DispatchReport, KeyDisposition};
use crate::ui::keymapper::KeyInput;

/// Window Manager - one registry and exactly one broadcast session
#[derive(Debug, Default)]
pub struct WindowManager {
    registry: TabRegistry,
    broadcast: BroadcastSession,
}

impl WindowManager {
    /// Create a window manager over an initial tab collection
    pub fn new(tabs: Vec<Tab>, current: Option<TabId>) -> Self {
        Self {
            registry: TabRegistry::with_tabs(tabs, current),
            broadcast: BroadcastSession::new(),
        }
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn broadcast(&self) -> &BroadcastSession {
        &self.broadcast
    }

    /// Accept a new tab collection from the tab source
    pub fn sync(&mut self, tabs: Vec<Tab>, current: Option<TabId>) {
        self.registry.sync(tabs, current);
        self.broadcast.retain_present(self.registry.tabs());
    }

    pub fn tab_views(&self) -> Vec<TabView> {
        self.registry.tab_views()
    }

    /// Tab clicked
    pub fn activate_tab(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        self.registry.activate(id, source)
    }

    /// Split icon clicked
    pub fn split_tab(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        self.registry.split(id, source)
    }

    /// Close icon clicked
    pub fn close_tab(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        self.registry.close(id, source)
    }

    /// Terminal tabs offered for broadcast selection
    pub fn broadcast_candidates(&self) -> Vec<&Tab> {
        terminal_tabs(self.registry.tabs()).collect()
    }

    /// Toggle broadcast mode. Returns the new state.
    pub fn toggle_broadcast(&mut self) -> bool {
        if self.broadcast.is_active() {
            self.broadcast.stop();
        } else {
            self.broadcast.start();
        }
        self.broadcast.is_active()
    }

    pub fn start_broadcast(&mut self) {
        self.broadcast.start();
    }

    pub fn stop_broadcast(&mut self) {
        self.broadcast.stop();
    }

    pub fn toggle_broadcast_target(&mut self, id: TabId) -> bool {
        self.broadcast.toggle_selection(id, self.registry.tabs())
    }

    /// Key pressed in the capture input
    pub fn handle_key(&self, input: &KeyInput) -> KeyDisposition {
        let disposition = self.broadcast.handle_key(input, self.registry.tabs());
        if disposition == KeyDisposition::Consumed {
            debug!("Broadcast {:?} to {} tab(s)", input.key, self.broadcast.selected_count());
        }
        disposition
    }

    /// Send raw bytes to the broadcast selection
    pub fn broadcast_bytes(&self, bytes: &[u8]) -> DispatchReport {
        self.broadcast.dispatch(bytes, self.registry.tabs())
    }

    /// See [`BroadcastSession::poll_focus`]
    pub fn poll_focus(&mut self, now: Instant) -> bool {
        self.broadcast.poll_focus(now)
    }
}
