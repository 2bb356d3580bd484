//! Tab registry - ordered tabs, the active tab and the split set

use tracing::debug;

use super::eligibility::{self, Snapshot, TabActions, MAX_SPLIT_TABS};
use super::tab::{find_tab, Tab, TabId, TabKind};

/// The collaborator that owns the tab collection.
///
/// The registry only calls these once the matching predicate has passed; the
/// source is the sole authority on actually mutating tabs.
pub trait TabSource {
    fn request_activate(&mut self, id: TabId);
    fn request_split(&mut self, id: TabId);
    fn request_close(&mut self, id: TabId);
}

/// Everything a tab bar needs to draw one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub id: TabId,
    pub kind: TabKind,
    pub title: String,
    pub is_active: bool,
    pub is_split: bool,
    pub actions: TabActions,
    /// Whether a close control is offered at all
    pub show_close: bool,
    /// Whether a split control is offered at all
    pub show_split: bool,
}

/// Tab registry
#[derive(Debug, Default)]
pub struct TabRegistry {
    /// All tabs, in display order
    tabs: Vec<Tab>,
    /// Currently active tab
    current: Option<TabId>,
    /// Tabs shown in split view, in the order they were added
    split: Vec<TabId>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry already holding `tabs`
    pub fn with_tabs(tabs: Vec<Tab>, current: Option<TabId>) -> Self {
        let mut registry = Self::new();
        registry.sync(tabs, current);
        registry
    }

    /// Take a new tab collection from the collaborator.
    ///
    /// Order is kept exactly as given. Split entries and an active id that no
    /// longer name a present tab are dropped.
    pub fn sync(&mut self, tabs: Vec<Tab>, current: Option<TabId>) {
        self.tabs = tabs;
        self.current = current.filter(|&id| find_tab(&self.tabs, id).is_some());

        let before = self.split.len();
        let tabs = &self.tabs;
        self.split.retain(|&id| find_tab(tabs, id).is_some());
        if self.split.len() != before {
            debug!("Dropped {} vanished tab(s) from split view", before - self.split.len());
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        find_tab(&self.tabs, id)
    }

    pub fn current(&self) -> Option<TabId> {
        self.current
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current.and_then(|id| self.tab(id))
    }

    pub fn split_tabs(&self) -> &[TabId] {
        &self.split
    }

    pub fn is_split_active(&self) -> bool {
        !self.split.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.tabs, self.current, &self.split)
    }

    pub fn can_activate(&self, id: TabId) -> bool {
        eligibility::can_activate(&self.snapshot(), id)
    }

    pub fn can_split(&self, id: TabId) -> bool {
        eligibility::can_split(&self.snapshot(), id)
    }

    pub fn can_close(&self, id: TabId) -> bool {
        eligibility::can_close(&self.snapshot(), id)
    }

    pub fn actions(&self, id: TabId) -> TabActions {
        TabActions::evaluate(&self.snapshot(), id)
    }

    /// View models for every tab, in display order
    pub fn tab_views(&self) -> Vec<TabView> {
        let snap = self.snapshot();
        self.tabs
            .iter()
            .map(|tab| TabView {
                id: tab.id,
                kind: tab.kind,
                title: tab.title.clone(),
                is_active: snap.is_current(tab.id),
                is_split: snap.is_split(tab.id),
                actions: TabActions::evaluate(&snap, tab.id),
                show_close: eligibility::has_close_affordance(tab.kind),
                show_split: eligibility::has_split_affordance(tab.kind),
            })
            .collect()
    }

    /// Make `id` the active tab. Returns false when refused.
    pub fn activate(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        if !self.can_activate(id) {
            debug!("Activate refused for tab {}", id);
            return false;
        }
        self.current = Some(id);
        source.request_activate(id);
        true
    }

    /// Toggle `id` in the split set. Returns false when refused.
    pub fn split(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        if !self.can_split(id) {
            debug!("Split refused for tab {}", id);
            return false;
        }
        if let Some(pos) = self.split.iter().position(|&s| s == id) {
            self.split.remove(pos);
        } else {
            self.split.push(id);
        }
        debug_assert!(self.split.len() <= MAX_SPLIT_TABS);
        source.request_split(id);
        true
    }

    /// Ask the source to close `id`. Returns false when refused.
    ///
    /// Removal itself, and picking the next active tab, happen in the source;
    /// the registry sees the outcome on the next `sync`.
    pub fn close(&mut self, id: TabId, source: &mut dyn TabSource) -> bool {
        if !self.can_close(id) {
            debug!("Close refused for tab {}", id);
            return false;
        }
        source.request_close(id);
        true
    }
}
