//! Eligibility rules for tab actions
//!
//! Every rule is a pure function of a [`Snapshot`]: the tab list, the active
//! tab and the split set. Nothing here mutates state or remembers anything
//! between calls, so the rules can be evaluated for every tab after each
//! change.

use super::tab::{find_tab, Tab, TabId, TabKind};

/// Maximum number of tabs shown together in split view
pub const MAX_SPLIT_TABS: usize = 3;

/// Read-only view of the registry state
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tabs: &'a [Tab],
    pub current: Option<TabId>,
    pub split: &'a [TabId],
}

impl<'a> Snapshot<'a> {
    pub fn new(tabs: &'a [Tab], current: Option<TabId>, split: &'a [TabId]) -> Self {
        Self { tabs, current, split }
    }

    pub fn is_split_active(&self) -> bool {
        !self.split.is_empty()
    }

    pub fn is_split(&self, id: TabId) -> bool {
        self.split.contains(&id)
    }

    pub fn is_current(&self, id: TabId) -> bool {
        self.current == Some(id)
    }

    /// Kind of the active tab, if it is present
    pub fn current_kind(&self) -> Option<TabKind> {
        self.current.and_then(|id| find_tab(self.tabs, id)).map(|tab| tab.kind)
    }

    fn kind_of(&self, id: TabId) -> Option<TabKind> {
        find_tab(self.tabs, id).map(|tab| tab.kind)
    }
}

/// Whether `id` may be added to or removed from the split set
pub fn can_split(snap: &Snapshot<'_>, id: TabId) -> bool {
    let Some(kind) = snap.kind_of(id) else {
        return false;
    };
    if !kind.is_splittable() || snap.is_current(id) {
        return false;
    }
    if snap.split.len() >= MAX_SPLIT_TABS && !snap.is_split(id) {
        return false;
    }
    !snap.current_kind().is_some_and(TabKind::is_full_viewport)
}

/// Whether `id` may become the active tab
pub fn can_activate(snap: &Snapshot<'_>, id: TabId) -> bool {
    let Some(kind) = snap.kind_of(id) else {
        return false;
    };
    if snap.is_split(id) {
        return false;
    }
    !(kind.is_full_viewport() && snap.is_split_active())
}

/// Whether `id` may be closed
pub fn can_close(snap: &Snapshot<'_>, id: TabId) -> bool {
    let Some(kind) = snap.kind_of(id) else {
        return false;
    };
    if !has_close_affordance(kind) || snap.is_split(id) {
        return false;
    }
    !(snap.is_split_active() && snap.is_current(id))
}

/// Home has no close control at all
pub fn has_close_affordance(kind: TabKind) -> bool {
    kind != TabKind::Home
}

pub fn has_split_affordance(kind: TabKind) -> bool {
    kind.is_splittable()
}

/// The three action predicates for one tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabActions {
    pub activate: bool,
    pub split: bool,
    pub close: bool,
}

impl TabActions {
    pub fn evaluate(snap: &Snapshot<'_>, id: TabId) -> Self {
        Self {
            activate: can_activate(snap, id),
            split: can_split(snap, id),
            close: can_close(snap, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(kinds: &[TabKind]) -> Vec<Tab> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Tab::new(i as TabId + 1, kind, format!("{}", kind)))
            .collect()
    }

    #[test]
    fn test_full_viewport_kinds_never_split() {
        let tabs = tabs(&TabKind::ALL);
        for current in [None, Some(2)] {
            for split in [vec![], vec![3]] {
                let snap = Snapshot::new(&tabs, current, &split);
                for tab in &tabs {
                    if tab.kind.is_full_viewport() {
                        assert!(!can_split(&snap, tab.id), "{} splittable", tab.kind);
                    }
                }
            }
        }
    }

    #[test]
    fn test_active_tab_cannot_split() {
        let tabs = tabs(&[TabKind::Terminal, TabKind::Terminal]);
        let snap = Snapshot::new(&tabs, Some(1), &[]);
        assert!(!can_split(&snap, 1));
        assert!(can_split(&snap, 2));

        // Still refused once a split is in progress
        let split = [2];
        let snap = Snapshot::new(&tabs, Some(1), &split);
        assert!(!can_split(&snap, 1));
    }

    #[test]
    fn test_split_capacity_allows_removal_only() {
        let tabs = tabs(&[TabKind::Terminal; 5]);
        let split = [2, 3, 4];
        let snap = Snapshot::new(&tabs, Some(1), &split);
        assert!(!can_split(&snap, 5));
        assert!(can_split(&snap, 3));
    }

    #[test]
    fn test_full_viewport_current_blocks_split() {
        for kind in [TabKind::Home, TabKind::SshManager, TabKind::Admin] {
            let tabs = tabs(&[kind, TabKind::Terminal]);
            let snap = Snapshot::new(&tabs, Some(1), &[]);
            assert!(!can_split(&snap, 2), "current {}", kind);
        }
        let tabs = tabs(&[TabKind::Server, TabKind::FileManager]);
        let snap = Snapshot::new(&tabs, Some(1), &[]);
        assert!(can_split(&snap, 2));
    }

    #[test]
    fn test_no_current_tab_allows_split() {
        let tabs = tabs(&[TabKind::Terminal]);
        let snap = Snapshot::new(&tabs, None, &[]);
        assert!(can_split(&snap, 1));
    }

    #[test]
    fn test_split_members_cannot_activate() {
        let tabs = tabs(&[TabKind::Terminal, TabKind::Server]);
        let split = [2];
        let snap = Snapshot::new(&tabs, Some(1), &split);
        assert!(!can_activate(&snap, 2));
        assert!(can_activate(&snap, 1));
    }

    #[test]
    fn test_ssh_manager_unreachable_during_split() {
        // Home active, ssh manager tab, a split in progress
        let tabs = tabs(&[TabKind::Home, TabKind::SshManager, TabKind::Terminal]);
        let split = [3];
        let snap = Snapshot::new(&tabs, Some(1), &split);
        assert!(!can_activate(&snap, 2));

        let snap = Snapshot::new(&tabs, Some(1), &[]);
        assert!(can_activate(&snap, 2));
    }

    #[test]
    fn test_close_rules() {
        let tabs = tabs(&[TabKind::Home, TabKind::Terminal, TabKind::Terminal, TabKind::Admin]);

        let snap = Snapshot::new(&tabs, Some(2), &[]);
        assert!(!can_close(&snap, 1), "home is never closable");
        assert!(can_close(&snap, 2), "active tab closable without split");
        assert!(can_close(&snap, 4));

        let split = [3];
        let snap = Snapshot::new(&tabs, Some(2), &split);
        assert!(!can_close(&snap, 2), "active tab entangled in split");
        assert!(!can_close(&snap, 3), "split member");
        assert!(can_close(&snap, 4));
    }

    #[test]
    fn test_unknown_tab_refuses_everything() {
        let tabs = tabs(&[TabKind::Terminal]);
        let snap = Snapshot::new(&tabs, Some(1), &[]);
        assert_eq!(TabActions::evaluate(&snap, 42), TabActions::default());
    }

    #[test]
    fn test_affordances() {
        assert!(!has_close_affordance(TabKind::Home));
        assert!(has_close_affordance(TabKind::SshManager));
        assert!(has_split_affordance(TabKind::FileManager));
        assert!(!has_split_affordance(TabKind::Admin));
    }
}
