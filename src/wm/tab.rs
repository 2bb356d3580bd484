//! Tab - one user-visible unit of the multiplexer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::session::SessionHandle;

/// Unique identifier for a tab
pub type TabId = u64;

/// What a tab shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    Home,
    Terminal,
    Server,
    FileManager,
    SshManager,
    Admin,
}

impl TabKind {
    pub const ALL: [TabKind; 6] = [
        TabKind::Home,
        TabKind::Terminal,
        TabKind::Server,
        TabKind::FileManager,
        TabKind::SshManager,
        TabKind::Admin,
    ];

    /// Kinds that can be pooled into a split view
    pub fn is_splittable(self) -> bool {
        matches!(self, TabKind::Terminal | TabKind::Server | TabKind::FileManager)
    }

    /// Kinds that occupy the whole viewport and never share it with panes
    pub fn is_full_viewport(self) -> bool {
        matches!(self, TabKind::Home | TabKind::SshManager | TabKind::Admin)
    }

    pub fn is_terminal(self) -> bool {
        self == TabKind::Terminal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Home => "home",
            TabKind::Terminal => "terminal",
            TabKind::Server => "server",
            TabKind::FileManager => "file_manager",
            TabKind::SshManager => "ssh_manager",
            TabKind::Admin => "admin",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown tab kind: {}", s))
    }
}

/// A tab as supplied by the tab-management collaborator
#[derive(Clone)]
pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    pub kind: TabKind,
    /// Display title
    pub title: String,
    /// Input handle for terminal-bearing tabs
    session: Option<SessionHandle>,
}

impl Tab {
    /// Create a tab with no session attached
    pub fn new(id: TabId, kind: TabKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            session: None,
        }
    }

    /// Create a terminal tab bound to a session
    pub fn terminal(id: TabId, title: impl Into<String>, session: SessionHandle) -> Self {
        Self::new(id, TabKind::Terminal, title).with_session(session)
    }

    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

/// Find a tab by id
pub fn find_tab(tabs: &[Tab], id: TabId) -> Option<&Tab> {
    tabs.iter().find(|tab| tab.id == id)
}
