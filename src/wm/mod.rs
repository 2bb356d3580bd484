//! Window Manager - tab registry and action eligibility.
//!
//! - **tab**: Tab identity, kind and session handle
//! - **eligibility**: Pure activate/split/close rules over a state snapshot
//! - **registry**: `TabRegistry` holding tabs, the active tab and the split set
//! - **manager**: Top-level `WindowManager` owning the registry and the single
//!   broadcast session
//!
//! # Module Hierarchy
//!
//! ```text
//! wm/
//! ├── mod.rs          - Module exports
//! ├── manager.rs      - WindowManager (top-level coordinator)
//! ├── registry.rs     - TabRegistry + TabSource collaborator trait
//! ├── eligibility.rs  - can_activate / can_split / can_close
//! └── tab.rs          - Tab, TabKind
//! ```

pub mod tab;
pub mod eligibility;
pub mod registry;
pub mod manager;

pub use tab::{Tab, TabId, TabKind};
pub use eligibility::{Snapshot, TabActions, MAX_SPLIT_TABS};
pub use registry::{TabRegistry, TabSource, TabView};
pub use manager::WindowManager;
