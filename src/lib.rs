//! tabcast - tab eligibility and keystroke broadcast for a terminal multiplexer
//!
//! Two pieces of logic sit behind a tab bar:
//!
//! - **Tab registry**: which tabs may be activated, split into the multi-pane
//!   view (up to three panes), or closed, given the active tab and split set
//! - **Broadcast**: type once and send the translated keystrokes to several
//!   terminal sessions at the same time
//!
//! # Example
//!
//! ```
//! use tabcast::core::session::BufferSession;
//! use tabcast::ui::KeyInput;
//! use tabcast::wm::{Tab, WindowManager};
//!
//! let web = BufferSession::shared();
//! let db = BufferSession::shared();
//! let tabs = vec![
//!     Tab::terminal(1, "web-1", web.clone()),
//!     Tab::terminal(2, "db-1", db.clone()),
//! ];
//! let mut wm = WindowManager::new(tabs, Some(1));
//! wm.start_broadcast();
//! wm.toggle_broadcast_target(1);
//! wm.toggle_broadcast_target(2);
//! wm.handle_key(&KeyInput::ctrl('c'));
//!
//! assert_eq!(web.received(), vec![0x03]);
//! assert_eq!(db.received(), vec![0x03]);
//! ```

pub mod broadcast;
pub mod config;
pub mod core;
pub mod ui;
pub mod wm;
