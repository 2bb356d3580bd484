//! Input handling.
//!
//! - **keymapper**: Key presses to the byte sequences a shell expects
//!
//! Rendering belongs to the host UI; this crate only hands it view models
//! (`wm::TabView`) and consumes its key events.

pub mod keymapper;

pub use keymapper::{Key, KeyInput, KeyMapper, Modifiers};
