//! Shortcut Helper - shows the shortcuts reachable from the modifiers held down
//!
//! This library merges user-configured shortcuts with the desktop's own
//! keybindings and answers modifier changes with a popup view.

pub mod app;
pub mod config;
pub mod error;
pub mod importer;
pub mod logging;
pub mod popup;
pub mod shortcuts;
pub mod stdin_commands;
pub mod watcher;
