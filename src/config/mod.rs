//! Configuration module - Shortcut definitions and popup preferences
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.config/shortcut-helper/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//! - Saving the config back (import-only mode)
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, PopupSettings, etc.)
//! - `loader` - File system loading, saving and validation

mod defaults;
mod loader;
mod types;

pub use types::{ComboMap, Config, ImportSources, PopupPosition, PopupSettings};

pub use loader::{config_path, load_config, load_config_or_default, save_config};

#[cfg(test)]
pub use defaults::{DEFAULT_POPUP_FONT_SIZE, DEFAULT_POPUP_OPACITY, DEFAULT_POPUP_TIMEOUT_MS};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
