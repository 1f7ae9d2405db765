//! Keyboard shortcut resolution.
//!
//! This module provides:
//! - Combo normalization (`"ctrl+alt+t"` and `"Alt+Ctrl+T"` are the same chord)
//! - The merge of user, imported and aliased shortcuts into one table
//! - Modifier-state matching for the popup
//!
//! # Example
//!
//! ```ignore
//! use shortcut_helper::shortcuts::{match_modifiers, merge, normalize, Modifiers, ShortcutEntry};
//!
//! let copy = ShortcutEntry::user(normalize("Ctrl+C")?, "Copy");
//! let table = merge(vec![copy], vec![], &[]);
//! let shown = match_modifiers(&table, Modifiers::CTRL);
//! ```

mod matcher;
mod registry;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;

pub use types::{canonicalize_key, normalize, KeyCombo, Modifiers, ShortcutParseError};

pub use registry::{merge, ShortcutEntry, ShortcutSource, ShortcutTable, MAX_ALIAS_DEPTH};

pub use matcher::match_modifiers;
