//! Configuration type definitions
//!
//! This module contains all the struct and enum definitions for configuration.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use tracing::warn;

use super::defaults::*;
use crate::error::ConfigError;
use crate::importer::ImportCategory;
use crate::shortcuts::{normalize, KeyCombo, ShortcutEntry};

// ============================================
// COMBO MAP
// ============================================

/// A JSON object of raw combo strings, kept in document order.
///
/// Order matters: when two raw strings normalize to the same combo, the later
/// one wins during merge. Raw keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboMap {
    pairs: Vec<(String, String)>,
}

impl ComboMap {
    /// Insert or replace the value for a raw key, keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComboMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ComboMap::default();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ComboMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (k, v) in &self.pairs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComboMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ComboMapVisitor;

        impl<'de> Visitor<'de> for ComboMapVisitor {
            type Value = ComboMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping key combos to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ComboMap, A::Error> {
                // A repeated raw key keeps its first position and its last value
                let mut map = ComboMap {
                    pairs: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ComboMapVisitor)
    }
}

// ============================================
// POPUP SETTINGS
// ============================================

/// Where the popup appears on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopupPosition {
    #[default]
    BottomRight,
}

/// Settings handed to the renderer along with the rows to show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupSettings {
    #[serde(default)]
    pub position: PopupPosition,
    /// Hide delay in milliseconds (default: 3000)
    #[serde(default = "default_popup_timeout")]
    pub timeout: u64,
    /// Window opacity, 0.0 - 1.0 (default: 0.95)
    #[serde(default = "default_popup_opacity")]
    pub opacity: f32,
    /// Font size in pixels (default: 12)
    #[serde(default = "default_popup_font_size")]
    pub font_size: u32,
}

fn default_popup_timeout() -> u64 {
    DEFAULT_POPUP_TIMEOUT_MS
}
fn default_popup_opacity() -> f32 {
    DEFAULT_POPUP_OPACITY
}
fn default_popup_font_size() -> u32 {
    DEFAULT_POPUP_FONT_SIZE
}

impl Default for PopupSettings {
    fn default() -> Self {
        PopupSettings {
            position: PopupPosition::default(),
            timeout: DEFAULT_POPUP_TIMEOUT_MS,
            opacity: DEFAULT_POPUP_OPACITY,
            font_size: DEFAULT_POPUP_FONT_SIZE,
        }
    }
}

impl PopupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid(format!(
                "popup_settings.opacity must be between 0.0 and 1.0, got {}",
                self.opacity
            )));
        }
        if self.font_size == 0 {
            return Err(ConfigError::Invalid(
                "popup_settings.font_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================
// IMPORT SOURCES
// ============================================

/// Which desktop keybinding categories the importer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSources {
    #[serde(default = "default_import_window_manager")]
    pub window_manager: bool,
    #[serde(default = "default_import_media_keys")]
    pub media_keys: bool,
    #[serde(default = "default_import_shell")]
    pub shell: bool,
}

fn default_import_window_manager() -> bool {
    DEFAULT_IMPORT_WINDOW_MANAGER
}
fn default_import_media_keys() -> bool {
    DEFAULT_IMPORT_MEDIA_KEYS
}
fn default_import_shell() -> bool {
    DEFAULT_IMPORT_SHELL
}

impl Default for ImportSources {
    fn default() -> Self {
        ImportSources {
            window_manager: DEFAULT_IMPORT_WINDOW_MANAGER,
            media_keys: DEFAULT_IMPORT_MEDIA_KEYS,
            shell: DEFAULT_IMPORT_SHELL,
        }
    }
}

impl ImportSources {
    pub fn is_enabled(&self, category: ImportCategory) -> bool {
        match category {
            ImportCategory::WindowManager => self.window_manager,
            ImportCategory::MediaKeys => self.media_keys,
            ImportCategory::Shell => self.shell,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.window_manager || self.media_keys || self.shell
    }
}

// ============================================
// MAIN CONFIG
// ============================================

/// The whole config file.
///
/// Unknown top-level keys are kept in `extra` so saving never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// User shortcuts: raw combo -> description
    #[serde(default)]
    pub configured_shortcuts: ComboMap,
    /// Legacy name for `configured_shortcuts`, read only when that is empty
    #[serde(default, rename = "shortcuts", skip_serializing)]
    pub legacy_shortcuts: ComboMap,
    #[serde(default)]
    pub popup_settings: PopupSettings,
    /// Raw trigger combo -> raw target combo
    #[serde(default)]
    pub key_aliases: ComboMap,
    #[serde(default)]
    pub import_sources: ImportSources,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    /// Check value ranges serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.popup_settings.validate()
    }

    /// The user shortcuts in effect: `configured_shortcuts`, or the legacy
    /// `shortcuts` map when the former is missing or empty.
    pub fn shortcuts(&self) -> &ComboMap {
        if self.configured_shortcuts.is_empty() {
            &self.legacy_shortcuts
        } else {
            &self.configured_shortcuts
        }
    }

    /// Move legacy `shortcuts` into `configured_shortcuts` before saving, so
    /// the file keeps the user's entries under the current key.
    pub fn migrate_legacy_shortcuts(&mut self) {
        if self.configured_shortcuts.is_empty() && !self.legacy_shortcuts.is_empty() {
            self.configured_shortcuts = std::mem::take(&mut self.legacy_shortcuts);
        } else {
            self.legacy_shortcuts = ComboMap::default();
        }
    }

    /// Normalize the user shortcuts into user entries, in document order.
    ///
    /// Entries that fail to parse are logged and skipped.
    pub fn user_entries(&self) -> Vec<ShortcutEntry> {
        self.shortcuts()
            .iter()
            .filter_map(|(raw, description)| match normalize(raw) {
                Ok(combo) => Some(ShortcutEntry::user(combo, description)),
                Err(e) => {
                    warn!(combo = raw, error = %e, "Skipping configured shortcut");
                    None
                }
            })
            .collect()
    }

    /// Normalize `key_aliases` into (trigger, target) pairs.
    ///
    /// Aliases with either side unparseable are logged and skipped.
    pub fn aliases(&self) -> Vec<(KeyCombo, KeyCombo)> {
        self.key_aliases
            .iter()
            .filter_map(|(trigger, target)| match (normalize(trigger), normalize(target)) {
                (Ok(t), Ok(g)) => Some((t, g)),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(trigger, target, error = %e, "Skipping key alias");
                    None
                }
            })
            .collect()
    }
}
