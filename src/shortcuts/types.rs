//! Core shortcut types: modifier sets, key combos and the combo normalizer.
//!
//! This module provides:
//! - `Modifiers` - Set of modifier keys (Ctrl, Super, Alt, Shift)
//! - `KeyCombo` - A modifier set plus exactly one key
//! - `ShortcutParseError` - Detailed parse errors for log output
//! - `normalize` - Parses `"Ctrl+Alt+T"` style strings into a `KeyCombo`
//!
//! Combos parsed from the config file and combos translated from the desktop
//! keybinding store compare equal iff they denote the same physical chord.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a shortcut string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut string is empty")]
    Empty,
    #[error("shortcut contains an empty token")]
    EmptyToken,
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("shortcut has more than one key: '{0}' and '{1}'")]
    MultipleKeys(String, String),
    #[error("unknown token '{0}' in shortcut")]
    UnknownToken(String),
}

bitflags! {
    /// Modifier keys held as part of a combo or currently pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const SUPER = 1 << 1;
        const ALT = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

/// Display order used for canonical strings and popup titles.
const MODIFIER_ORDER: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "Ctrl"),
    (Modifiers::SUPER, "Super"),
    (Modifiers::ALT, "Alt"),
    (Modifiers::SHIFT, "Shift"),
];

impl Modifiers {
    /// Map a single modifier token (case-insensitive) to its flag.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "ctrl" | "control" | "primary" => Some(Self::CTRL),
            "super" | "win" | "meta" | "mod4" => Some(Self::SUPER),
            "alt" | "mod1" => Some(Self::ALT),
            "shift" => Some(Self::SHIFT),
            _ => None,
        }
    }

    /// Modifier names in canonical order, e.g. `["Ctrl", "Alt"]`.
    pub fn names(&self) -> Vec<&'static str> {
        MODIFIER_ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Special keys recognized by name. Matching is case-sensitive.
const SPECIAL_KEYS: &[&str] = &[
    "Tab",
    "Home",
    "End",
    "PageUp",
    "PageDown",
    "Left",
    "Right",
    "Up",
    "Down",
    "Enter",
    "Space",
    "Esc",
    "Backspace",
    "Delete",
    "Insert",
];

/// Symbols accepted as a key.
const SYMBOL_KEYS: &[char] = &['=', '-'];

/// Canonicalize a non-modifier token, or `None` if it is not a known key.
pub fn canonicalize_key(token: &str) -> Option<String> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase().to_string());
        }
        if SYMBOL_KEYS.contains(&c) {
            return Some(c.to_string());
        }
        return None;
    }

    if SPECIAL_KEYS.contains(&token) || is_function_key(token) {
        return Some(token.to_string());
    }
    None
}

/// `F1` through `F12`.
fn is_function_key(token: &str) -> bool {
    token
        .strip_prefix('F')
        .filter(|n| !n.starts_with('0'))
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=12).contains(&n))
}

/// A keyboard chord: a set of modifiers plus exactly one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    key: String,
}

impl KeyCombo {
    /// Build a combo from a modifier set and a key token.
    pub fn new(modifiers: Modifiers, key: &str) -> Result<Self, ShortcutParseError> {
        let key = canonicalize_key(key)
            .ok_or_else(|| ShortcutParseError::UnknownToken(key.to_string()))?;
        Ok(Self { modifiers, key })
    }

    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        normalize(s)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical string form, e.g. `Ctrl+Alt+T`. Re-parses to an equal combo.
    pub fn to_canonical_string(&self) -> String {
        let mut parts: Vec<&str> = self.modifiers.names();
        parts.push(&self.key);
        parts.join("+")
    }

    /// Upper-case form shown in the popup, e.g. `CTRL + ALT + T`.
    pub fn display_label(&self) -> String {
        let mut parts: Vec<String> = self
            .modifiers
            .names()
            .into_iter()
            .map(str::to_uppercase)
            .collect();
        parts.push(self.key.to_uppercase());
        parts.join(" + ")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl FromStr for KeyCombo {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Parse a `+`-joined combo string into a `KeyCombo`.
///
/// Modifier tokens are case-insensitive. Single letters and digits are
/// case-insensitive; special key names (`Tab`, `PageUp`, ...) are not.
/// `Shift+Tab` falls out of the grammar as Shift plus `Tab`.
pub fn normalize(raw: &str) -> Result<KeyCombo, ShortcutParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ShortcutParseError::Empty);
    }

    let mut modifiers = Modifiers::empty();
    let mut key: Option<String> = None;

    for token in raw.split('+').map(str::trim) {
        if token.is_empty() {
            return Err(ShortcutParseError::EmptyToken);
        }
        if let Some(flag) = Modifiers::from_token(token) {
            modifiers |= flag;
            continue;
        }
        let canonical = canonicalize_key(token)
            .ok_or_else(|| ShortcutParseError::UnknownToken(token.to_string()))?;
        if let Some(existing) = key.take() {
            return Err(ShortcutParseError::MultipleKeys(existing, canonical));
        }
        key = Some(canonical);
    }

    let key = key.ok_or(ShortcutParseError::MissingKey)?;
    Ok(KeyCombo { modifiers, key })
}
