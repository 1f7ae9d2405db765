//! Deterministic shortcut table and the merge of user, imported and aliased entries.
//!
//! Uses a BTreeMap keyed by combo so iteration order never depends on hashing.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use super::types::KeyCombo;

/// Maximum number of alias hops followed before giving up.
///
/// Chains that cycle or run longer than this resolve to nothing.
pub const MAX_ALIAS_DEPTH: usize = 8;

/// Where a shortcut entry came from.
///
/// Priority order (highest first): User > everything imported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShortcutSource {
    /// Defined in `configured_shortcuts` of the config file
    User,
    /// GNOME window manager keybindings
    WindowManager,
    /// GNOME settings-daemon media keys
    Media,
    /// GNOME shell keybindings
    Shell,
}

impl ShortcutSource {
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::WindowManager => "window_manager",
            Self::Media => "media",
            Self::Shell => "shell",
        }
    }
}

/// A shortcut with its description and origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutEntry {
    pub combo: KeyCombo,
    pub description: String,
    pub source: ShortcutSource,
    /// Set when this entry was produced by a key alias: the combo the alias points at.
    pub alias_of: Option<KeyCombo>,
}

impl ShortcutEntry {
    pub fn new(combo: KeyCombo, description: impl Into<String>, source: ShortcutSource) -> Self {
        Self {
            combo,
            description: description.into(),
            source,
            alias_of: None,
        }
    }

    pub fn user(combo: KeyCombo, description: impl Into<String>) -> Self {
        Self::new(combo, description, ShortcutSource::User)
    }
}

/// Immutable mapping from combo to entry. Built by [`merge`], never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutTable {
    entries: BTreeMap<KeyCombo, ShortcutEntry>,
}

impl ShortcutTable {
    pub fn get(&self, combo: &KeyCombo) -> Option<&ShortcutEntry> {
        self.entries.get(combo)
    }

    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.entries.contains_key(combo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcutEntry> {
        self.entries.values()
    }

    pub fn user_count(&self) -> usize {
        self.iter().filter(|e| e.source.is_user()).count()
    }
}

/// Merge user shortcuts, imported shortcuts and key aliases into one table.
///
/// 1. User entries go in first; a later user entry with the same combo overwrites.
/// 2. Imported entries only fill combos no user entry defined; among imported
///    entries the last one wins.
/// 3. Each alias `(trigger, target)` whose target resolves, directly or through
///    other aliases within [`MAX_ALIAS_DEPTH`] hops, gets an entry at `trigger`
///    copying the resolved description and source. An alias replaces an
///    imported entry at its trigger but never a user entry.
pub fn merge(
    user: impl IntoIterator<Item = ShortcutEntry>,
    imported: impl IntoIterator<Item = ShortcutEntry>,
    aliases: &[(KeyCombo, KeyCombo)],
) -> ShortcutTable {
    let mut entries: BTreeMap<KeyCombo, ShortcutEntry> = BTreeMap::new();

    for entry in user {
        if let Some(entry) = with_description(entry) {
            entries.insert(entry.combo.clone(), entry);
        }
    }
    let user_combos: HashSet<KeyCombo> = entries.keys().cloned().collect();

    for entry in imported {
        if user_combos.contains(&entry.combo) {
            debug!(
                combo = %entry.combo,
                source = entry.source.as_str(),
                "Imported shortcut shadowed by user shortcut"
            );
            continue;
        }
        if let Some(entry) = with_description(entry) {
            entries.insert(entry.combo.clone(), entry);
        }
    }

    let alias_map: HashMap<&KeyCombo, &KeyCombo> =
        aliases.iter().map(|(trigger, target)| (trigger, target)).collect();

    let mut aliased = Vec::new();
    for (trigger, target) in aliases {
        if user_combos.contains(trigger) {
            debug!(trigger = %trigger, "Alias trigger defined by user, skipping");
            continue;
        }
        match resolve_alias(&entries, &alias_map, target) {
            Some(resolved) => aliased.push(ShortcutEntry {
                combo: trigger.clone(),
                description: resolved.description.clone(),
                source: resolved.source,
                alias_of: Some(target.clone()),
            }),
            None => debug!(trigger = %trigger, target = %target, "Alias target does not resolve"),
        }
    }
    for entry in aliased {
        entries.insert(entry.combo.clone(), entry);
    }

    ShortcutTable { entries }
}

/// Follow `target` through the alias map until it hits a table entry.
fn resolve_alias<'a>(
    entries: &'a BTreeMap<KeyCombo, ShortcutEntry>,
    alias_map: &HashMap<&KeyCombo, &KeyCombo>,
    target: &KeyCombo,
) -> Option<&'a ShortcutEntry> {
    let mut current = target;
    for _ in 0..MAX_ALIAS_DEPTH {
        if let Some(entry) = entries.get(current) {
            return Some(entry);
        }
        current = alias_map.get(current)?;
    }
    None
}

fn with_description(entry: ShortcutEntry) -> Option<ShortcutEntry> {
    if entry.description.trim().is_empty() {
        warn!(
            combo = %entry.combo,
            source = entry.source.as_str(),
            "Shortcut has an empty description, skipping"
        );
        return None;
    }
    Some(entry)
}
