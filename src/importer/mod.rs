//! System shortcut import from the desktop keybinding store.
//!
//! The store is queried one category at a time through [`KeybindingStore`] so
//! the import logic can run against fakes in tests. Raw combos arrive in GNOME
//! accelerator syntax (`<Control><Shift>c`) and are translated into the
//! `Ctrl+Shift+c` form before normalization.

mod gsettings;

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ImportSources;
use crate::shortcuts::{normalize, ShortcutEntry, ShortcutSource};

pub use gsettings::{humanize_action_name, parse_list_output, GsettingsStore};

/// Keybinding categories in the order they are imported.
///
/// When two categories bind the same combo, the later one wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportCategory {
    WindowManager,
    MediaKeys,
    Shell,
}

impl ImportCategory {
    pub const ALL: [ImportCategory; 3] = [Self::WindowManager, Self::MediaKeys, Self::Shell];

    /// GSettings schema holding this category's bindings.
    pub fn schema(&self) -> &'static str {
        match self {
            Self::WindowManager => "org.gnome.desktop.wm.keybindings",
            Self::MediaKeys => "org.gnome.settings-daemon.plugins.media-keys",
            Self::Shell => "org.gnome.shell.keybindings",
        }
    }

    /// Key used for this category in `import_sources`.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::WindowManager => "window_manager",
            Self::MediaKeys => "media_keys",
            Self::Shell => "shell",
        }
    }

    pub fn source(&self) -> ShortcutSource {
        match self {
            Self::WindowManager => ShortcutSource::WindowManager,
            Self::MediaKeys => ShortcutSource::Media,
            Self::Shell => ShortcutSource::Shell,
        }
    }
}

impl fmt::Display for ImportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// One binding as reported by the store, still in the store's syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBinding {
    pub combo: String,
    pub description: String,
}

impl RawBinding {
    pub fn new(combo: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            combo: combo.into(),
            description: description.into(),
        }
    }
}

/// Errors querying a single category. The import carries on with the others.
#[derive(Error, Debug)]
pub enum SourceQueryError {
    #[error("schema '{0}' is not installed")]
    SchemaMissing(String),

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Read-only access to the desktop keybinding store.
pub trait KeybindingStore {
    fn query_category(&self, category: ImportCategory) -> Result<Vec<RawBinding>, SourceQueryError>;
}

/// Import every enabled category into normalized entries.
///
/// Unbound values are skipped quietly, unparseable ones are logged and
/// skipped, and a category whose query fails contributes nothing.
pub fn import(store: &dyn KeybindingStore, sources: &ImportSources) -> Vec<ShortcutEntry> {
    let mut entries = Vec::new();

    for category in ImportCategory::ALL {
        if !sources.is_enabled(category) {
            debug!(category = %category, "Import source disabled");
            continue;
        }

        let bindings = match store.query_category(category) {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!(category = %category, error = %e, "Skipping import source");
                continue;
            }
        };

        let before = entries.len();
        for raw in bindings {
            if raw.description.trim().is_empty() {
                continue;
            }
            let Some(translated) = translate_binding(&raw.combo) else {
                continue;
            };
            match normalize(&translated) {
                Ok(combo) => entries.push(ShortcutEntry::new(combo, raw.description, category.source())),
                Err(e) => debug!(
                    category = %category,
                    binding = %raw.combo,
                    error = %e,
                    "Skipping unsupported system binding"
                ),
            }
        }

        info!(
            category = %category,
            imported = entries.len() - before,
            "Imported system shortcuts"
        );
    }

    entries
}

/// Translate a GNOME accelerator (`<Super><Shift>Page_Up`) into combo syntax
/// (`Super+Shift+PageUp`). Returns `None` for unbound values.
pub fn translate_binding(binding: &str) -> Option<String> {
    let binding = binding.trim();
    if binding.is_empty() || binding == "[]" || binding.eq_ignore_ascii_case("disabled") {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = binding;
    while let Some(tagged) = rest.strip_prefix('<') {
        let end = tagged.find('>')?;
        let tag = &tagged[..end];
        parts.push(translate_modifier(tag).unwrap_or(tag).to_string());
        rest = &tagged[end + 1..];
    }

    let key = rest.trim();
    if key.is_empty() {
        return None;
    }
    parts.push(translate_key(key));
    Some(parts.join("+"))
}

fn translate_modifier(tag: &str) -> Option<&'static str> {
    match tag.to_lowercase().as_str() {
        "control" | "ctrl" | "primary" => Some("Ctrl"),
        "super" | "mod4" | "mod5" => Some("Super"),
        "alt" | "mod1" => Some("Alt"),
        "shift" => Some("Shift"),
        _ => None,
    }
}

/// Map GDK key names onto the normalizer's key vocabulary. Unknown names pass
/// through unchanged and fail normalization later.
fn translate_key(key: &str) -> String {
    let mapped = match key.to_lowercase().as_str() {
        "page_up" | "prior" => "PageUp",
        "page_down" | "next" => "PageDown",
        "home" => "Home",
        "end" => "End",
        "left" => "Left",
        "right" => "Right",
        "up" => "Up",
        "down" => "Down",
        "tab" | "iso_left_tab" => "Tab",
        "return" | "kp_enter" => "Enter",
        "space" => "Space",
        "escape" => "Esc",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "insert" => "Insert",
        "equal" => "=",
        "minus" => "-",
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return format!("F{n}");
            }
            return key.to_string();
        }
    };
    mapped.to_string()
}
