//! The shortcut helper: loads the config, builds the shortcut table and turns
//! modifier changes into popup updates.
//!
//! The active table lives behind an `RwLock<Arc<_>>`. A reload builds the new
//! table completely, then swaps the `Arc`, so a key event always sees either
//! the old table or the new one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::{load_config, load_config_or_default, save_config, Config, PopupSettings};
use crate::error::ConfigError;
use crate::importer::{self, KeybindingStore};
use crate::logging;
use crate::popup::{PopupUpdate, PopupView};
use crate::shortcuts::{match_modifiers, merge, Modifiers, ShortcutTable};
use crate::stdin_commands::ExternalCommand;

/// Events handled by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A command from the key-capture process on stdin
    Command(ExternalCommand),
    /// The config file changed on disk
    ConfigChanged,
}

/// Everything a key event needs, swapped as a unit on reload.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub table: ShortcutTable,
    pub settings: PopupSettings,
}

/// Merge a config with (optionally) imported system shortcuts.
pub fn build_table(config: &Config, store: Option<&dyn KeybindingStore>) -> ShortcutTable {
    let imported = match store {
        Some(store) if config.import_sources.any_enabled() => {
            importer::import(store, &config.import_sources)
        }
        _ => Vec::new(),
    };
    merge(config.user_entries(), imported, &config.aliases())
}

pub struct ShortcutHelper<S: KeybindingStore> {
    config_path: PathBuf,
    store: S,
    import_system: bool,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl<S: KeybindingStore> ShortcutHelper<S> {
    /// Load the config at `config_path` and build the first table.
    ///
    /// A missing file starts with an empty config; a malformed one is an error.
    pub fn load(config_path: impl Into<PathBuf>, store: S, import_system: bool) -> Result<Self, ConfigError> {
        let helper = Self {
            config_path: config_path.into(),
            store,
            import_system,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        };
        let config = load_config_or_default(&helper.config_path)?;
        helper.install(&config, "loaded");
        Ok(helper)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The table and settings currently in use.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Re-read the config and rebuild the table.
    ///
    /// On any config error the previous table stays active.
    #[instrument(skip(self), fields(path = %self.config_path.display()))]
    pub fn reload(&self) -> Result<(), ConfigError> {
        match load_config(&self.config_path) {
            Ok(config) => {
                self.install(&config, "reloaded");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Config reload failed, keeping previous shortcuts");
                Err(e)
            }
        }
    }

    /// Shortcuts to show for the modifiers held right now.
    ///
    /// No modifiers, or nothing matching, hides the popup.
    pub fn on_modifiers(&self, pressed: Modifiers, request_id: Option<&str>) -> PopupUpdate {
        let snapshot = self.snapshot();
        let matches = if pressed.is_empty() {
            Vec::new()
        } else {
            match_modifiers(&snapshot.table, pressed)
        };
        logging::log_modifier_event(pressed, matches.len(), request_id);

        if matches.is_empty() {
            return PopupUpdate::Hide;
        }
        PopupUpdate::Show(PopupView::new(pressed, &matches, &snapshot.settings))
    }

    fn install(&self, config: &Config, action: &str) {
        let store = self.import_system.then_some(&self.store as &dyn KeybindingStore);
        let table = build_table(config, store);
        logging::log_table_event(action, table.len(), table.user_count());

        let snapshot = Arc::new(Snapshot {
            table,
            settings: config.popup_settings.clone(),
        });
        *self.snapshot.write() = snapshot;
    }
}

/// Import system shortcuts into the config file and stop.
///
/// Imported combos not already defined in `configured_shortcuts` are appended
/// under their canonical spelling. Existing entries keep their spelling,
/// description and position. Returns how many entries were added.
#[instrument(skip(store), fields(path = %path.display()))]
pub fn import_only(path: &Path, store: &dyn KeybindingStore) -> Result<usize, ConfigError> {
    let mut config = load_config_or_default(path)?;
    config.migrate_legacy_shortcuts();

    let imported = importer::import(store, &config.import_sources);
    let table = merge(config.user_entries(), imported, &[]);

    let mut added = 0;
    for entry in table.iter().filter(|e| !e.source.is_user()) {
        config
            .configured_shortcuts
            .insert(entry.combo.to_canonical_string(), entry.description.clone());
        added += 1;
    }

    if added == 0 {
        warn!("No new system shortcuts to import");
    }
    save_config(path, &config)?;
    info!(added, "Imported system shortcuts into config");
    Ok(added)
}
