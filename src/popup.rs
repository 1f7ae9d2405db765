//! Popup view model and the renderer interface.
//!
//! The window itself lives in a separate process. This module turns matched
//! entries into rows and hands them to a [`PopupRenderer`]; the default
//! [`JsonlRenderer`] writes one JSON object per update to stdout:
//!
//! ```json
//! {"type":"show","title":"Available Shortcuts (CTRL + ...)","user":[{"keys":"CTRL + C","description":"Copy"}],"imported":[],"settings":{...}}
//! {"type":"hide"}
//! ```

use std::io::Write;

use serde::Serialize;

use crate::config::PopupSettings;
use crate::shortcuts::{Modifiers, ShortcutEntry};

/// One line in the popup: the chord and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupRow {
    pub keys: String,
    pub description: String,
}

impl PopupRow {
    pub fn from_entry(entry: &ShortcutEntry) -> Self {
        let description = match &entry.alias_of {
            Some(target) => format!("{} (via {})", entry.description, target),
            None => entry.description.clone(),
        };
        Self {
            keys: entry.combo.display_label(),
            description,
        }
    }
}

/// Everything the renderer needs to draw the popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub title: String,
    /// User-configured rows, drawn first
    pub user: Vec<PopupRow>,
    /// Imported rows, drawn after a separator
    pub imported: Vec<PopupRow>,
    pub settings: PopupSettings,
}

impl PopupView {
    /// Build a view from matcher output, which is already in display order.
    pub fn new(pressed: Modifiers, entries: &[&ShortcutEntry], settings: &PopupSettings) -> Self {
        let (user, imported): (Vec<&ShortcutEntry>, Vec<&ShortcutEntry>) =
            entries.iter().copied().partition(|e| e.source.is_user());
        Self {
            title: popup_title(pressed),
            user: user.into_iter().map(PopupRow::from_entry).collect(),
            imported: imported.into_iter().map(PopupRow::from_entry).collect(),
            settings: settings.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.user.len() + self.imported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the popup should do after a modifier change.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupUpdate {
    Show(PopupView),
    Hide,
}

/// Title listing the held modifiers, e.g. `Available Shortcuts (CTRL + ALT + ...)`.
pub fn popup_title(pressed: Modifiers) -> String {
    let names = pressed.names();
    if names.is_empty() {
        return "Available Shortcuts".to_string();
    }
    let held: Vec<String> = names.into_iter().map(str::to_uppercase).collect();
    format!("Available Shortcuts ({} + ...)", held.join(" + "))
}

/// Receives popup updates. Positioning, fading and the hide timeout are the
/// implementor's business.
pub trait PopupRenderer {
    fn show(&mut self, view: &PopupView) -> std::io::Result<()>;
    fn hide(&mut self) -> std::io::Result<()>;

    fn apply(&mut self, update: &PopupUpdate) -> std::io::Result<()> {
        match update {
            PopupUpdate::Show(view) => self.show(view),
            PopupUpdate::Hide => self.hide(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RenderMessage<'a> {
    Show(&'a PopupView),
    Hide,
}

/// Writes updates as JSONL for an external popup process.
pub struct JsonlRenderer<W: Write> {
    out: W,
}

impl JsonlRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn send(&mut self, message: &RenderMessage<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> PopupRenderer for JsonlRenderer<W> {
    fn show(&mut self, view: &PopupView) -> std::io::Result<()> {
        self.send(&RenderMessage::Show(view))
    }

    fn hide(&mut self) -> std::io::Result<()> {
        self.send(&RenderMessage::Hide)
    }
}
