//! GNOME keybinding store backed by the `gsettings` command line tool.
//!
//! `gsettings list-recursively <schema>` prints one `schema key value` line per
//! key, where the value is a GVariant literal: `'<Super>l'`, `['<Super>Up']`
//! or `@as []` for unbound actions.

use std::process::Command;

use tracing::{debug, instrument};

use super::{ImportCategory, KeybindingStore, RawBinding, SourceQueryError};

/// Keys in the media-keys schema that hold something other than bindings.
const NON_BINDING_KEYS: &[&str] = &["custom-keybindings"];

/// Queries keybindings by shelling out to `gsettings`.
#[derive(Debug, Clone)]
pub struct GsettingsStore {
    program: String,
}

impl Default for GsettingsStore {
    fn default() -> Self {
        Self::new("gsettings")
    }
}

impl GsettingsStore {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl KeybindingStore for GsettingsStore {
    #[instrument(skip(self), fields(schema = category.schema()))]
    fn query_category(&self, category: ImportCategory) -> Result<Vec<RawBinding>, SourceQueryError> {
        let schema = category.schema();
        let output = Command::new(&self.program)
            .arg("list-recursively")
            .arg(schema)
            .output()
            .map_err(|source| SourceQueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("No such schema") {
                return Err(SourceQueryError::SchemaMissing(schema.to_string()));
            }
            return Err(SourceQueryError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let bindings = parse_list_output(&stdout);
        debug!(count = bindings.len(), "Read keybindings from gsettings");
        Ok(bindings)
    }
}

/// Parse `gsettings list-recursively` output into one binding per accelerator.
///
/// An action bound to several accelerators yields several bindings; unbound
/// actions and non-string values yield none.
pub fn parse_list_output(output: &str) -> Vec<RawBinding> {
    let mut bindings = Vec::new();
    for line in output.lines() {
        let mut fields = line.trim().splitn(3, ' ');
        let (Some(_schema), Some(key), Some(value)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if NON_BINDING_KEYS.contains(&key) {
            continue;
        }

        let description = humanize_action_name(key);
        for accel in parse_string_values(value) {
            if !accel.trim().is_empty() {
                bindings.push(RawBinding::new(accel, description.clone()));
            }
        }
    }
    bindings
}

/// Pull the strings out of a GVariant string or string-array literal.
fn parse_string_values(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value.strip_prefix("@as").map(str::trim).unwrap_or(value);
    if !(value.starts_with('[') || value.starts_with('\'') || value.starts_with('"')) {
        return Vec::new();
    }

    let mut strings = Vec::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\'' && c != '"' {
            continue;
        }
        let quote = c;
        let mut current = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                c if c == quote => break,
                c => current.push(c),
            }
        }
        strings.push(current);
    }
    strings
}

/// Turn a schema key into a readable description:
/// `switch-to-workspace-1` becomes `Switch To Workspace 1`.
pub fn humanize_action_name(key: &str) -> String {
    key.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WM_OUTPUT: &str = "\
org.gnome.desktop.wm.keybindings activate-window-menu ['<Alt>space']
org.gnome.desktop.wm.keybindings begin-move @as []
org.gnome.desktop.wm.keybindings switch-to-workspace-left ['<Super>Page_Up', '<Super><Alt>Left', '<Control><Alt>Left']
org.gnome.desktop.wm.keybindings show-desktop ['']
";

    #[test]
    fn parses_string_arrays_into_bindings() {
        let bindings = parse_list_output(WM_OUTPUT);
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings[0], RawBinding::new("<Alt>space", "Activate Window Menu"));
        assert_eq!(
            bindings[1..]
                .iter()
                .map(|b| b.combo.as_str())
                .collect::<Vec<_>>(),
            vec!["<Super>Page_Up", "<Super><Alt>Left", "<Control><Alt>Left"]
        );
        assert!(bindings[1..]
            .iter()
            .all(|b| b.description == "Switch To Workspace Left"));
    }

    #[test]
    fn parses_plain_string_values() {
        let output = "org.gnome.settings-daemon.plugins.media-keys screensaver '<Super>l'\n\
                      org.gnome.settings-daemon.plugins.media-keys volume-step 6\n\
                      org.gnome.settings-daemon.plugins.media-keys custom-keybindings ['/org/gnome/custom0/']\n";
        let bindings = parse_list_output(output);
        assert_eq!(bindings, vec![RawBinding::new("<Super>l", "Screensaver")]);
    }

    #[test]
    fn handles_escaped_and_double_quoted_strings() {
        assert_eq!(parse_string_values(r#"["<Super>apostrophe's"]"#), vec!["<Super>apostrophe's"]);
        assert_eq!(parse_string_values(r"['a\'b']"), vec!["a'b"]);
        assert!(parse_string_values("true").is_empty());
        assert!(parse_string_values("@as []").is_empty());
    }

    #[test]
    fn humanizes_action_names() {
        assert_eq!(humanize_action_name("switch-to-workspace-1"), "Switch To Workspace 1");
        assert_eq!(humanize_action_name("toggle_message_tray"), "Toggle Message Tray");
        assert_eq!(humanize_action_name("screensaver"), "Screensaver");
        assert_eq!(humanize_action_name("MAXIMIZE"), "Maximize");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let store = GsettingsStore::new("/nonexistent/gsettings-binary");
        let result = store.query_category(ImportCategory::Shell);
        assert!(matches!(result, Err(SourceQueryError::Spawn { .. })));
    }
}
