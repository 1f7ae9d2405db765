//! Modifier-state matching: which shortcuts to show for the keys held right now.

use super::registry::{ShortcutEntry, ShortcutTable};
use super::types::Modifiers;

/// Entries whose modifiers are all currently pressed, ready for display.
///
/// Combos without modifiers never match since the popup only opens on a
/// modifier press. User entries come first, then imported ones; each group is
/// ordered by combo text (case-insensitive), then description.
pub fn match_modifiers(table: &ShortcutTable, pressed: Modifiers) -> Vec<&ShortcutEntry> {
    let mut matches: Vec<&ShortcutEntry> = table
        .iter()
        .filter(|entry| {
            let required = entry.combo.modifiers;
            !required.is_empty() && pressed.contains(required)
        })
        .collect();

    matches.sort_by_cached_key(|entry| {
        (
            !entry.source.is_user(),
            entry.combo.to_canonical_string().to_lowercase(),
            entry.description.clone(),
        )
    });
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::registry::{merge, ShortcutSource};
    use crate::shortcuts::types::normalize;

    fn entry(s: &str, desc: &str, source: ShortcutSource) -> ShortcutEntry {
        ShortcutEntry::new(normalize(s).unwrap(), desc, source)
    }

    fn sample_table() -> ShortcutTable {
        merge(
            vec![
                entry("Ctrl+C", "Copy", ShortcutSource::User),
                entry("Ctrl+Alt+T", "Terminal", ShortcutSource::User),
                entry("F", "typed-F", ShortcutSource::User),
            ],
            vec![],
            &[],
        )
    }

    fn combos(entries: &[&ShortcutEntry]) -> Vec<String> {
        entries.iter().map(|e| e.combo.to_canonical_string()).collect()
    }

    #[test]
    fn ctrl_alone_shows_only_ctrl_shortcuts() {
        let table = sample_table();
        let result = match_modifiers(&table, Modifiers::CTRL);
        assert_eq!(combos(&result), vec!["Ctrl+C"]);
        assert_eq!(result[0].description, "Copy");
    }

    #[test]
    fn ctrl_alt_shows_subsets() {
        let table = sample_table();
        let result = match_modifiers(&table, Modifiers::CTRL | Modifiers::ALT);
        assert_eq!(combos(&result), vec!["Ctrl+Alt+T", "Ctrl+C"]);
    }

    #[test]
    fn nothing_pressed_shows_nothing() {
        let table = sample_table();
        assert!(match_modifiers(&table, Modifiers::empty()).is_empty());
    }

    #[test]
    fn combos_without_modifiers_never_match() {
        let table = sample_table();
        let all = Modifiers::all();
        assert!(match_modifiers(&table, all)
            .iter()
            .all(|e| !e.combo.modifiers.is_empty()));
    }

    #[test]
    fn user_entries_precede_imported_entries() {
        let table = merge(
            vec![entry("Super+Z", "Zoom", ShortcutSource::User)],
            vec![
                entry("Super+A", "Show Apps", ShortcutSource::Shell),
                entry("Super+D", "Show Desktop", ShortcutSource::WindowManager),
            ],
            &[],
        );
        let result = match_modifiers(&table, Modifiers::SUPER);
        assert_eq!(combos(&result), vec!["Super+Z", "Super+A", "Super+D"]);
        assert!(result[0].source.is_user());
        assert!(result[1..].iter().all(|e| !e.source.is_user()));
    }

    #[test]
    fn aliased_entries_follow_their_target_source() {
        let table = merge(
            vec![entry("Ctrl+Q", "Quit", ShortcutSource::User)],
            vec![entry("Ctrl+B", "Bold", ShortcutSource::Shell)],
            &[(normalize("Ctrl+W").unwrap(), normalize("Ctrl+Q").unwrap())],
        );
        let result = match_modifiers(&table, Modifiers::CTRL);
        assert_eq!(combos(&result), vec!["Ctrl+Q", "Ctrl+W", "Ctrl+B"]);
    }

    #[test]
    fn shift_must_be_held_for_shift_combos() {
        let table = merge(
            vec![
                entry("Ctrl+Shift+T", "Reopen Tab", ShortcutSource::User),
                entry("Ctrl+T", "New Tab", ShortcutSource::User),
            ],
            vec![],
            &[],
        );
        assert_eq!(combos(&match_modifiers(&table, Modifiers::CTRL)), vec!["Ctrl+T"]);
        assert_eq!(
            combos(&match_modifiers(&table, Modifiers::CTRL | Modifiers::SHIFT)),
            vec!["Ctrl+Shift+T", "Ctrl+T"]
        );
    }
}
