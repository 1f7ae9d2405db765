use super::registry::*;
use super::types::{normalize, KeyCombo};

fn combo(s: &str) -> KeyCombo {
    normalize(s).unwrap()
}

fn user(s: &str, desc: &str) -> ShortcutEntry {
    ShortcutEntry::user(combo(s), desc)
}

fn imported(s: &str, desc: &str, source: ShortcutSource) -> ShortcutEntry {
    ShortcutEntry::new(combo(s), desc, source)
}

fn alias(trigger: &str, target: &str) -> (KeyCombo, KeyCombo) {
    (combo(trigger), combo(target))
}

#[test]
fn user_entry_beats_imported_entry() {
    let table = merge(
        vec![user("Ctrl+Alt+T", "My Terminal")],
        vec![imported("ctrl+alt+t", "Terminal", ShortcutSource::WindowManager)],
        &[],
    );
    assert_eq!(table.len(), 1);
    let entry = table.get(&combo("Ctrl+Alt+T")).unwrap();
    assert_eq!(entry.description, "My Terminal");
    assert_eq!(entry.source, ShortcutSource::User);
}

#[test]
fn user_priority_holds_regardless_of_argument_order_within_imports() {
    let table = merge(
        vec![user("Super+L", "Lock")],
        vec![
            imported("Super+L", "Screensaver", ShortcutSource::Media),
            imported("Super+L", "Lock Screen", ShortcutSource::Shell),
        ],
        &[],
    );
    assert_eq!(table.get(&combo("Super+L")).unwrap().description, "Lock");
}

#[test]
fn later_user_duplicate_overwrites_earlier() {
    let table = merge(vec![user("Ctrl+C", "Copy"), user("ctrl+c", "Copy Text")], vec![], &[]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&combo("Ctrl+C")).unwrap().description, "Copy Text");
}

#[test]
fn last_imported_source_wins_among_imports() {
    let table = merge(
        vec![],
        vec![
            imported("Super+S", "Toggle Overview", ShortcutSource::WindowManager),
            imported("Super+S", "Toggle Quick Settings", ShortcutSource::Shell),
        ],
        &[],
    );
    let entry = table.get(&combo("Super+S")).unwrap();
    assert_eq!(entry.description, "Toggle Quick Settings");
    assert_eq!(entry.source, ShortcutSource::Shell);
}

#[test]
fn empty_descriptions_are_dropped() {
    let table = merge(
        vec![user("Ctrl+C", "  ")],
        vec![imported("Ctrl+C", "Copy", ShortcutSource::Shell)],
        &[],
    );
    // The blank user entry never made it in, so the import fills the slot.
    assert_eq!(table.get(&combo("Ctrl+C")).unwrap().description, "Copy");
    assert!(table.iter().all(|e| !e.description.trim().is_empty()));
}

#[test]
fn alias_copies_target_description_and_source() {
    let table = merge(
        vec![],
        vec![imported("Ctrl+Insert", "Copy", ShortcutSource::Shell)],
        &[alias("Ctrl+C", "Ctrl+Insert")],
    );
    let entry = table.get(&combo("Ctrl+C")).unwrap();
    assert_eq!(entry.description, "Copy");
    assert_eq!(entry.source, ShortcutSource::Shell);
    assert_eq!(entry.alias_of, Some(combo("Ctrl+Insert")));
}

#[test]
fn alias_to_missing_target_is_inert() {
    let table = merge(vec![user("Ctrl+C", "Copy")], vec![], &[alias("Ctrl+A", "Ctrl+Z")]);
    assert!(table.get(&combo("Ctrl+A")).is_none());
    assert_eq!(table.len(), 1);
}

#[test]
fn alias_resolves_transitively() {
    let table = merge(
        vec![user("Ctrl+C", "Copy")],
        vec![],
        &[alias("Ctrl+Insert", "Ctrl+C"), alias("Super+C", "Ctrl+Insert")],
    );
    assert_eq!(table.get(&combo("Super+C")).unwrap().description, "Copy");
    assert_eq!(table.get(&combo("Ctrl+Insert")).unwrap().description, "Copy");
}

#[test]
fn alias_cycle_terminates_without_entries() {
    let table = merge(
        vec![user("Ctrl+C", "Copy")],
        vec![],
        &[alias("Ctrl+A", "Ctrl+B"), alias("Ctrl+B", "Ctrl+A"), alias("Ctrl+D", "Ctrl+D")],
    );
    assert_eq!(table.len(), 1);
    assert!(table.get(&combo("Ctrl+A")).is_none());
    assert!(table.get(&combo("Ctrl+B")).is_none());
    assert!(table.get(&combo("Ctrl+D")).is_none());
}

#[test]
fn alias_chain_longer_than_limit_does_not_resolve() {
    let mut aliases = Vec::new();
    let keys = ["A", "B", "D", "E", "F", "G", "H", "I", "J", "K"];
    for pair in keys.windows(2) {
        aliases.push(alias(&format!("Ctrl+{}", pair[0]), &format!("Ctrl+{}", pair[1])));
    }
    let last = keys[keys.len() - 1];
    let table = merge(vec![user(&format!("Ctrl+{last}"), "End")], vec![], &aliases);

    // Ctrl+A needs nine hops to reach Ctrl+K.
    assert!(table.get(&combo("Ctrl+A")).is_none());
    // Ctrl+D needs seven hops.
    assert_eq!(table.get(&combo("Ctrl+D")).unwrap().description, "End");
}

#[test]
fn alias_does_not_replace_direct_entry() {
    let table = merge(
        vec![user("Ctrl+C", "Copy"), user("Ctrl+V", "Paste")],
        vec![],
        &[alias("Ctrl+V", "Ctrl+C")],
    );
    assert_eq!(table.get(&combo("Ctrl+V")).unwrap().description, "Paste");
    assert!(table.get(&combo("Ctrl+V")).unwrap().alias_of.is_none());
}

#[test]
fn alias_replaces_imported_entry_at_trigger() {
    let table = merge(
        vec![user("Ctrl+Alt+L", "Lock my way")],
        vec![imported("Super+L", "Screensaver", ShortcutSource::WindowManager)],
        &[alias("Super+L", "Ctrl+Alt+L")],
    );
    let entry = table.get(&combo("Super+L")).unwrap();
    assert_eq!(entry.description, "Lock my way");
    assert_eq!(entry.source, ShortcutSource::User);
    assert_eq!(entry.alias_of, Some(combo("Ctrl+Alt+L")));
    assert_eq!(table.len(), 2);
}

#[test]
fn at_most_one_entry_per_combo() {
    let table = merge(
        vec![user("Ctrl+C", "Copy"), user("CTRL+c", "Copy again")],
        vec![
            imported("ctrl+C", "Copy", ShortcutSource::Shell),
            imported("Super+L", "Lock", ShortcutSource::Media),
        ],
        &[alias("Control+C", "Super+L")],
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.user_count(), 1);
}
