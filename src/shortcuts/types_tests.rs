use super::types::*;

fn combo(s: &str) -> KeyCombo {
    normalize(s).unwrap()
}

#[test]
fn parse_simple_combo() {
    let c = combo("Ctrl+C");
    assert_eq!(c.modifiers, Modifiers::CTRL);
    assert_eq!(c.key(), "C");
}

#[test]
fn modifier_order_and_case_do_not_matter() {
    assert_eq!(combo("ctrl+alt+A"), combo("Alt+Ctrl+a"));
    assert_eq!(combo("SHIFT+super+t"), combo("Super+Shift+T"));
    assert_eq!(combo("Control+x"), combo("Ctrl+X"));
}

#[test]
fn whitespace_around_tokens_is_ignored() {
    assert_eq!(combo(" Ctrl + Shift + Tab "), combo("Ctrl+Shift+Tab"));
}

#[test]
fn modifier_aliases_map_to_canonical_flags() {
    assert_eq!(combo("Win+E").modifiers, Modifiers::SUPER);
    assert_eq!(combo("Meta+E").modifiers, Modifiers::SUPER);
    assert_eq!(combo("Primary+E").modifiers, Modifiers::CTRL);
}

#[test]
fn shift_tab_is_shift_plus_tab() {
    let c = combo("Shift+Tab");
    assert_eq!(c.modifiers, Modifiers::SHIFT);
    assert_eq!(c.key(), "Tab");
}

#[test]
fn special_keys_are_case_sensitive() {
    assert_eq!(combo("Super+PageUp").key(), "PageUp");
    assert_eq!(
        normalize("Super+pageup"),
        Err(ShortcutParseError::UnknownToken("pageup".to_string()))
    );
    assert!(normalize("Ctrl+tab").is_err());
}

#[test]
fn symbols_and_digits_are_keys() {
    assert_eq!(combo("Ctrl+=").key(), "=");
    assert_eq!(combo("Ctrl+-").key(), "-");
    assert_eq!(combo("Super+1").key(), "1");
}

#[test]
fn function_keys_are_recognized() {
    assert_eq!(combo("Alt+F4").key(), "F4");
    assert_eq!(combo("Ctrl+F12").key(), "F12");
    assert!(normalize("Ctrl+F13").is_err());
    assert!(normalize("Ctrl+F0").is_err());
}

#[test]
fn combo_without_modifiers_is_representable() {
    let c = combo("F");
    assert!(c.modifiers.is_empty());
    assert_eq!(c.key(), "F");
}

#[test]
fn parse_errors() {
    assert_eq!(normalize(""), Err(ShortcutParseError::Empty));
    assert_eq!(normalize("   "), Err(ShortcutParseError::Empty));
    assert_eq!(normalize("Ctrl+Alt"), Err(ShortcutParseError::MissingKey));
    assert_eq!(normalize("Ctrl++"), Err(ShortcutParseError::EmptyToken));
    assert_eq!(
        normalize("Ctrl+A+B"),
        Err(ShortcutParseError::MultipleKeys("A".to_string(), "B".to_string()))
    );
    assert_eq!(
        normalize("Hyper+A"),
        Err(ShortcutParseError::UnknownToken("Hyper".to_string()))
    );
    assert!(normalize("Ctrl+?").is_err());
    assert!(normalize("Ctrl+é").is_err());
}

#[test]
fn canonical_string_uses_fixed_modifier_order() {
    assert_eq!(combo("shift+alt+super+ctrl+k").to_canonical_string(), "Ctrl+Super+Alt+Shift+K");
    assert_eq!(combo("Alt+Ctrl+Left").to_string(), "Ctrl+Alt+Left");
}

#[test]
fn normalize_is_idempotent_through_canonical_string() {
    let inputs = [
        "ctrl+alt+t",
        "Super+Shift+PageDown",
        "shift+Tab",
        "Alt+F4",
        "Ctrl+=",
        "q",
    ];
    for input in inputs {
        let first = combo(input);
        let second = combo(&first.to_canonical_string());
        assert_eq!(first, second, "round trip changed {input}");
    }
}

#[test]
fn display_label_is_upper_case() {
    assert_eq!(combo("ctrl+alt+t").display_label(), "CTRL + ALT + T");
    assert_eq!(combo("Super+Left").display_label(), "SUPER + LEFT");
}

#[test]
fn from_str_matches_normalize() {
    let parsed: KeyCombo = "Ctrl+Shift+Z".parse().unwrap();
    assert_eq!(parsed, combo("ctrl+shift+z"));
}

#[test]
fn key_combo_new_canonicalizes_key() {
    let c = KeyCombo::new(Modifiers::CTRL | Modifiers::ALT, "t").unwrap();
    assert_eq!(c, combo("Ctrl+Alt+T"));
    assert!(KeyCombo::new(Modifiers::CTRL, "nope").is_err());
}

#[test]
fn modifier_names_follow_display_order() {
    let all = Modifiers::SHIFT | Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER;
    assert_eq!(all.names(), vec!["Ctrl", "Super", "Alt", "Shift"]);
    assert!(Modifiers::empty().names().is_empty());
}
