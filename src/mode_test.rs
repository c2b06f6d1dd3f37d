use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn user_mode_parses_canonical_strings() {
    assert_eq!("dark".parse::<UserMode>(), Ok(UserMode::Dark));
    assert_eq!("light".parse::<UserMode>(), Ok(UserMode::Light));
    assert_eq!("system".parse::<UserMode>(), Ok(UserMode::System));
}

#[test]
fn user_mode_parse_is_case_sensitive() {
    let err = "Dark".parse::<UserMode>().unwrap_err();
    assert_eq!(err, ModeParseError("Dark".to_owned()));
    assert!(err.to_string().contains("Dark"));
}

#[test]
fn from_persisted_rejects_empty_and_unknown() {
    assert_eq!(UserMode::from_persisted(None), None);
    assert_eq!(UserMode::from_persisted(Some("")), None);
    assert_eq!(UserMode::from_persisted(Some("sepia")), None);
    assert_eq!(UserMode::from_persisted(Some("light")), Some(UserMode::Light));
}

#[test]
fn display_matches_persisted_form() {
    for mode in [UserMode::Dark, UserMode::Light, UserMode::System] {
        assert_eq!(mode.to_string().parse::<UserMode>(), Ok(mode));
    }
    assert_eq!(Mode::Dark.to_string(), "dark");
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&UserMode::System).unwrap(), "\"system\"");
    let mode: Mode = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(mode, Mode::Light);
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn system_preference_follows_system_scheme() {
    assert_eq!(UserMode::System.resolve(Some(Mode::Dark)), Some(Mode::Dark));
    assert_eq!(UserMode::System.resolve(Some(Mode::Light)), Some(Mode::Light));
    assert_eq!(UserMode::System.resolve(None), None);
}

#[test]
fn explicit_preference_ignores_system_scheme() {
    for system in [None, Some(Mode::Dark), Some(Mode::Light)] {
        assert_eq!(UserMode::Dark.resolve(system), Some(Mode::Dark));
        assert_eq!(UserMode::Light.resolve(system), Some(Mode::Light));
    }
}

#[test]
fn default_user_mode_is_system() {
    assert_eq!(UserMode::default(), UserMode::System);
}

#[test]
fn inverted_flips_scheme() {
    assert_eq!(Mode::Dark.inverted(), Mode::Light);
    assert_eq!(Mode::Light.inverted(), Mode::Dark);
    assert_eq!(UserMode::from(Mode::Dark.inverted()), UserMode::Light);
}
