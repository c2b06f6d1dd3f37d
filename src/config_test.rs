use super::*;

#[test]
fn defaults_match_constants() {
    let cfg = WatcherConfig::default();
    assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(cfg.default_mode, UserMode::System);
    assert_eq!(cfg.dark_class_names, vec![DEFAULT_DARK_CLASS.to_owned()]);
    assert!(cfg.light_class_names.is_empty());
    assert!(cfg.disable_transitions);
    assert!(cfg.track);
    assert_eq!(cfg.theme_colors, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let cfg = WatcherConfig::from_json(r#"{"storage_key": "theme", "track": false}"#).unwrap();
    assert_eq!(cfg.storage_key, "theme");
    assert!(!cfg.track);
    assert_eq!(cfg.dark_class_names, vec!["dark".to_owned()]);
}

#[test]
fn from_json_parses_theme_colors_and_mode() {
    let cfg = WatcherConfig::from_json(
        r##"{"default_mode": "dark", "theme_colors": {"dark": "#000", "light": "#fff"}}"##,
    )
    .unwrap();
    assert_eq!(cfg.default_mode, UserMode::Dark);
    assert_eq!(cfg.theme_colors, Some(ThemeColors { dark: "#000".into(), light: "#fff".into() }));
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = WatcherConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = WatcherConfig::from_json(r#"{"default_mode": "sepia"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_empty_storage_key() {
    let err = WatcherConfig::from_json(r#"{"storage_key": ""}"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyStorageKey));
}

#[test]
fn validate_rejects_whitespace_class_names() {
    let cfg = WatcherConfig::default().with_dark_classes(["dark mode"]);
    match cfg.validate() {
        Err(ConfigError::InvalidClassName(name)) => assert_eq!(name, "dark mode"),
        other => panic!("expected InvalidClassName, got {other:?}"),
    }
    let cfg = WatcherConfig::default().with_light_classes([""]);
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidClassName(_))));
}

#[test]
fn builders_chain() {
    let cfg = WatcherConfig::default()
        .with_storage_key("ui-mode")
        .with_default_mode(UserMode::Light)
        .with_dark_classes(["dark", "theme-dark"])
        .with_light_classes(["light"])
        .with_disable_transitions(false)
        .with_track(false)
        .with_theme_colors("#111", "#eee");
    assert_eq!(cfg.storage_key, "ui-mode");
    assert_eq!(cfg.default_mode, UserMode::Light);
    assert_eq!(cfg.dark_class_names.len(), 2);
    assert_eq!(cfg.light_class_names, vec!["light".to_owned()]);
    assert!(!cfg.disable_transitions);
    assert!(!cfg.track);
    assert!(cfg.theme_colors.is_some());
}
