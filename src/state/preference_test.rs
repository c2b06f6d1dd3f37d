use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::platform::{MemoryPlatform, NoopPlatform};

fn preference_over(platform: &MemoryPlatform) -> UserPreference {
    UserPreference::new(Rc::new(platform.clone()), &WatcherConfig::default())
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn initializes_from_each_valid_stored_value() {
    for mode in [UserMode::Dark, UserMode::Light, UserMode::System] {
        let platform = MemoryPlatform::new().with_stored("mode", mode.as_str());
        assert_eq!(preference_over(&platform).get(), mode);
    }
}

#[test]
fn absent_empty_or_invalid_storage_yields_system() {
    assert_eq!(preference_over(&MemoryPlatform::new()).get(), UserMode::System);
    for raw in ["", "sepia", "DARK"] {
        let platform = MemoryPlatform::new().with_stored("mode", raw);
        assert_eq!(preference_over(&platform).get(), UserMode::System, "stored {raw:?}");
    }
}

#[test]
fn configured_default_replaces_system_fallback() {
    let platform = MemoryPlatform::new().with_stored("mode", "bogus");
    let config = WatcherConfig::default().with_default_mode(UserMode::Dark);
    let preference = UserPreference::new(Rc::new(platform), &config);
    assert_eq!(preference.get(), UserMode::Dark);
}

#[test]
fn reads_configured_storage_key() {
    let platform = MemoryPlatform::new().with_stored("mode", "dark").with_stored("ui-theme", "light");
    let config = WatcherConfig::default().with_storage_key("ui-theme");
    let preference = UserPreference::new(Rc::new(platform), &config);
    assert_eq!(preference.key(), "ui-theme");
    assert_eq!(preference.get(), UserMode::Light);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn set_persists_for_a_fresh_store() {
    let platform = MemoryPlatform::new();
    for mode in [UserMode::Dark, UserMode::Light, UserMode::System] {
        preference_over(&platform).set(mode);
        assert_eq!(platform.stored("mode").as_deref(), Some(mode.as_str()));
        assert_eq!(preference_over(&platform).get(), mode);
    }
}

#[test]
fn set_notifies_subscribers() {
    let platform = MemoryPlatform::new();
    let preference = preference_over(&platform);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_for_cb = Rc::clone(&seen);
    let _sub = preference.subscribe(move |m| seen_for_cb.borrow_mut().push(*m));

    preference.set(UserMode::Dark);
    assert_eq!(*seen.borrow(), vec![UserMode::System, UserMode::Dark]);
}

#[test]
fn non_persistent_context_keeps_value_in_memory_only() {
    let preference = UserPreference::new(Rc::new(NoopPlatform), &WatcherConfig::default());
    assert_eq!(preference.get(), UserMode::System);
    preference.set(UserMode::Light);
    assert_eq!(preference.get(), UserMode::Light);

    let fresh = UserPreference::new(Rc::new(NoopPlatform), &WatcherConfig::default());
    assert_eq!(fresh.get(), UserMode::System);
}

// =============================================================
// Storage events
// =============================================================

#[test]
fn external_change_to_tracked_key_updates_value() {
    let platform = MemoryPlatform::new();
    let preference = preference_over(&platform);
    let _sub = preference.subscribe(|_| {});

    platform.external_write("mode", Some("dark"));
    assert_eq!(preference.get(), UserMode::Dark);
}

#[test]
fn external_change_to_other_key_is_ignored() {
    let platform = MemoryPlatform::new().with_stored("mode", "light");
    let preference = preference_over(&platform);
    let _sub = preference.subscribe(|_| {});

    platform.external_write("unrelated", Some("dark"));
    assert_eq!(preference.get(), UserMode::Light);
}

#[test]
fn removed_or_invalid_external_value_resets_to_default() {
    let platform = MemoryPlatform::new().with_stored("mode", "light");
    let preference = preference_over(&platform);
    let _sub = preference.subscribe(|_| {});

    platform.external_write("mode", Some("neon"));
    assert_eq!(preference.get(), UserMode::System);

    platform.external_write("mode", Some("dark"));
    platform.external_write("mode", None);
    assert_eq!(preference.get(), UserMode::System);

    platform.external_write("mode", Some("dark"));
    platform.external_clear();
    assert_eq!(preference.get(), UserMode::System);
}

#[test]
fn storage_clear_counts_as_removal_of_tracked_key() {
    let platform = MemoryPlatform::new().with_stored("mode", "dark");
    let preference = preference_over(&platform);
    let (seen, _sub) = {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_for_cb = Rc::clone(&seen);
        let sub = preference.subscribe(move |mode| seen_for_cb.borrow_mut().push(*mode));
        (seen, sub)
    };

    platform.external_clear();
    assert_eq!(*seen.borrow(), vec![UserMode::Dark, UserMode::System]);
}

#[test]
fn storage_listener_lives_only_while_observed() {
    let platform = MemoryPlatform::new();
    let preference = preference_over(&platform);
    assert_eq!(platform.storage_listener_count(), 0);

    let a = preference.subscribe(|_| {});
    let b = preference.subscribe(|_| {});
    assert_eq!(platform.storage_listener_count(), 1);

    drop(a);
    assert_eq!(platform.storage_listener_count(), 1);
    drop(b);
    assert_eq!(platform.storage_listener_count(), 0);

    platform.external_write("mode", Some("dark"));
    assert_eq!(preference.store.peek(), UserMode::System);
}
