//! The user's explicit mode preference, mirrored to persistent storage.

use std::rc::Rc;

use crate::config::WatcherConfig;
use crate::mode::UserMode;
use crate::platform::{Platform, PlatformError, StorageChange};
use crate::subscription::Subscription;

use super::observable::{Observable, Setter};

#[cfg(test)]
#[path = "preference_test.rs"]
mod preference_test;

/// Read the stored preference, falling back to `default` when absent,
/// unreadable, or not a recognized mode.
fn read_persisted(platform: &dyn Platform, key: &str, default: UserMode) -> UserMode {
    let raw = match platform.storage_get(key) {
        Ok(raw) => raw,
        Err(e) => {
            log::debug!("mode preference not read from storage: {e}");
            return default;
        }
    };
    match UserMode::from_persisted(raw.as_deref()) {
        Some(mode) => mode,
        None => {
            if let Some(raw) = raw.filter(|r| !r.is_empty()) {
                log::debug!("ignoring unrecognized stored mode {raw:?}");
            }
            default
        }
    }
}

/// Subscribable {dark, light, system} preference.
///
/// While observed, storage events for the same key (writes from other tabs)
/// update the value; last write wins.
pub struct UserPreference {
    pub(crate) store: Observable<UserMode>,
    platform: Rc<dyn Platform>,
    key: Rc<str>,
}

impl UserPreference {
    pub fn new(platform: Rc<dyn Platform>, config: &WatcherConfig) -> Self {
        let key: Rc<str> = Rc::from(config.storage_key.as_str());
        let default = config.default_mode;
        let initial = read_persisted(platform.as_ref(), &key, default);

        let store = {
            let platform = Rc::clone(&platform);
            let key = Rc::clone(&key);
            Observable::with_start(initial, move |setter: Setter<UserMode>| {
                let key = Rc::clone(&key);
                platform.watch_storage(Rc::new(move |change: &StorageChange| {
                    // A `None` key means the storage area was cleared.
                    if change.key.as_deref().is_some_and(|k| k != &*key) {
                        return;
                    }
                    let mode = UserMode::from_persisted(change.new_value.as_deref()).unwrap_or(default);
                    setter.set(mode);
                }))
            })
        };

        Self { store, platform, key }
    }

    #[must_use]
    pub fn get(&self) -> UserMode {
        self.store.get()
    }

    /// Update the in-memory value and persist it.
    pub fn set(&self, mode: UserMode) {
        self.store.set(mode);
        self.persist();
    }

    pub fn subscribe(&self, observer: impl Fn(&UserMode) + 'static) -> Subscription {
        self.store.subscribe(observer)
    }

    /// The storage key this preference lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the current value to storage.
    pub(crate) fn persist(&self) {
        let mode = self.store.peek();
        match self.platform.storage_set(&self.key, mode.as_str()) {
            Ok(()) => {}
            Err(PlatformError::StorageUnavailable) => {
                log::debug!("storage unavailable; mode preference {mode} not persisted");
            }
            Err(e) => log::warn!("failed to persist mode preference {mode}: {e}"),
        }
    }
}

impl std::fmt::Debug for UserPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPreference")
            .field("key", &self.key)
            .field("value", &self.store.peek())
            .finish_non_exhaustive()
    }
}
