//! Composition root: the three mode cells plus the controls a UI needs.

use std::rc::Rc;

use crate::config::WatcherConfig;
use crate::mode::{Mode, UserMode};
use crate::platform::Platform;
use crate::state::effective::EffectiveMode;
use crate::state::preference::UserPreference;
use crate::state::system::SystemPreference;
use crate::subscription::Subscription;

#[cfg(test)]
#[path = "watcher_test.rs"]
mod watcher_test;

/// Owns the preference, system and effective mode cells for one document.
///
/// Nothing touches the environment until [`mount`](Self::mount) (or an
/// explicit subscription) makes the cells live.
pub struct ModeWatcher {
    config: WatcherConfig,
    preference: UserPreference,
    system: SystemPreference,
    effective: EffectiveMode,
}

impl ModeWatcher {
    pub fn new(platform: Rc<dyn Platform>, config: WatcherConfig) -> Self {
        let preference = UserPreference::new(Rc::clone(&platform), &config);
        let system = SystemPreference::new(Rc::clone(&platform));
        let effective = EffectiveMode::new(&preference, &system, platform, &config);
        Self { config, preference, system, effective }
    }

    /// Start watching.
    ///
    /// Keeps the effective mode (and through it both upstream listeners)
    /// live, applies the configured tracking state, reads the OS scheme, and
    /// persists the current preference. Dropping the returned guard detaches
    /// every environment listener.
    pub fn mount(&self) -> Subscription {
        let live = self.effective.subscribe(|_| {});
        self.system.set_tracking(self.config.track);
        self.system.query();
        self.preference.persist();
        log::debug!(
            "mode watcher mounted: preference={} effective={:?}",
            self.preference.get(),
            self.effective.get()
        );
        live
    }

    pub fn set_mode(&self, mode: UserMode) {
        self.preference.set(mode);
    }

    /// Go back to following the system scheme.
    pub fn reset_mode(&self) {
        self.preference.set(UserMode::System);
    }

    /// Switch to the opposite of what is currently shown.
    ///
    /// An unknown effective mode counts as light, so the first toggle lands
    /// on dark.
    pub fn toggle_mode(&self) {
        let next = self.effective.get().map_or(Mode::Dark, Mode::inverted);
        self.preference.set(next.into());
    }

    /// Current effective mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.effective.get()
    }

    #[must_use]
    pub fn preference(&self) -> &UserPreference {
        &self.preference
    }

    #[must_use]
    pub fn system(&self) -> &SystemPreference {
        &self.system
    }

    #[must_use]
    pub fn effective(&self) -> &EffectiveMode {
        &self.effective
    }

    #[must_use]
    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }
}

impl std::fmt::Debug for ModeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeWatcher")
            .field("preference", &self.preference)
            .field("system", &self.system)
            .field("effective", &self.effective)
            .finish_non_exhaustive()
    }
}
