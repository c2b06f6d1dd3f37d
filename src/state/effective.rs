//! The mode actually applied to the document.
//!
//! DESIGN
//! ======
//! The effective mode is a pure function of the two upstream cells. While it
//! is observed it holds subscriptions to both, recomputes synchronously when
//! either notifies, and applies the result to the document root as a side
//! effect. An unknown result (preference `system`, OS scheme not yet read)
//! leaves the document untouched.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::WatcherConfig;
use crate::mode::Mode;
use crate::platform::{Platform, PlatformError};
use crate::subscription::Subscription;

use super::observable::{Observable, Setter};
use super::preference::UserPreference;
use super::system::SystemPreference;

#[cfg(test)]
#[path = "effective_test.rs"]
mod effective_test;

fn report(result: Result<(), PlatformError>) {
    if let Err(e) = result {
        log::warn!("failed to apply color mode to document: {e}");
    }
}

/// Restyle the document root for `mode`: class names, `color-scheme`, and
/// the theme-color meta tag when configured.
pub fn apply_mode(platform: &dyn Platform, mode: Mode, config: &WatcherConfig) {
    let (add, remove) = match mode {
        Mode::Dark => (&config.dark_class_names, &config.light_class_names),
        Mode::Light => (&config.light_class_names, &config.dark_class_names),
    };

    let mut restyle = || {
        if !remove.is_empty() {
            report(platform.remove_root_classes(remove));
        }
        if !add.is_empty() {
            report(platform.add_root_classes(add));
        }
        report(platform.set_color_scheme(mode));
        if let Some(colors) = &config.theme_colors {
            let color = match mode {
                Mode::Dark => &colors.dark,
                Mode::Light => &colors.light,
            };
            report(platform.set_theme_color(color));
        }
    };

    if config.disable_transitions {
        platform.without_transitions(&mut restyle);
    } else {
        restyle();
    }
}

/// Read-only derived mode. Always `None` outside a browser.
pub struct EffectiveMode {
    pub(crate) store: Observable<Option<Mode>>,
}

impl EffectiveMode {
    pub fn new(
        preference: &UserPreference,
        system: &SystemPreference,
        platform: Rc<dyn Platform>,
        config: &WatcherConfig,
    ) -> Self {
        let preference = preference.store.clone();
        let system = system.store.clone();
        let config = Rc::new(config.clone());

        let store = Observable::with_start(None, move |setter: Setter<Option<Mode>>| {
            if !platform.is_browser() {
                return None;
            }

            let latest_preference = Rc::new(Cell::new(preference.peek()));
            let latest_system = Rc::new(Cell::new(system.peek()));
            // Hold off until both upstream subscriptions exist.
            let ready = Rc::new(Cell::new(false));

            let recompute: Rc<dyn Fn()> = {
                let latest_preference = Rc::clone(&latest_preference);
                let latest_system = Rc::clone(&latest_system);
                let ready = Rc::clone(&ready);
                let platform = Rc::clone(&platform);
                let config = Rc::clone(&config);
                Rc::new(move || {
                    if !ready.get() {
                        return;
                    }
                    let mode = latest_preference.get().resolve(latest_system.get());
                    if let Some(mode) = mode {
                        apply_mode(platform.as_ref(), mode, &config);
                    }
                    setter.set(mode);
                })
            };

            let preference_sub = {
                let recompute = Rc::clone(&recompute);
                preference.subscribe(move |value| {
                    latest_preference.set(*value);
                    recompute();
                })
            };
            let system_sub = {
                let recompute = Rc::clone(&recompute);
                system.subscribe(move |value| {
                    latest_system.set(*value);
                    recompute();
                })
            };

            ready.set(true);
            recompute();

            Some(Subscription::merge(vec![preference_sub, system_sub]))
        });

        Self { store }
    }

    #[must_use]
    pub fn get(&self) -> Option<Mode> {
        self.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&Option<Mode>) + 'static) -> Subscription {
        self.store.subscribe(observer)
    }
}

impl std::fmt::Debug for EffectiveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectiveMode").field("value", &self.store.peek()).finish()
    }
}
