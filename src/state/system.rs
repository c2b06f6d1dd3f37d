//! The color scheme reported by the operating environment.

use std::cell::Cell;
use std::rc::Rc;

use crate::mode::Mode;
use crate::platform::Platform;
use crate::subscription::Subscription;

use super::observable::{Observable, Setter};

#[cfg(test)]
#[path = "system_test.rs"]
mod system_test;

/// Readable {dark, light, unknown} system scheme.
///
/// Starts unknown. It becomes known through [`query`](Self::query) or through
/// a change event that arrives while observed and tracking.
pub struct SystemPreference {
    pub(crate) store: Observable<Option<Mode>>,
    platform: Rc<dyn Platform>,
    tracking: Rc<Cell<bool>>,
}

impl SystemPreference {
    pub fn new(platform: Rc<dyn Platform>) -> Self {
        let tracking = Rc::new(Cell::new(true));

        let store = {
            let platform = Rc::clone(&platform);
            let tracking = Rc::clone(&tracking);
            Observable::with_start(None, move |setter: Setter<Option<Mode>>| {
                if !platform.is_browser() {
                    return None;
                }
                let tracking = Rc::clone(&tracking);
                platform.watch_system_mode(Rc::new(move |mode: Mode| {
                    if tracking.get() {
                        setter.set(Some(mode));
                    }
                }))
            })
        };

        Self { store, platform, tracking }
    }

    #[must_use]
    pub fn get(&self) -> Option<Mode> {
        self.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&Option<Mode>) + 'static) -> Subscription {
        self.store.subscribe(observer)
    }

    /// Read the OS scheme now. No-op outside a browser.
    pub fn query(&self) {
        if !self.platform.is_browser() {
            return;
        }
        match self.platform.system_mode() {
            Some(mode) => {
                self.store.set(Some(mode));
            }
            None => log::debug!("system color scheme not available"),
        }
    }

    /// Enable or freeze updates from change events.
    pub fn set_tracking(&self, active: bool) {
        self.tracking.set(active);
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking.get()
    }
}

impl std::fmt::Debug for SystemPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemPreference")
            .field("value", &self.store.peek())
            .field("tracking", &self.tracking.get())
            .finish_non_exhaustive()
    }
}
