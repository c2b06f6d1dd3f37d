//! Mode context provider and the pre-hydration script tag.
//!
//! TRADE-OFFS
//! ==========
//! The watcher itself is `!Send` and cannot live in Leptos context, so the
//! provider exposes plain signals and bridges them to a watcher it owns.
//! Outside `hydrate` builds the signals hold the defaults and never change.

use leptos::prelude::*;

use crate::config::WatcherConfig;
use crate::mode::{Mode, UserMode};
use crate::script::initial_mode_script;

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

/// Signals exposed to descendants of [`ColorModeProvider`].
#[derive(Clone, Copy, Debug)]
pub struct ModeContext {
    /// Writable preference; writes are persisted by the watcher.
    pub preference: RwSignal<UserMode>,
    pub system: ReadSignal<Option<Mode>>,
    /// Effective mode applied to the document.
    pub mode: ReadSignal<Option<Mode>>,
}

impl ModeContext {
    pub fn set(&self, mode: UserMode) {
        self.preference.set(mode);
    }

    pub fn reset(&self) {
        self.preference.set(UserMode::System);
    }

    /// Switch to the opposite of the effective mode.
    pub fn toggle(&self) {
        let next = self.mode.get_untracked().map_or(Mode::Dark, Mode::inverted);
        self.preference.set(next.into());
    }
}

/// The [`ModeContext`] provided by an enclosing [`ColorModeProvider`].
pub fn use_mode() -> Option<ModeContext> {
    use_context::<ModeContext>()
}

/// Inline script that applies the stored mode before the app hydrates.
#[component]
pub fn InitialModeScript(#[prop(optional)] config: Option<WatcherConfig>) -> impl IntoView {
    let script = initial_mode_script(&config.unwrap_or_default());
    view! { <script inner_html=script></script> }
}

/// Owns a mode watcher for the lifetime of its reactive owner.
#[component]
pub fn ColorModeProvider(#[prop(optional)] config: Option<WatcherConfig>, children: Children) -> impl IntoView {
    provide_context(mode_context(config.unwrap_or_default()));
    children()
}

/// Signals start at the values the server rendered with: the configured
/// default and an unknown mode.
fn mode_context(config: WatcherConfig) -> ModeContext {
    let preference = RwSignal::new(config.default_mode);
    let (system, set_system) = signal(None::<Mode>);
    let (mode, set_mode) = signal(None::<Mode>);

    #[cfg(feature = "hydrate")]
    attach_watcher(config, preference, set_system, set_mode);
    #[cfg(not(feature = "hydrate"))]
    drop((config, set_system, set_mode));

    ModeContext { preference, system, mode }
}

/// Bridges a browser watcher to the context signals.
///
/// Effects first run after hydration, so the stored mode reaches the signals
/// only once the server markup has been adopted.
#[cfg(feature = "hydrate")]
fn attach_watcher(
    config: WatcherConfig,
    preference: RwSignal<UserMode>,
    set_system: WriteSignal<Option<Mode>>,
    set_mode: WriteSignal<Option<Mode>>,
) {
    use std::rc::Rc;

    use crate::platform::BrowserPlatform;
    use crate::subscription::Subscription;
    use crate::watcher::ModeWatcher;

    let watcher = ModeWatcher::new(Rc::new(BrowserPlatform::new()), config);
    // Dropped with the effect when the owner is disposed.
    let mut attached: Option<Subscription> = None;

    Effect::new(move || {
        let requested = preference.get();
        if attached.is_none() {
            attached = Some(Subscription::merge(vec![
                watcher.preference().subscribe(move |value| preference.set(*value)),
                watcher.system().subscribe(move |value| set_system.set(*value)),
                watcher.effective().subscribe(move |value| set_mode.set(*value)),
                watcher.mount(),
            ]));
            return;
        }
        if watcher.preference().get() != requested {
            watcher.set_mode(requested);
        }
    });
}
