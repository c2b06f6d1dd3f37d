//! # mode-watcher
//!
//! Dark/light/system color mode tracking for Leptos + WASM frontends.
//!
//! The user's preference is persisted to `localStorage`, the OS scheme is
//! followed through `prefers-color-scheme`, and the resulting mode is applied
//! to `<html>` as a class plus an inline `color-scheme`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`mode`] | `UserMode` / `Mode` values and the resolution rule |
//! | [`state`] | Observable cells: preference, system scheme, effective mode |
//! | [`watcher`] | [`ModeWatcher`] composition root and mode controls |
//! | [`platform`] | Injected host capabilities (browser, no-op, in-memory) |
//! | [`config`] | [`WatcherConfig`] and its defaults |
//! | [`script`] | Pre-hydration inline script |
//! | [`components`] | Leptos provider and context |
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use mode_watcher::{Mode, ModeWatcher, UserMode, WatcherConfig};
//! use mode_watcher::platform::MemoryPlatform;
//!
//! let platform = MemoryPlatform::new().with_system_mode(Mode::Dark);
//! let watcher = ModeWatcher::new(Rc::new(platform.clone()), WatcherConfig::default());
//! let _mounted = watcher.mount();
//! assert_eq!(watcher.mode(), Some(Mode::Dark));
//!
//! watcher.set_mode(UserMode::Light);
//! assert!(!platform.document().has_class("dark"));
//! ```

pub mod components;
pub mod config;
pub mod mode;
pub mod platform;
pub mod script;
pub mod state;
pub mod subscription;
pub mod watcher;

pub use config::{ConfigError, ThemeColors, WatcherConfig};
pub use mode::{Mode, ModeParseError, UserMode};
pub use script::initial_mode_script;
pub use subscription::Subscription;
pub use watcher::ModeWatcher;

/// Route `log` output to the browser console and install the panic hook.
#[cfg(feature = "hydrate")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {e}");
    }
}
