//! Host capabilities the watcher depends on.
//!
//! SYSTEM CONTEXT
//! ==============
//! The stores never probe for `window` themselves. The host picks a
//! [`Platform`] at construction: [`BrowserPlatform`] when hydrated in a
//! browser, [`NoopPlatform`] for SSR and native builds, and
//! [`MemoryPlatform`] for headless hosts and tests.
//!
//! Every operation is best-effort. Failures are reported as
//! [`PlatformError`] so callers can log them, but nothing above this layer
//! surfaces them to the user.

use std::rc::Rc;

use crate::mode::Mode;
use crate::subscription::Subscription;

#[cfg(feature = "hydrate")]
mod browser;
mod memory;
mod noop;

#[cfg(feature = "hydrate")]
pub use browser::BrowserPlatform;
pub use memory::{DocumentState, MemoryPlatform};
pub use noop::NoopPlatform;

/// Error returned by platform operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// No key-value storage in this context (SSR, privacy mode, ...).
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
    /// No document to mutate.
    #[error("document unavailable")]
    DocumentUnavailable,
    #[error("dom operation failed: {0}")]
    Dom(String),
}

/// A change to persisted storage made outside this watcher (another tab).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageChange {
    /// `None` when the whole storage area was cleared. A clear removes every
    /// key, so listeners treat it as a removal of the key they track.
    pub key: Option<String>,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}

pub type StorageListener = Rc<dyn Fn(&StorageChange)>;
pub type SystemModeListener = Rc<dyn Fn(Mode)>;

/// Capability set injected into the watcher.
pub trait Platform {
    /// Whether storage, media queries and the document exist at all.
    fn is_browser(&self) -> bool;

    fn storage_get(&self, key: &str) -> Result<Option<String>, PlatformError>;

    fn storage_set(&self, key: &str, value: &str) -> Result<(), PlatformError>;

    /// Listen for external storage changes. `None` when unsupported.
    fn watch_storage(&self, listener: StorageListener) -> Option<Subscription>;

    /// Read the OS color scheme right now. `None` when unsupported.
    fn system_mode(&self) -> Option<Mode>;

    /// Listen for OS color scheme changes. `None` when unsupported.
    fn watch_system_mode(&self, listener: SystemModeListener) -> Option<Subscription>;

    fn add_root_classes(&self, classes: &[String]) -> Result<(), PlatformError>;

    fn remove_root_classes(&self, classes: &[String]) -> Result<(), PlatformError>;

    /// Set the root element's inline `color-scheme`.
    fn set_color_scheme(&self, mode: Mode) -> Result<(), PlatformError>;

    /// Set the `theme-color` meta content, when such a tag exists.
    fn set_theme_color(&self, color: &str) -> Result<(), PlatformError>;

    /// Run `action` with CSS transitions suppressed.
    fn without_transitions(&self, action: &mut dyn FnMut()) {
        action();
    }
}
