//! Platform for contexts without a browser (SSR, native builds).

use crate::mode::Mode;
use crate::subscription::Subscription;

use super::{Platform, PlatformError, StorageListener, SystemModeListener};

/// Reads return nothing, writes are discarded, no events ever fire.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPlatform;

impl Platform for NoopPlatform {
    fn is_browser(&self) -> bool {
        false
    }

    fn storage_get(&self, _key: &str) -> Result<Option<String>, PlatformError> {
        Err(PlatformError::StorageUnavailable)
    }

    fn storage_set(&self, _key: &str, _value: &str) -> Result<(), PlatformError> {
        Err(PlatformError::StorageUnavailable)
    }

    fn watch_storage(&self, _listener: StorageListener) -> Option<Subscription> {
        None
    }

    fn system_mode(&self) -> Option<Mode> {
        None
    }

    fn watch_system_mode(&self, _listener: SystemModeListener) -> Option<Subscription> {
        None
    }

    fn add_root_classes(&self, _classes: &[String]) -> Result<(), PlatformError> {
        Err(PlatformError::DocumentUnavailable)
    }

    fn remove_root_classes(&self, _classes: &[String]) -> Result<(), PlatformError> {
        Err(PlatformError::DocumentUnavailable)
    }

    fn set_color_scheme(&self, _mode: Mode) -> Result<(), PlatformError> {
        Err(PlatformError::DocumentUnavailable)
    }

    fn set_theme_color(&self, _color: &str) -> Result<(), PlatformError> {
        Err(PlatformError::DocumentUnavailable)
    }
}
