//! Watcher configuration.
//!
//! All fields have defaults, so hosts usually start from
//! `WatcherConfig::default()` and adjust with the `with_*` builders, or ship a
//! JSON blob and parse it with [`WatcherConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::mode::UserMode;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Storage key the preference is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "mode";
/// Class added to the document root in dark mode.
pub const DEFAULT_DARK_CLASS: &str = "dark";

/// Error returned by [`WatcherConfig::from_json`] and [`WatcherConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid watcher config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("invalid class name {0:?}: class names must be non-empty and contain no whitespace")]
    InvalidClassName(String),
}

/// `<meta name="theme-color">` values per scheme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub dark: String,
    pub light: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub storage_key: String,
    /// Preference used when nothing valid is stored.
    pub default_mode: UserMode,
    pub dark_class_names: Vec<String>,
    pub light_class_names: Vec<String>,
    /// Suppress CSS transitions while the document is restyled.
    pub disable_transitions: bool,
    /// Initial tracking state of the system preference after mount.
    pub track: bool,
    pub theme_colors: Option<ThemeColors>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_mode: UserMode::System,
            dark_class_names: vec![DEFAULT_DARK_CLASS.to_owned()],
            light_class_names: Vec::new(),
            disable_transitions: true,
            track: true,
            theme_colors: None,
        }
    }
}

impl WatcherConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        for class in self.dark_class_names.iter().chain(&self.light_class_names) {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidClassName(class.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_default_mode(mut self, mode: UserMode) -> Self {
        self.default_mode = mode;
        self
    }

    #[must_use]
    pub fn with_dark_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dark_class_names = classes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_light_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.light_class_names = classes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_disable_transitions(mut self, disable: bool) -> Self {
        self.disable_transitions = disable;
        self
    }

    #[must_use]
    pub fn with_track(mut self, track: bool) -> Self {
        self.track = track;
        self
    }

    #[must_use]
    pub fn with_theme_colors(mut self, dark: impl Into<String>, light: impl Into<String>) -> Self {
        self.theme_colors = Some(ThemeColors { dark: dark.into(), light: light.into() });
        self
    }
}
