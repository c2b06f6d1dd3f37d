//! Color mode values and the resolution rule between them.
//!
//! `UserMode` is what the user picked (including "follow the system");
//! `Mode` is a concrete scheme. System and effective values are carried as
//! `Option<Mode>` where `None` means not yet known.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

/// Error returned when a string is not a recognized mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color mode: {0:?}")]
pub struct ModeParseError(pub String);

/// A concrete color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dark,
    Light,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The opposite scheme.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's explicit preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    Dark,
    Light,
    /// Follow whatever the operating environment reports.
    #[default]
    System,
}

impl UserMode {
    /// Canonical persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        }
    }

    /// Parse a persisted value, treating anything unrecognized as absent.
    #[must_use]
    pub fn from_persisted(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::parse::<Self>) {
            Some(Ok(mode)) => Some(mode),
            _ => None,
        }
    }

    /// Resolve this preference against the system scheme.
    #[must_use]
    pub fn resolve(self, system: Option<Mode>) -> Option<Mode> {
        match self {
            Self::Dark => Some(Mode::Dark),
            Self::Light => Some(Mode::Light),
            Self::System => system,
        }
    }
}

impl From<Mode> for UserMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Dark => Self::Dark,
            Mode::Light => Self::Light,
        }
    }
}

impl FromStr for UserMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "system" => Ok(Self::System),
            other => Err(ModeParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
