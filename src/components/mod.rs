//! Leptos components that host the watcher inside an application.
//!
//! SYSTEM CONTEXT
//! ==============
//! Place [`InitialModeScript`] in the SSR shell `<head>` and wrap the app in
//! [`ColorModeProvider`]; components read and change the mode through
//! [`use_mode`].

pub mod provider;

pub use provider::{ColorModeProvider, InitialModeScript, ModeContext, use_mode};
