//! Reactive color mode state.
//!
//! DESIGN
//! ======
//! Three cells in a chain: the user's preference and the OS scheme feed the
//! effective mode. Each is built explicitly over an injected platform; there
//! is no module-level state.

pub mod effective;
pub mod observable;
pub mod preference;
pub mod system;
