//! Platform bindings for the host object model.

#[cfg(windows)]
pub mod windows;
