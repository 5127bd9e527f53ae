//! Module Host
//!
//! Feature modules register with the [`api::ModuleLoader`], receive a
//! capability-scoped [`api::ModuleApi`] and are driven through their
//! activate/deactivate lifecycle.
//!
//! # State machine
//!
//! Unregistered → Registered → Active, and Active → Registered on
//! deactivation. There is no unregister; records live as long as the loader.

// Internal modules - all access should go through api module
pub(crate) mod builtin;
pub(crate) mod error;
pub(crate) mod loader;
pub(crate) mod scoped_api;
pub(crate) mod storage;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the module host
pub mod api;

#[cfg(test)]
mod tests;
