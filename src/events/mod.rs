//! Event System Module
//!
//! In-process, topic-based publish/subscribe shared by every module.

// Internal modules - all access should go through api module
pub(crate) mod bus;
pub(crate) mod topics;

// Public API module - the only public interface for the event system
pub mod api;

#[cfg(test)]
mod tests;
