//! Contribution Registry Module
//!
//! Tables of UI contributions, commands, keybindings and language
//! associations registered by modules and read by the shell.

// Internal modules - all access should go through api module
pub(crate) mod contributions;
pub(crate) mod table;
pub(crate) mod types;

// Public API module - the only public interface for the registry
pub mod api;

#[cfg(test)]
mod tests;
