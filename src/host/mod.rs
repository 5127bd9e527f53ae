//! Host Command Boundary
//!
//! Filesystem, version-control and debug-adapter work happens outside this
//! process. Modules reach it through named request/response commands issued
//! on a [`api::HostCommandInterface`], wrapped here in typed proxies.

pub(crate) mod error;
pub(crate) mod interface;
pub(crate) mod proxies;
pub(crate) mod types;

pub mod api;

#[cfg(test)]
mod tests;
