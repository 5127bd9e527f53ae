//! Extension host for the Litcode editor
//!
//! Feature modules register with a loader, receive a capability-scoped API
//! and talk to each other only through a shared event bus and a registry of
//! UI contributions.

pub mod app;
pub mod core;
pub mod events;
pub mod host;
pub mod module;
pub mod registry;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the host API version from the build script into u32
pub fn get_host_api_version() -> u32 {
    HOST_API_VERSION.parse().unwrap_or(20250727)
}
