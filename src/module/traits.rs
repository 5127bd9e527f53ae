//! Module Trait
//!
//! The only shape the loader depends on: metadata plus two asynchronous
//! lifecycle hooks.

use crate::module::error::ModuleResult;
use crate::module::scoped_api::ModuleApi;
use crate::module::types::ModuleInfo;

/// A feature unit the host can activate and deactivate
///
/// Modules are owned by the embedding application and shared with the
/// loader as `Arc<dyn Module>`. Hooks take `&self`; modules keep any state
/// they need behind their own interior mutability.
#[async_trait::async_trait]
pub trait Module: Send + Sync {
    /// Module metadata; read once at registration
    fn module_info(&self) -> ModuleInfo;

    /// Populate the registry and subscribe to events
    ///
    /// `api` is the module's own scoped API. Clone it to keep it past the
    /// hook.
    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()>;

    /// Release whatever `activate` set up
    async fn deactivate(&self) -> ModuleResult<()>;
}
