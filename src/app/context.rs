//! Application context
//!
//! Owns the one bus, registry and loader of a host instance. Tests build as
//! many isolated contexts as they like.

use crate::events::api::EventBus;
use crate::host::api::{DisconnectedHost, HostCommandInterface};
use crate::module::api::{
    MemoryStorage, Module, ModuleApiFactory, ModuleLoader, StorageBackend,
};
use crate::registry::api::ContributionRegistry;
use std::sync::Arc;

pub struct AppContext {
    bus: EventBus,
    registry: Arc<ContributionRegistry>,
    loader: ModuleLoader,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("registry", &self.registry)
            .field("loader", &self.loader)
            .finish()
    }
}

impl AppContext {
    pub fn new(
        host: Arc<dyn HostCommandInterface>,
        storage: Arc<dyn StorageBackend>,
        namespace: &str,
    ) -> Self {
        let bus = EventBus::new();
        let registry = Arc::new(ContributionRegistry::new(bus.clone()));
        let factory = ModuleApiFactory::new(
            bus.clone(),
            Arc::clone(&registry),
            host,
            storage,
            namespace,
        );
        Self {
            bus,
            registry,
            loader: ModuleLoader::new(factory),
        }
    }

    /// Context with no host backend and non-persistent storage
    pub fn in_memory(namespace: &str) -> Self {
        Self::new(
            Arc::new(DisconnectedHost),
            Arc::new(MemoryStorage::new()),
            namespace,
        )
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn registry(&self) -> &Arc<ContributionRegistry> {
        &self.registry
    }

    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    /// Register `modules` in order, then activate all of them
    pub async fn init(&self, modules: Vec<Arc<dyn Module>>) {
        for module in modules {
            self.loader.register(module);
        }
        self.loader.activate_all().await;
        log::info!(
            "Host ready: {} of {} modules active",
            self.loader.get_active_modules().len(),
            self.loader.module_count()
        );
    }

    /// Deactivate every active module and drop every bus subscription
    pub async fn teardown(&self) {
        self.loader.deactivate_all().await;
        self.bus.clear(None);
        log::info!("Host stopped");
    }
}
