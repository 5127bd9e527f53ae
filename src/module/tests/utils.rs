//! Module Test Utilities
//!
//! Configurable mock module and helpers shared by the module host tests.

use crate::events::api::EventBus;
use crate::host::api::DisconnectedHost;
use crate::module::api::*;
use crate::registry::api::ContributionRegistry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How a mock hook behaves when called
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookBehavior {
    Succeed,
    Fail,
    Panic,
}

#[derive(Debug)]
pub struct MockModule {
    pub info: ModuleInfo,
    pub on_activate: HookBehavior,
    pub on_deactivate: HookBehavior,
    pub activations: AtomicUsize,
    pub deactivations: AtomicUsize,
    pub received_api: Mutex<Option<ModuleApi>>,
}

impl MockModule {
    pub fn new(id: &str) -> Self {
        Self {
            info: ModuleInfo::new(id, format!("Mock {}", id), "1.0.0"),
            on_activate: HookBehavior::Succeed,
            on_deactivate: HookBehavior::Succeed,
            activations: AtomicUsize::new(0),
            deactivations: AtomicUsize::new(0),
            received_api: Mutex::new(None),
        }
    }

    pub fn with_activate(mut self, behavior: HookBehavior) -> Self {
        self.on_activate = behavior;
        self
    }

    pub fn with_deactivate(mut self, behavior: HookBehavior) -> Self {
        self.on_deactivate = behavior;
        self
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn deactivations(&self) -> usize {
        self.deactivations.load(Ordering::SeqCst)
    }

    fn outcome(&self, behavior: HookBehavior, hook: &str) -> ModuleResult<()> {
        match behavior {
            HookBehavior::Succeed => Ok(()),
            HookBehavior::Fail => Err(ModuleError::generic(format!(
                "{} refused to {}",
                self.info.id, hook
            ))),
            HookBehavior::Panic => panic!("{} crashed in {}", self.info.id, hook),
        }
    }
}

#[async_trait::async_trait]
impl Module for MockModule {
    fn module_info(&self) -> ModuleInfo {
        self.info.clone()
    }

    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        *self.received_api.lock().unwrap() = Some(api.clone());
        tokio::task::yield_now().await;
        self.outcome(self.on_activate, "activate")
    }

    async fn deactivate(&self) -> ModuleResult<()> {
        self.deactivations.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.outcome(self.on_deactivate, "deactivate")
    }
}

/// Factory over fresh in-memory services
pub fn factory() -> ModuleApiFactory {
    let bus = EventBus::new();
    let registry = Arc::new(ContributionRegistry::new(bus.clone()));
    ModuleApiFactory::new(
        bus,
        registry,
        Arc::new(DisconnectedHost),
        Arc::new(MemoryStorage::new()),
        "litcode",
    )
}

pub fn loader() -> ModuleLoader {
    ModuleLoader::new(factory())
}
