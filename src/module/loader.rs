//! Module Loader
//!
//! Owns one record per registered module: the module, its cached scoped API
//! and whether it is active. Lifecycle errors never escape the loader; each
//! one is logged at the level its kind calls for and the operation becomes a
//! no-op.

use crate::core::isolation::panic_message;
use crate::events::api::{EventBus, Topic};
use crate::module::error::{ModuleError, ModuleResult};
use crate::module::scoped_api::{ModuleApi, ModuleApiFactory};
use crate::module::traits::Module;
use crate::module::types::{ModuleInfo, ModuleState};
use futures::FutureExt;
use serde_json::json;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct ModuleRecord {
    info: ModuleInfo,
    module: Arc<dyn Module>,
    api: ModuleApi,
    active: bool,
}

impl ModuleRecord {
    fn state(&self) -> ModuleState {
        if self.active {
            ModuleState::Active
        } else {
            ModuleState::Registered
        }
    }
}

/// Lifecycle manager for every installed module
pub struct ModuleLoader {
    factory: ModuleApiFactory,
    records: Mutex<Vec<ModuleRecord>>,
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let records = self.records();
        let modules: Vec<(&str, ModuleState)> = records
            .iter()
            .map(|record| (record.info.id.as_str(), record.state()))
            .collect();
        f.debug_struct("ModuleLoader")
            .field("modules", &modules)
            .finish()
    }
}

/// Await a lifecycle hook, turning errors and panics into `HookFailed`
async fn run_hook<F>(module_id: &str, hook: &str, future: F) -> ModuleResult<()>
where
    F: Future<Output = ModuleResult<()>>,
{
    let cause = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(error)) => error.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    Err(ModuleError::HookFailed {
        module_id: module_id.to_string(),
        hook: hook.to_string(),
        cause,
    })
}

impl ModuleLoader {
    pub fn new(factory: ModuleApiFactory) -> Self {
        Self {
            factory,
            records: Mutex::new(Vec::new()),
        }
    }

    fn records(&self) -> MutexGuard<'_, Vec<ModuleRecord>> {
        // No hook runs while the lock is held
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Factory the scoped APIs are built from
    pub fn factory(&self) -> &ModuleApiFactory {
        &self.factory
    }

    fn bus(&self) -> &EventBus {
        self.factory.bus()
    }

    /// Register `module` and build its scoped API
    ///
    /// Registering an id twice is a warning and never replaces the stored
    /// module or its API.
    pub fn register(&self, module: Arc<dyn Module>) {
        if let Err(e) = self.try_register(module) {
            log::warn!("{}", e);
        }
    }

    fn try_register(&self, module: Arc<dyn Module>) -> ModuleResult<()> {
        let info = module.module_info();
        let mut records = self.records();
        if records.iter().any(|record| record.info.id == info.id) {
            return Err(ModuleError::AlreadyRegistered { module_id: info.id });
        }

        let api = self.factory.create(&info.id);
        log::info!("Registered module: {} v{}", info.id, info.version);
        records.push(ModuleRecord {
            info,
            module,
            api,
            active: false,
        });
        Ok(())
    }

    /// Activate module `id`
    ///
    /// Unknown ids and hook failures are logged as errors, an already active
    /// module as a warning. A failed hook leaves the module registered but
    /// inactive.
    pub async fn activate(&self, id: &str) {
        match self.try_activate(id).await {
            Ok(()) => {}
            Err(e) if e.is_guard() => log::warn!("{}", e),
            Err(e) => log::error!("{}", e),
        }
    }

    async fn try_activate(&self, id: &str) -> ModuleResult<()> {
        let (module, api) = {
            let records = self.records();
            let record = Self::find(&records, id)?;
            if record.active {
                return Err(ModuleError::InvalidTransition {
                    module_id: id.to_string(),
                    operation: "activate".to_string(),
                    state: ModuleState::Active,
                });
            }
            (Arc::clone(&record.module), record.api.clone())
        };

        run_hook(id, "activate", module.activate(&api)).await?;

        self.set_active(id, true);
        log::info!("Activated module: {}", id);
        self.bus()
            .emit(Topic::ModuleActivated, json!({ "moduleId": id }));
        Ok(())
    }

    /// Deactivate module `id`
    ///
    /// Unknown or inactive modules are warnings. A failed hook is logged as
    /// an error and the module stays active.
    pub async fn deactivate(&self, id: &str) {
        match self.try_deactivate(id).await {
            Ok(()) => {}
            Err(e @ ModuleError::HookFailed { .. }) => log::error!("{}", e),
            Err(e) => log::warn!("{}", e),
        }
    }

    async fn try_deactivate(&self, id: &str) -> ModuleResult<()> {
        let module = {
            let records = self.records();
            let record = Self::find(&records, id)?;
            if !record.active {
                return Err(ModuleError::InvalidTransition {
                    module_id: id.to_string(),
                    operation: "deactivate".to_string(),
                    state: ModuleState::Registered,
                });
            }
            Arc::clone(&record.module)
        };

        run_hook(id, "deactivate", module.deactivate()).await?;

        self.set_active(id, false);
        log::info!("Deactivated module: {}", id);
        self.bus()
            .emit(Topic::ModuleDeactivated, json!({ "moduleId": id }));
        Ok(())
    }

    /// Activate every registered module, one at a time, in registration order
    pub async fn activate_all(&self) {
        for id in self.ids() {
            self.activate(&id).await;
        }
    }

    /// Deactivate every active module, one at a time, in registration order
    pub async fn deactivate_all(&self) {
        for id in self.ids() {
            if self.is_active(&id) {
                self.deactivate(&id).await;
            }
        }
    }

    pub fn get_module(&self, id: &str) -> Option<Arc<dyn Module>> {
        let records = self.records();
        Self::find(&records, id)
            .ok()
            .map(|record| Arc::clone(&record.module))
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state(id) == Some(ModuleState::Active)
    }

    /// Lifecycle state of `id`; `None` if it was never registered
    pub fn state(&self, id: &str) -> Option<ModuleState> {
        let records = self.records();
        Self::find(&records, id).ok().map(ModuleRecord::state)
    }

    /// The scoped API built for `id` at registration
    pub fn api_for(&self, id: &str) -> Option<ModuleApi> {
        let records = self.records();
        Self::find(&records, id).ok().map(|record| record.api.clone())
    }

    /// All modules in registration order
    pub fn get_all_modules(&self) -> Vec<Arc<dyn Module>> {
        self.records()
            .iter()
            .map(|record| Arc::clone(&record.module))
            .collect()
    }

    /// Active modules in registration order
    pub fn get_active_modules(&self) -> Vec<Arc<dyn Module>> {
        self.records()
            .iter()
            .filter(|record| record.active)
            .map(|record| Arc::clone(&record.module))
            .collect()
    }

    /// Metadata and state of every module in registration order
    pub fn module_states(&self) -> Vec<(ModuleInfo, ModuleState)> {
        self.records()
            .iter()
            .map(|record| (record.info.clone(), record.state()))
            .collect()
    }

    pub fn module_count(&self) -> usize {
        self.records().len()
    }

    fn ids(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|record| record.info.id.clone())
            .collect()
    }

    fn find<'a>(records: &'a [ModuleRecord], id: &str) -> ModuleResult<&'a ModuleRecord> {
        records
            .iter()
            .find(|record| record.info.id == id)
            .ok_or_else(|| ModuleError::NotFound {
                module_id: id.to_string(),
            })
    }

    fn set_active(&self, id: &str, active: bool) {
        if let Some(record) = self
            .records()
            .iter_mut()
            .find(|record| record.info.id == id)
        {
            record.active = active;
        }
    }
}
