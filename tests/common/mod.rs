//! Common test utilities
//!
//! An out-of-crate module written only against the public API, the way a
//! third-party module would be.

use litcode_host::events::api::Subscription;
use litcode_host::module::api::{Module, ModuleApi, ModuleInfo, ModuleResult};
use litcode_host::registry::api::{Command, StatusBarAlignment, StatusBarContribution};
use std::sync::{Mutex, MutexGuard};

/// Counts saved files, shows the count in the status bar and remembers it
/// in module storage across restarts
#[derive(Default)]
pub struct SaveCounter {
    state: Mutex<Option<(ModuleApi, Subscription)>>,
}

pub const SAVE_COUNTER_ID: &str = "save-counter";
pub const COUNT_KEY: &str = "saves";

impl SaveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Option<(ModuleApi, Subscription)>> {
        self.state.lock().unwrap()
    }
}

fn status_item(count: u64) -> StatusBarContribution {
    StatusBarContribution::new(
        SAVE_COUNTER_ID,
        format!("{} saves", count),
        StatusBarAlignment::Left,
    )
}

#[async_trait::async_trait]
impl Module for SaveCounter {
    fn module_info(&self) -> ModuleInfo {
        ModuleInfo::new(SAVE_COUNTER_ID, "Save Counter", "0.1.0")
            .with_description("Counts file saves")
    }

    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()> {
        let initial: u64 = api.storage().get(COUNT_KEY).unwrap_or(0);
        api.ui().register_status_bar(status_item(initial));

        let handle = api.clone();
        let subscription = api.editor().on_save(move |_| {
            let count = handle.storage().get::<u64>(COUNT_KEY).unwrap_or(0) + 1;
            if handle.storage().set(COUNT_KEY, &count).is_ok() {
                handle.ui().register_status_bar(status_item(count));
            }
        });

        let storage = api.storage().clone();
        api.commands().register(Command::new(
            "save-counter.reset",
            "Reset Save Counter",
            move || {
                let _ = storage.remove(COUNT_KEY);
            },
        ));

        *self.state() = Some((api.clone(), subscription));
        Ok(())
    }

    async fn deactivate(&self) -> ModuleResult<()> {
        if let Some((api, subscription)) = self.state().take() {
            subscription.unsubscribe();
            api.ui().unregister_status_bar(SAVE_COUNTER_ID);
            api.commands().unregister("save-counter.reset");
        }
        Ok(())
    }
}
