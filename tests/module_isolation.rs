//! Fault Isolation Integration Tests
//!
//! Misbehaving modules must not take down the host or other modules.

use litcode_host::app::context::AppContext;
use litcode_host::module::api::{
    builtin_modules, Module, ModuleApi, ModuleError, ModuleInfo, ModuleResult,
};
use litcode_host::registry::api::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Subscribes a panicking listener and a panicking command, then fails
/// its own teardown
struct Saboteur;

#[async_trait::async_trait]
impl Module for Saboteur {
    fn module_info(&self) -> ModuleInfo {
        ModuleInfo::new("saboteur", "Saboteur", "6.6.6")
    }

    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()> {
        api.editor().on_open(|_| panic!("listener sabotage"));
        api.commands()
            .register(Command::new("saboteur.boom", "Boom", || panic!("command sabotage")));
        Ok(())
    }

    async fn deactivate(&self) -> ModuleResult<()> {
        Err(ModuleError::generic("teardown sabotage"))
    }
}

/// Never activates successfully
struct NeverReady;

#[async_trait::async_trait]
impl Module for NeverReady {
    fn module_info(&self) -> ModuleInfo {
        ModuleInfo::new("never-ready", "Never Ready", "0.0.1")
    }

    async fn activate(&self, _api: &ModuleApi) -> ModuleResult<()> {
        Err(ModuleError::generic("missing dependency"))
    }

    async fn deactivate(&self) -> ModuleResult<()> {
        Ok(())
    }
}

fn modules() -> Vec<Arc<dyn Module>> {
    let mut modules: Vec<Arc<dyn Module>> = vec![Arc::new(Saboteur), Arc::new(NeverReady)];
    modules.extend(builtin_modules());
    modules
}

#[tokio::test]
async fn test_faulty_modules_do_not_block_startup() {
    let context = AppContext::in_memory("litcode");
    context.init(modules()).await;

    let loader = context.loader();
    assert!(loader.is_active("saboteur"));
    assert!(!loader.is_active("never-ready"));
    assert!(loader.is_active("editor"));
    assert!(loader.is_active("settings"));
}

#[tokio::test]
async fn test_panicking_listener_does_not_silence_others() {
    let context = AppContext::in_memory("litcode");
    context.init(modules()).await;

    let opened = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&opened);
    context.bus().on("file:open", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let editor = context.loader().api_for("editor").unwrap();
    editor.editor().open_file("/w/main.ts");

    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(
        context.registry().get_current_file().map(|f| f.name),
        Some("main.ts".to_string())
    );
}

#[tokio::test]
async fn test_panicking_command_is_contained() {
    let context = AppContext::in_memory("litcode");
    context.init(modules()).await;

    assert!(context.registry().execute_command("saboteur.boom"));
    assert!(context.registry().execute_command("editor.save"));
}

#[tokio::test]
async fn test_failed_teardown_leaves_only_that_module_active() {
    let context = AppContext::in_memory("litcode");
    context.init(modules()).await;

    context.teardown().await;

    let still_active: Vec<String> = context
        .loader()
        .get_active_modules()
        .iter()
        .map(|m| m.module_info().id)
        .collect();
    assert_eq!(still_active, vec!["saboteur"]);
}
