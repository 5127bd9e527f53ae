//! Loader state machine tests

use super::utils::{factory, loader, HookBehavior, MockModule};
use crate::events::api::Topic;
use crate::module::api::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_register_then_activate_then_deactivate() {
    let loader = loader();
    let module = Arc::new(MockModule::new("search"));

    assert_eq!(loader.state("search"), None);
    loader.register(module.clone());
    assert_eq!(loader.state("search"), Some(ModuleState::Registered));

    loader.activate("search").await;
    assert_eq!(loader.state("search"), Some(ModuleState::Active));
    assert_eq!(module.activations(), 1);

    loader.deactivate("search").await;
    assert_eq!(loader.state("search"), Some(ModuleState::Registered));
    assert_eq!(module.deactivations(), 1);
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first_record_and_api() {
    let loader = loader();
    let first = Arc::new(MockModule::new("terminal"));
    let second = Arc::new(MockModule::new("terminal"));

    loader.register(first.clone());
    let api = loader.api_for("terminal").unwrap();
    loader.register(second.clone());

    assert_eq!(loader.module_count(), 1);
    assert!(ModuleApi::ptr_eq(&api, &loader.api_for("terminal").unwrap()));

    loader.activate("terminal").await;
    assert_eq!(first.activations(), 1);
    assert_eq!(second.activations(), 0);
}

#[tokio::test]
async fn test_activate_passes_cached_api() {
    let loader = loader();
    let module = Arc::new(MockModule::new("git-diff"));
    loader.register(module.clone());
    loader.activate("git-diff").await;

    let received = module.received_api.lock().unwrap().clone().unwrap();
    assert_eq!(received.module_id(), "git-diff");
    assert!(ModuleApi::ptr_eq(
        &received,
        &loader.api_for("git-diff").unwrap()
    ));
}

#[tokio::test]
async fn test_unknown_ids_are_noops() {
    let loader = loader();
    loader.register(Arc::new(MockModule::new("known")));
    loader.activate("known").await;

    loader.activate("ghost").await;
    loader.deactivate("ghost").await;

    assert_eq!(loader.state("ghost"), None);
    assert_eq!(loader.module_count(), 1);
    assert!(loader.is_active("known"));
}

#[tokio::test]
async fn test_activating_active_module_does_not_rerun_hook() {
    let loader = loader();
    let module = Arc::new(MockModule::new("editor"));
    loader.register(module.clone());

    loader.activate("editor").await;
    loader.activate("editor").await;
    assert_eq!(module.activations(), 1);
}

#[tokio::test]
async fn test_deactivating_inactive_module_does_not_run_hook() {
    let loader = loader();
    let module = Arc::new(MockModule::new("editor"));
    loader.register(module.clone());

    loader.deactivate("editor").await;
    assert_eq!(module.deactivations(), 0);
    assert_eq!(loader.state("editor"), Some(ModuleState::Registered));
}

#[tokio::test]
async fn test_failed_activation_leaves_module_inactive() {
    let loader = loader();
    let failing = Arc::new(MockModule::new("broken").with_activate(HookBehavior::Fail));
    loader.register(failing.clone());

    loader.activate("broken").await;
    assert_eq!(loader.state("broken"), Some(ModuleState::Registered));

    // Activation may be retried explicitly
    loader.activate("broken").await;
    assert_eq!(failing.activations(), 2);
}

#[tokio::test]
async fn test_panicking_activation_is_contained() {
    let loader = loader();
    loader.register(Arc::new(
        MockModule::new("crashy").with_activate(HookBehavior::Panic),
    ));
    let healthy = Arc::new(MockModule::new("healthy"));
    loader.register(healthy.clone());

    loader.activate_all().await;

    assert!(!loader.is_active("crashy"));
    assert!(loader.is_active("healthy"));
}

#[tokio::test]
async fn test_failed_deactivation_leaves_module_active() {
    let loader = loader();
    loader.register(Arc::new(
        MockModule::new("sticky").with_deactivate(HookBehavior::Fail),
    ));
    loader.register(Arc::new(
        MockModule::new("panicky").with_deactivate(HookBehavior::Panic),
    ));
    loader.activate_all().await;

    loader.deactivate_all().await;

    assert!(loader.is_active("sticky"));
    assert!(loader.is_active("panicky"));
    assert_eq!(loader.get_active_modules().len(), 2);
}

#[tokio::test]
async fn test_activate_all_then_deactivate_all_empties_active_set() {
    let loader = loader();
    let ids = ["settings", "debugger", "editor", "search"];
    for id in ids {
        loader.register(Arc::new(MockModule::new(id)));
    }

    loader.activate_all().await;
    assert_eq!(loader.get_active_modules().len(), ids.len());

    loader.deactivate_all().await;
    assert!(loader.get_active_modules().is_empty());
    assert_eq!(loader.get_all_modules().len(), ids.len());
}

#[tokio::test]
async fn test_activate_all_runs_in_registration_order() {
    let factory = factory();
    let order = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&order);
    factory.bus().on(Topic::ModuleActivated, move |payload| {
        if let Some(id) = payload["moduleId"].as_str() {
            sink.lock().unwrap().push(id.to_string());
        }
    });

    let loader = ModuleLoader::new(factory);
    for id in ["c", "a", "b"] {
        loader.register(Arc::new(MockModule::new(id)));
    }
    loader.activate("a").await;
    order.lock().unwrap().clear();

    loader.activate_all().await;
    assert_eq!(*order.lock().unwrap(), vec!["c", "b"]);
}

#[tokio::test]
async fn test_lifecycle_notifications_carry_module_id() {
    let factory = factory();
    let seen: Arc<Mutex<Vec<(String, Value)>>> = Arc::new(Mutex::new(Vec::new()));
    for topic in [Topic::ModuleActivated, Topic::ModuleDeactivated] {
        let sink = Arc::clone(&seen);
        factory.bus().on(topic, move |payload| {
            sink.lock().unwrap().push((topic.to_string(), payload.clone()));
        });
    }

    let loader = ModuleLoader::new(factory);
    loader.register(Arc::new(MockModule::new("search")));
    loader.register(Arc::new(
        MockModule::new("broken").with_activate(HookBehavior::Fail),
    ));
    loader.activate_all().await;
    loader.deactivate("search").await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("plugin:activate".to_string(), json!({ "moduleId": "search" })),
            ("plugin:deactivate".to_string(), json!({ "moduleId": "search" })),
        ]
    );
}

#[tokio::test]
async fn test_queries() {
    let loader = loader();
    loader.register(Arc::new(MockModule::new("one")));
    loader.register(Arc::new(MockModule::new("two")));
    loader.activate("two").await;

    assert!(loader.get_module("one").is_some());
    assert!(loader.get_module("three").is_none());
    assert!(!loader.is_active("one"));
    assert!(!loader.is_active("three"));

    let active: Vec<String> = loader
        .get_active_modules()
        .iter()
        .map(|m| m.module_info().id)
        .collect();
    assert_eq!(active, vec!["two"]);

    let states = loader.module_states();
    assert_eq!(states[0].1, ModuleState::Registered);
    assert_eq!(states[1].1, ModuleState::Active);
}
