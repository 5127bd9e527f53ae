//! Delivery order, payload sharing and clearing

use crate::events::api::{EventBus, Topic};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&Value) + Send + Sync>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_for_factory = Arc::clone(&log);
    let factory = move |label: &str| -> Box<dyn Fn(&Value) + Send + Sync> {
        let log = Arc::clone(&log_for_factory);
        let label = label.to_string();
        Box::new(move |payload: &Value| {
            log.lock().unwrap().push(format!("{}:{}", label, payload));
        })
    };
    (log, factory)
}

#[test]
fn test_emit_without_subscribers_is_noop() {
    let bus = EventBus::new();
    bus.emit("nobody:listens", Value::Null);
    bus.emit(Topic::FileSave, json!({"path": "/tmp/a.rs"}));
}

#[test]
fn test_callbacks_run_in_registration_order_with_same_payload() {
    let bus = EventBus::new();
    let (log, make) = recorder();

    let first = make("first");
    let second = make("second");
    let third = make("third");
    bus.on(Topic::FileOpen, move |p| first(p));
    bus.on(Topic::FileOpen, move |p| second(p));
    bus.on("file:open", move |p| third(p));

    bus.emit(Topic::FileOpen, json!({"path": "src/main.rs"}));

    let payload = r#"{"path":"src/main.rs"}"#;
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            format!("first:{}", payload),
            format!("second:{}", payload),
            format!("third:{}", payload),
        ]
    );
}

#[test]
fn test_topics_are_independent() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let open = make("open");
    let close = make("close");
    bus.on(Topic::TabOpen, move |p| open(p));
    bus.on(Topic::TabClose, move |p| close(p));

    bus.emit(Topic::TabClose, json!(3));

    assert_eq!(*log.lock().unwrap(), vec!["close:3".to_string()]);
}

#[test]
fn test_unsubscribe_is_idempotent_and_targets_one_callback() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let a = make("a");
    let b = make("b");
    let sub_a = bus.on("tab:change", move |p| a(p));
    bus.on("tab:change", move |p| b(p));

    sub_a.unsubscribe();
    sub_a.unsubscribe();
    bus.emit("tab:change", json!(1));

    assert_eq!(*log.lock().unwrap(), vec!["b:1".to_string()]);
}

#[test]
fn test_callback_removed_mid_emit_is_skipped() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let later = make("later");

    let victim: Arc<Mutex<Option<crate::events::api::Subscription>>> = Arc::new(Mutex::new(None));
    let victim_handle = Arc::clone(&victim);
    bus.on("editor:focus", move |_| {
        if let Some(sub) = victim_handle.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
    });
    let sub = bus.on("editor:focus", move |p| later(p));
    *victim.lock().unwrap() = Some(sub);

    bus.emit("editor:focus", Value::Null);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_callback_may_emit_reentrantly() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let inner = make("inner");
    bus.on("debug:stop", move |p| inner(p));

    let reemit = bus.clone();
    bus.on("debug:start", move |_| reemit.emit("debug:stop", json!("nested")));

    bus.emit("debug:start", Value::Null);
    assert_eq!(*log.lock().unwrap(), vec![r#"inner:"nested""#.to_string()]);
}

#[test]
fn test_callback_added_during_emit_waits_for_next_emit() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let late = Arc::new(make("late"));

    let registrar = bus.clone();
    bus.on("tab:change", move |_| {
        let late = Arc::clone(&late);
        registrar.on("tab:change", move |p| late(p));
    });

    bus.emit("tab:change", json!(1));
    assert!(log.lock().unwrap().is_empty());

    bus.emit("tab:change", json!(2));
    assert_eq!(*log.lock().unwrap(), vec!["late:2".to_string()]);
}

#[test]
fn test_clear_single_topic_and_all() {
    let bus = EventBus::new();
    bus.on("theme:change", |_| {});
    bus.on("font:change", |_| {});

    bus.clear(Some("theme:change"));
    assert_eq!(bus.subscriber_count("theme:change"), 0);
    assert_eq!(bus.subscriber_count("font:change"), 1);

    bus.clear(None);
    assert_eq!(bus.subscriber_count("font:change"), 0);
}
