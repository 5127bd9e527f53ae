//! One-shot subscriptions

use crate::events::api::{EventBus, Topic};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_once_fires_exactly_once() {
    let bus = EventBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    bus.once(Topic::ModuleActivated, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    for _ in 0..5 {
        bus.emit(Topic::ModuleActivated, json!({"moduleId": "search"}));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(bus.subscriber_count(Topic::ModuleActivated), 0);
}

#[test]
fn test_once_receives_payload() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&seen);
    bus.once("file:rename", move |payload| {
        *slot.lock().unwrap() = Some(payload.clone());
    });

    bus.emit("file:rename", json!({"oldPath": "a", "newPath": "b"}));
    assert_eq!(
        *seen.lock().unwrap(),
        Some(json!({"oldPath": "a", "newPath": "b"}))
    );
}

#[test]
fn test_once_can_be_cancelled_before_firing() {
    let bus = EventBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let subscription = bus.once("tab:dirty", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    subscription.unsubscribe();
    bus.emit("tab:dirty", Value::Null);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_once_reentrant_emit_does_not_refire() {
    let bus = EventBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let reemit = bus.clone();
    bus.once("sidebar:toggle", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        reemit.emit("sidebar:toggle", Value::Null);
    });

    bus.emit("sidebar:toggle", Value::Null);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_panicking_once_is_still_removed() {
    let bus = EventBus::new();
    bus.once("font:change", |_| panic!("font handler crashed"));
    bus.emit("font:change", Value::Null);
    assert_eq!(bus.subscriber_count("font:change"), 0);
}
