//! Test host that records every command it receives

use crate::host::api::{HostCommandInterface, HostError, HostResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<(String, Value)>>,
    responses: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, String>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &str, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), response);
    }

    pub fn fail(&self, command: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(command.to_string(), message.to_string());
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<(String, Value)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HostCommandInterface for RecordingHost {
    async fn invoke(&self, command: &str, args: Value) -> HostResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args));

        if let Some(message) = self.failures.lock().unwrap().get(command) {
            return Err(HostError::Failed {
                command: command.to_string(),
                message: message.clone(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
