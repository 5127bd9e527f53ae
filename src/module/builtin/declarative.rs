//! Modules described as data
//!
//! A [`BuiltinModule`] lists the contributions it makes and the commands it
//! offers. Activation registers all of them; deactivation removes them again.

use crate::module::error::ModuleResult;
use crate::module::scoped_api::ModuleApi;
use crate::module::traits::Module;
use crate::module::types::ModuleInfo;
use crate::registry::api::{
    Command, LanguageAssociation, SidebarContribution, StatusBarContribution,
};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A command that emits `topic` with `payload` when executed
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub payload: Value,
    pub keybinding: Option<String>,
}

impl CommandSpec {
    pub fn new(id: &str, title: &str, topic: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            topic: topic.to_string(),
            payload: Value::Null,
            keybinding: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_keybinding(mut self, key: &str) -> Self {
        self.keybinding = Some(key.to_string());
        self
    }

    fn to_command(&self, api: &ModuleApi) -> Command {
        let events = api.events();
        let topic = self.topic.clone();
        let payload = self.payload.clone();
        let command = Command::new(self.id.clone(), self.title.clone(), move || {
            events.emit(&topic, payload.clone())
        });
        match &self.keybinding {
            Some(key) => command.with_keybinding(key.clone()),
            None => command,
        }
    }
}

pub struct BuiltinModule {
    info: ModuleInfo,
    sidebar: Option<SidebarContribution>,
    status_items: Vec<StatusBarContribution>,
    languages: Vec<LanguageAssociation>,
    commands: Vec<CommandSpec>,
    api: Mutex<Option<ModuleApi>>,
}

impl std::fmt::Debug for BuiltinModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinModule")
            .field("id", &self.info.id)
            .field("commands", &self.commands.len())
            .finish()
    }
}

impl BuiltinModule {
    pub fn new(info: ModuleInfo) -> Self {
        Self {
            info,
            sidebar: None,
            status_items: Vec::new(),
            languages: Vec::new(),
            commands: Vec::new(),
            api: Mutex::new(None),
        }
    }

    pub fn with_sidebar(mut self, sidebar: SidebarContribution) -> Self {
        self.sidebar = Some(sidebar);
        self
    }

    pub fn with_status_item(mut self, item: StatusBarContribution) -> Self {
        self.status_items.push(item);
        self
    }

    pub fn with_language(mut self, language: LanguageAssociation) -> Self {
        self.languages.push(language);
        self
    }

    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    fn api(&self) -> MutexGuard<'_, Option<ModuleApi>> {
        self.api.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Module for BuiltinModule {
    fn module_info(&self) -> ModuleInfo {
        self.info.clone()
    }

    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()> {
        let ui = api.ui();
        if let Some(sidebar) = &self.sidebar {
            ui.register_sidebar(sidebar.clone());
        }
        for item in &self.status_items {
            ui.register_status_bar(item.clone());
        }

        let editor = api.editor();
        for language in &self.languages {
            editor.register_language(language.clone());
        }

        let commands = api.commands();
        for spec in &self.commands {
            commands.register(spec.to_command(api));
        }

        *self.api() = Some(api.clone());
        Ok(())
    }

    /// Removes sidebar, status items and commands; language associations
    /// have no removal operation and stay registered.
    async fn deactivate(&self) -> ModuleResult<()> {
        let api = match self.api().take() {
            Some(api) => api,
            None => return Ok(()),
        };

        let ui = api.ui();
        if let Some(sidebar) = &self.sidebar {
            ui.unregister_sidebar(&sidebar.id);
        }
        for item in &self.status_items {
            ui.unregister_status_bar(&item.id);
        }

        let commands = api.commands();
        for spec in &self.commands {
            commands.unregister(&spec.id);
        }
        Ok(())
    }
}
