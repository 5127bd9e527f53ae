//! Contribution Registry
//!
//! Holds the sidebar, panel and status-bar tables, commands, keybindings,
//! language associations and the current-file slot. Every mutation of a UI
//! table re-publishes the full sorted table on the bus so the shell can
//! re-render instead of polling.

use crate::core::isolation::run_isolated;
use crate::events::api::{EventBus, Topic};
use crate::registry::table::ContributionTable;
use crate::registry::types::{
    Command, FileInfo, LanguageAssociation, PanelContribution, SidebarContribution,
    StatusBarContribution,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct RegistryState {
    sidebars: ContributionTable<SidebarContribution>,
    panels: ContributionTable<PanelContribution>,
    status_items: ContributionTable<StatusBarContribution>,
    commands: ContributionTable<Command>,
    keybindings: HashMap<String, String>,
    languages: ContributionTable<LanguageAssociation>,
    current_file: Option<FileInfo>,
}

/// Registry of everything modules contribute to the shell
pub struct ContributionRegistry {
    bus: EventBus,
    state: Mutex<RegistryState>,
}

impl std::fmt::Debug for ContributionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ContributionRegistry")
            .field("sidebars", &state.sidebars.len())
            .field("panels", &state.panels.len())
            .field("status_items", &state.status_items.len())
            .field("commands", &state.commands.len())
            .field("keybindings", &state.keybindings.len())
            .field("languages", &state.languages.len())
            .finish()
    }
}

impl ContributionRegistry {
    /// Create an empty registry that publishes table changes on `bus`
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            state: Mutex::new(RegistryState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        // Handlers never run under this lock, so poisoning cannot leave a half-written table
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish<T: Serialize>(&self, topic: Topic, table: &[T]) {
        match serde_json::to_value(table) {
            Ok(payload) => self.bus.emit(topic, payload),
            Err(e) => log::error!("Failed to serialize {} payload: {}", topic, e),
        }
    }

    // Sidebar

    pub fn register_sidebar(&self, sidebar: SidebarContribution) {
        let snapshot = {
            let mut state = self.state();
            if state.sidebars.upsert(sidebar).is_some() {
                log::debug!("Sidebar entry replaced by re-registration");
            }
            state.sidebars.sorted()
        };
        self.publish(Topic::SidebarsChanged, &snapshot);
    }

    pub fn unregister_sidebar(&self, id: &str) {
        let snapshot = {
            let mut state = self.state();
            state.sidebars.remove(id);
            state.sidebars.sorted()
        };
        self.publish(Topic::SidebarsChanged, &snapshot);
    }

    pub fn get_sidebars(&self) -> Vec<SidebarContribution> {
        self.state().sidebars.sorted()
    }

    // Panels

    pub fn register_panel(&self, panel: PanelContribution) {
        let snapshot = {
            let mut state = self.state();
            state.panels.upsert(panel);
            state.panels.sorted()
        };
        self.publish(Topic::PanelsChanged, &snapshot);
    }

    pub fn unregister_panel(&self, id: &str) {
        let snapshot = {
            let mut state = self.state();
            state.panels.remove(id);
            state.panels.sorted()
        };
        self.publish(Topic::PanelsChanged, &snapshot);
    }

    pub fn get_panels(&self) -> Vec<PanelContribution> {
        self.state().panels.sorted()
    }

    // Status bar

    pub fn register_status_bar(&self, item: StatusBarContribution) {
        let snapshot = {
            let mut state = self.state();
            state.status_items.upsert(item);
            state.status_items.sorted()
        };
        self.publish(Topic::StatusBarChanged, &snapshot);
    }

    pub fn unregister_status_bar(&self, id: &str) {
        let snapshot = {
            let mut state = self.state();
            state.status_items.remove(id);
            state.status_items.sorted()
        };
        self.publish(Topic::StatusBarChanged, &snapshot);
    }

    pub fn get_status_bar_items(&self) -> Vec<StatusBarContribution> {
        self.state().status_items.sorted()
    }

    // Commands

    /// Insert or replace a command, binding its key chord if it has one
    ///
    /// Last registration wins for both the command id and the key chord.
    pub fn register_command(&self, command: Command) {
        let mut state = self.state();
        if let Some(key) = &command.keybinding {
            state.keybindings.insert(key.clone(), command.id.clone());
        }
        if state.commands.upsert(command).is_some() {
            log::debug!("Command replaced by re-registration");
        }
    }

    /// Remove a command together with the chord it declared
    ///
    /// The chord is removed even if it has since been rebound to another
    /// command.
    pub fn unregister_command(&self, id: &str) {
        let mut state = self.state();
        if let Some(command) = state.commands.remove(id) {
            if let Some(key) = command.keybinding {
                state.keybindings.remove(&key);
            }
        }
    }

    /// Run the handler of command `id`
    ///
    /// Returns `false` without doing anything when the id is unknown. A
    /// panicking handler is logged and reported as executed.
    pub fn execute_command(&self, id: &str) -> bool {
        let handler = match self.state().commands.get(id) {
            Some(command) => std::sync::Arc::clone(&command.handler),
            None => {
                log::debug!("Ignoring unknown command \"{}\"", id);
                return false;
            }
        };

        if let Err(message) = run_isolated(|| handler()) {
            log::error!("Command \"{}\" failed: {}", id, message);
        }
        true
    }

    /// All commands in registration order
    pub fn get_commands(&self) -> Vec<Command> {
        self.state().commands.iter().cloned().collect()
    }

    pub fn has_command(&self, id: &str) -> bool {
        self.state().commands.get(id).is_some()
    }

    // Keybindings

    pub fn register_keybinding(&self, key: impl Into<String>, command_id: impl Into<String>) {
        self.state().keybindings.insert(key.into(), command_id.into());
    }

    pub fn unregister_keybinding(&self, key: &str) {
        self.state().keybindings.remove(key);
    }

    pub fn get_command_for_keybinding(&self, key: &str) -> Option<String> {
        self.state().keybindings.get(key).cloned()
    }

    /// All chord bindings sorted by chord
    pub fn get_keybindings(&self) -> Vec<(String, String)> {
        let mut bindings: Vec<(String, String)> = self
            .state()
            .keybindings
            .iter()
            .map(|(key, command)| (key.clone(), command.clone()))
            .collect();
        bindings.sort();
        bindings
    }

    // Languages

    pub fn register_language(&self, language: LanguageAssociation) {
        self.state().languages.upsert(language);
    }

    /// First registered language that claims `extension`
    pub fn get_language_for_extension(&self, extension: &str) -> Option<LanguageAssociation> {
        self.state()
            .languages
            .iter()
            .find(|language| language.extensions.iter().any(|ext| ext == extension))
            .cloned()
    }

    pub fn get_languages(&self) -> Vec<LanguageAssociation> {
        self.state().languages.iter().cloned().collect()
    }

    // Current file

    pub fn set_current_file(&self, file: Option<FileInfo>) {
        self.state().current_file = file;
    }

    pub fn get_current_file(&self) -> Option<FileInfo> {
        self.state().current_file.clone()
    }
}
