//! Scoped Module API
//!
//! Each module receives one [`ModuleApi`], built once at registration by the
//! [`ModuleApiFactory`]. The UI, command, keybinding and editor groups
//! delegate to the shared registry; `events` passes straight through to the
//! shared bus; `fs`, `git` and `debug` forward to the host; `storage` is
//! namespaced by the module id.

use crate::events::api::{EventBus, Subscription, Topic};
use crate::host::api::{DebugProxy, FsProxy, GitProxy, HostCommandInterface};
use crate::module::storage::{ScopedStorage, StorageBackend};
use crate::registry::api::{
    Command, ContributionRegistry, FileInfo, LanguageAssociation, PanelContribution,
    SidebarContribution, StatusBarContribution,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Builds scoped APIs over one set of shared services
#[derive(Clone)]
pub struct ModuleApiFactory {
    bus: EventBus,
    registry: Arc<ContributionRegistry>,
    host: Arc<dyn HostCommandInterface>,
    storage: Arc<dyn StorageBackend>,
    namespace: String,
}

impl std::fmt::Debug for ModuleApiFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleApiFactory")
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl ModuleApiFactory {
    pub fn new(
        bus: EventBus,
        registry: Arc<ContributionRegistry>,
        host: Arc<dyn HostCommandInterface>,
        storage: Arc<dyn StorageBackend>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            registry,
            host,
            storage,
            namespace: namespace.into(),
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn registry(&self) -> &Arc<ContributionRegistry> {
        &self.registry
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Build the API for `module_id`
    pub fn create(&self, module_id: &str) -> ModuleApi {
        ModuleApi {
            inner: Arc::new(ApiInner {
                module_id: module_id.to_string(),
                bus: self.bus.clone(),
                registry: Arc::clone(&self.registry),
                host: Arc::clone(&self.host),
                storage: ScopedStorage::new(Arc::clone(&self.storage), &self.namespace, module_id),
            }),
        }
    }
}

struct ApiInner {
    module_id: String,
    bus: EventBus,
    registry: Arc<ContributionRegistry>,
    host: Arc<dyn HostCommandInterface>,
    storage: ScopedStorage,
}

/// Capability-scoped facade handed to one module
///
/// Clones share the same instance; [`ModuleApi::ptr_eq`] tells instances
/// apart.
#[derive(Clone)]
pub struct ModuleApi {
    inner: Arc<ApiInner>,
}

impl std::fmt::Debug for ModuleApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleApi")
            .field("module_id", &self.inner.module_id)
            .field("storage", &self.inner.storage)
            .finish()
    }
}

impl ModuleApi {
    /// Id of the module this API is bound to
    pub fn module_id(&self) -> &str {
        &self.inner.module_id
    }

    /// True if both handles refer to the same API instance
    pub fn ptr_eq(a: &ModuleApi, b: &ModuleApi) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn ui(&self) -> UiApi {
        UiApi {
            registry: Arc::clone(&self.inner.registry),
        }
    }

    pub fn commands(&self) -> CommandsApi {
        CommandsApi {
            registry: Arc::clone(&self.inner.registry),
        }
    }

    pub fn keybindings(&self) -> KeybindingsApi {
        KeybindingsApi {
            registry: Arc::clone(&self.inner.registry),
        }
    }

    pub fn editor(&self) -> EditorApi {
        EditorApi {
            registry: Arc::clone(&self.inner.registry),
            bus: self.inner.bus.clone(),
        }
    }

    pub fn events(&self) -> EventsApi {
        EventsApi {
            bus: self.inner.bus.clone(),
        }
    }

    pub fn fs(&self) -> FsProxy {
        FsProxy::new(Arc::clone(&self.inner.host))
    }

    pub fn git(&self) -> GitProxy {
        GitProxy::new(Arc::clone(&self.inner.host))
    }

    pub fn debug(&self) -> DebugProxy {
        DebugProxy::new(Arc::clone(&self.inner.host))
    }

    pub fn storage(&self) -> &ScopedStorage {
        &self.inner.storage
    }
}

/// UI contribution points
#[derive(Clone)]
pub struct UiApi {
    registry: Arc<ContributionRegistry>,
}

impl UiApi {
    pub fn register_sidebar(&self, sidebar: SidebarContribution) {
        self.registry.register_sidebar(sidebar);
    }

    pub fn unregister_sidebar(&self, id: &str) {
        self.registry.unregister_sidebar(id);
    }

    pub fn register_panel(&self, panel: PanelContribution) {
        self.registry.register_panel(panel);
    }

    pub fn unregister_panel(&self, id: &str) {
        self.registry.unregister_panel(id);
    }

    pub fn register_status_bar(&self, item: StatusBarContribution) {
        self.registry.register_status_bar(item);
    }

    pub fn unregister_status_bar(&self, id: &str) {
        self.registry.unregister_status_bar(id);
    }
}

#[derive(Clone)]
pub struct CommandsApi {
    registry: Arc<ContributionRegistry>,
}

impl CommandsApi {
    pub fn register(&self, command: Command) {
        self.registry.register_command(command);
    }

    pub fn unregister(&self, id: &str) {
        self.registry.unregister_command(id);
    }

    /// Returns `false` if no command is registered under `id`
    pub fn execute(&self, id: &str) -> bool {
        self.registry.execute_command(id)
    }

    pub fn get_all(&self) -> Vec<Command> {
        self.registry.get_commands()
    }
}

#[derive(Clone)]
pub struct KeybindingsApi {
    registry: Arc<ContributionRegistry>,
}

impl KeybindingsApi {
    pub fn register(&self, key: impl Into<String>, command_id: impl Into<String>) {
        self.registry.register_keybinding(key, command_id);
    }

    pub fn unregister(&self, key: &str) {
        self.registry.unregister_keybinding(key);
    }

    pub fn get_command(&self, key: &str) -> Option<String> {
        self.registry.get_command_for_keybinding(key)
    }
}

/// Editor hooks, languages and the current-file slot
#[derive(Clone)]
pub struct EditorApi {
    registry: Arc<ContributionRegistry>,
    bus: EventBus,
}

impl EditorApi {
    pub fn on_open<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.on(Topic::FileOpen, callback)
    }

    pub fn on_save<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.on(Topic::FileSave, callback)
    }

    pub fn on_close<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.on(Topic::FileClose, callback)
    }

    pub fn register_language(&self, language: LanguageAssociation) {
        self.registry.register_language(language);
    }

    pub fn get_current_file(&self) -> Option<FileInfo> {
        self.registry.get_current_file()
    }

    pub fn set_current_file(&self, file: Option<FileInfo>) {
        self.registry.set_current_file(file);
    }

    /// Ask the shell to open `path`
    pub fn open_file(&self, path: &str) {
        self.bus.emit(Topic::FileOpen, json!({ "path": path }));
    }

    /// Ask the shell to save `content` to `path`
    pub fn save_file(&self, path: &str, content: &str) {
        self.bus
            .emit(Topic::FileSave, json!({ "path": path, "content": content }));
    }
}

/// Direct access to the shared bus
///
/// Topic names are the only isolation between modules here.
#[derive(Clone)]
pub struct EventsApi {
    bus: EventBus,
}

impl EventsApi {
    pub fn emit(&self, topic: impl AsRef<str>, payload: Value) {
        self.bus.emit(topic, payload);
    }

    pub fn on<F>(&self, topic: impl AsRef<str>, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.on(topic, callback)
    }

    pub fn once<F>(&self, topic: impl AsRef<str>, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.once(topic, callback)
    }
}
