//! Public API for the module host
//!
//! Embedders construct a [`ModuleLoader`] from a [`ModuleApiFactory`] and
//! register [`Module`] implementations with it. Module authors only need
//! [`Module`], [`ModuleInfo`], [`ModuleApi`] and [`ModuleResult`].

pub use crate::module::builtin::{builtin_modules, BuiltinModule, CommandSpec};
pub use crate::module::error::{ModuleError, ModuleResult};
pub use crate::module::loader::ModuleLoader;
pub use crate::module::scoped_api::{
    CommandsApi, EditorApi, EventsApi, KeybindingsApi, ModuleApi, ModuleApiFactory, UiApi,
};
pub use crate::module::storage::{
    storage_prefix, JsonFileStorage, MemoryStorage, ScopedStorage, StorageBackend, StorageError,
    StorageResult,
};
pub use crate::module::traits::Module;
pub use crate::module::types::{ModuleInfo, ModuleState};
