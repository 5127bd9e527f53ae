//! Builtin feature modules
//!
//! The editor's own features, registered through the same loader and scoped
//! API as any third-party module.

mod debugger;
mod declarative;
mod editor;
mod file_explorer;
mod git_diff;
mod search;
mod settings;
mod terminal;

pub use declarative::{BuiltinModule, CommandSpec};

use crate::module::traits::Module;
use std::sync::Arc;

/// Every builtin module, in the order the shell registers them
pub fn builtin_modules() -> Vec<Arc<dyn Module>> {
    vec![
        Arc::new(editor::module()),
        Arc::new(file_explorer::module()),
        Arc::new(git_diff::module()),
        Arc::new(debugger::module()),
        Arc::new(search::module()),
        Arc::new(terminal::module()),
        Arc::new(settings::module()),
    ]
}
