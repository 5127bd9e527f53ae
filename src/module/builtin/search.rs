use super::declarative::{BuiltinModule, CommandSpec};
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;
use serde_json::json;

pub fn module() -> BuiltinModule {
    BuiltinModule::new(
        ModuleInfo::new("search", "Search", "1.0.0")
            .with_description("Search files and content"),
    )
    .with_sidebar(
        SidebarContribution::new("search", "search", "Search", "SearchPanel").with_order(15),
    )
    .with_command(
        CommandSpec::new("search.focus", "Focus Search", "search:focus")
            .with_payload(json!({}))
            .with_keybinding("Cmd+Shift+F"),
    )
}
