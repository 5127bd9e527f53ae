use super::declarative::{BuiltinModule, CommandSpec};
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;
use serde_json::json;

pub fn module() -> BuiltinModule {
    BuiltinModule::new(
        ModuleInfo::new("terminal", "Terminal", "1.0.0").with_description("Integrated terminal"),
    )
    .with_sidebar(
        SidebarContribution::new("terminal", "terminal", "Terminal", "TerminalPanel")
            .with_order(40),
    )
    .with_command(
        CommandSpec::new("terminal.new", "New Terminal", "terminal:new")
            .with_payload(json!({}))
            .with_keybinding("Cmd+`"),
    )
    .with_command(
        CommandSpec::new("terminal.clear", "Clear Terminal", "terminal:clear")
            .with_payload(json!({}))
            .with_keybinding("Cmd+K"),
    )
}
