use super::declarative::{BuiltinModule, CommandSpec};
use crate::events::api::Topic;
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;
use serde_json::json;

pub fn module() -> BuiltinModule {
    BuiltinModule::new(
        ModuleInfo::new("settings", "Settings", "1.0.0")
            .with_description("Theme and font settings"),
    )
    .with_sidebar(
        SidebarContribution::new("settings", "settings", "Settings", "SettingsPanel")
            .with_order(99),
    )
    .with_command(
        CommandSpec::new("settings.open", "Open Settings", Topic::SidebarChange.name())
            .with_payload(json!({ "id": "settings" }))
            .with_keybinding("Cmd+,"),
    )
}
