use super::declarative::{BuiltinModule, CommandSpec};
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;

pub fn module() -> BuiltinModule {
    BuiltinModule::new(
        ModuleInfo::new("file-explorer", "File Explorer", "1.0.0")
            .with_description("Browse and manage project files"),
    )
    .with_sidebar(
        SidebarContribution::new("file-explorer", "files", "Explorer", "FileExplorerPanel")
            .with_order(0),
    )
    .with_command(
        CommandSpec::new(
            "file-explorer.refresh",
            "Refresh File Explorer",
            "file-explorer:refresh",
        )
        .with_keybinding("Cmd+Shift+E"),
    )
    .with_command(CommandSpec::new(
        "file-explorer.newFile",
        "New File",
        "file-explorer:new-file",
    ))
    .with_command(CommandSpec::new(
        "file-explorer.newFolder",
        "New Folder",
        "file-explorer:new-folder",
    ))
}
