use super::declarative::{BuiltinModule, CommandSpec};
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;

pub fn module() -> BuiltinModule {
    BuiltinModule::new(
        ModuleInfo::new("git-diff", "Git Diff", "1.0.0")
            .with_description("View and revert git changes"),
    )
    .with_sidebar(
        SidebarContribution::new("git-diff", "git-branch", "Source Control", "GitDiffPanel")
            .with_order(1),
    )
    .with_command(
        CommandSpec::new("git.refresh", "Refresh Git Status", "git:refresh")
            .with_keybinding("Cmd+Shift+G"),
    )
    .with_command(CommandSpec::new(
        "git.revertAll",
        "Discard All Changes",
        "git:revert-all",
    ))
}
