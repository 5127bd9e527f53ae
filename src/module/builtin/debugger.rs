use super::declarative::{BuiltinModule, CommandSpec};
use crate::module::types::ModuleInfo;
use crate::registry::api::SidebarContribution;

const COMMANDS: [(&str, &str, &str, &str); 7] = [
    ("debug.start", "Start Debugging", "debug:start-request", "F5"),
    ("debug.stop", "Stop Debugging", "debug:stop-request", "Shift+F5"),
    ("debug.stepOver", "Step Over", "debug:step-over", "F10"),
    ("debug.stepInto", "Step Into", "debug:step-into", "F11"),
    ("debug.stepOut", "Step Out", "debug:step-out", "Shift+F11"),
    ("debug.continue", "Continue", "debug:continue", "F8"),
    (
        "debug.toggleBreakpoint",
        "Toggle Breakpoint",
        "debug:toggle-breakpoint",
        "F9",
    ),
];

pub fn module() -> BuiltinModule {
    let module = BuiltinModule::new(
        ModuleInfo::new("debugger", "Debugger", "1.0.0")
            .with_description("Debug JavaScript, TypeScript, Python, and Go"),
    )
    .with_sidebar(
        SidebarContribution::new("debugger", "bug", "Debug", "DebuggerPanel").with_order(2),
    );

    COMMANDS
        .iter()
        .fold(module, |module, (id, title, topic, key)| {
            module.with_command(CommandSpec::new(id, title, topic).with_keybinding(key))
        })
}
