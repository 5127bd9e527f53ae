//! Well-known event topics
//!
//! These strings are the implicit contract between modules that never import
//! one another. Adding a topic is backward compatible; renaming one is not.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Topic {
    // File events
    #[strum(serialize = "file:open")]
    FileOpen,
    #[strum(serialize = "file:save")]
    FileSave,
    #[strum(serialize = "file:close")]
    FileClose,
    #[strum(serialize = "file:change")]
    FileChange,
    #[strum(serialize = "file:create")]
    FileCreate,
    #[strum(serialize = "file:delete")]
    FileDelete,
    #[strum(serialize = "file:rename")]
    FileRename,

    // Editor events
    #[strum(serialize = "editor:focus")]
    EditorFocus,
    #[strum(serialize = "editor:blur")]
    EditorBlur,
    #[strum(serialize = "editor:cursor-change")]
    EditorCursorChange,
    #[strum(serialize = "editor:selection-change")]
    EditorSelectionChange,

    // Tab events
    #[strum(serialize = "tab:open")]
    TabOpen,
    #[strum(serialize = "tab:close")]
    TabClose,
    #[strum(serialize = "tab:change")]
    TabChange,
    #[strum(serialize = "tab:dirty")]
    TabDirty,

    // Sidebar events
    #[strum(serialize = "sidebar:toggle")]
    SidebarToggle,
    #[strum(serialize = "sidebar:change")]
    SidebarChange,

    // Version control events
    #[strum(serialize = "git:status-change")]
    GitStatusChange,
    #[strum(serialize = "git:branch-change")]
    GitBranchChange,
    #[strum(serialize = "git:revert")]
    GitRevert,

    // Debug events
    #[strum(serialize = "debug:start")]
    DebugStart,
    #[strum(serialize = "debug:stop")]
    DebugStop,
    #[strum(serialize = "debug:breakpoint-add")]
    DebugBreakpointAdd,
    #[strum(serialize = "debug:breakpoint-remove")]
    DebugBreakpointRemove,
    #[strum(serialize = "debug:step")]
    DebugStep,
    #[strum(serialize = "debug:pause")]
    DebugPause,
    #[strum(serialize = "debug:continue")]
    DebugContinue,

    // Appearance events
    #[strum(serialize = "theme:change")]
    ThemeChange,
    #[strum(serialize = "font:change")]
    FontChange,

    // Module lifecycle; wire names predate the module rename
    #[strum(serialize = "plugin:activate")]
    ModuleActivated,
    #[strum(serialize = "plugin:deactivate")]
    ModuleDeactivated,

    // Diff view events
    #[strum(serialize = "diff:tab-open")]
    DiffTabOpen,
    #[strum(serialize = "diff:tab-close")]
    DiffTabClose,
    #[strum(serialize = "diff:tab-update")]
    DiffTabUpdate,
    #[strum(serialize = "diff:navigate-next")]
    DiffNavigateNext,
    #[strum(serialize = "diff:navigate-prev")]
    DiffNavigatePrev,

    // Contribution table changes, payload is the full sorted table
    #[strum(serialize = "registry:sidebar-change")]
    SidebarsChanged,
    #[strum(serialize = "registry:panel-change")]
    PanelsChanged,
    #[strum(serialize = "registry:statusbar-change")]
    StatusBarChanged,
}

impl Topic {
    /// Wire name of the topic
    pub fn name(self) -> &'static str {
        self.into()
    }
}
