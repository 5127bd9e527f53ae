//! Public API for the host command boundary

pub use crate::host::error::{HostError, HostResult};
pub use crate::host::interface::{commands, DisconnectedHost, HostCommandInterface};
pub use crate::host::proxies::{DebugProxy, FsProxy, GitProxy};
pub use crate::host::types::{
    Breakpoint, DebugConfig, DebugRuntime, DiffLineKind, DirEntry, GitDiff, GitDiffLine,
    GitFileState, GitFileStatus, GitHunk, GitStatus,
};
