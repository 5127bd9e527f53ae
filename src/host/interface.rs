//! Request/response interface to the native host

use crate::host::error::{HostError, HostResult};
use async_trait::async_trait;
use serde_json::Value;

/// Command names understood by the native host
pub mod commands {
    pub const READ_FILE: &str = "read_file";
    pub const WRITE_FILE: &str = "write_file";
    pub const READ_DIR: &str = "read_dir";
    pub const FILE_EXISTS: &str = "file_exists";
    pub const CREATE_DIR: &str = "create_dir";
    pub const REMOVE_PATH: &str = "remove_path";
    pub const RENAME_PATH: &str = "rename_path";

    pub const GIT_STATUS: &str = "git_status";
    pub const GIT_DIFF: &str = "git_diff";
    pub const GIT_REVERT_FILE: &str = "git_revert_file";
    pub const GIT_STAGE_FILE: &str = "git_stage_file";
    pub const GIT_UNSTAGE_FILE: &str = "git_unstage_file";

    pub const DEBUG_START: &str = "debug_start";
    pub const DEBUG_STOP: &str = "debug_stop";
    pub const DEBUG_PAUSE: &str = "debug_pause";
    pub const DEBUG_CONTINUE: &str = "debug_continue";
    pub const DEBUG_STEP_OVER: &str = "debug_step_over";
    pub const DEBUG_STEP_INTO: &str = "debug_step_into";
    pub const DEBUG_STEP_OUT: &str = "debug_step_out";
    pub const DEBUG_SET_BREAKPOINT: &str = "debug_set_breakpoint";
    pub const DEBUG_REMOVE_BREAKPOINT: &str = "debug_remove_breakpoint";
}

/// Issues a named command with structured arguments and awaits the result
///
/// The wire format is the implementor's business. Implementations must be
/// shareable across every module's scoped API.
#[async_trait]
pub trait HostCommandInterface: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> HostResult<Value>;
}

/// Host used when no native backend is attached; every command fails
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedHost;

#[async_trait]
impl HostCommandInterface for DisconnectedHost {
    async fn invoke(&self, command: &str, _args: Value) -> HostResult<Value> {
        log::debug!("Host command '{}' issued with no backend attached", command);
        Err(HostError::Unavailable {
            command: command.to_string(),
        })
    }
}
