//! Typed pass-through proxies over the host command interface
//!
//! Each method builds the argument record, forwards it unchanged and decodes
//! the response. There is no logic here beyond naming.

use crate::host::error::{HostError, HostResult};
use crate::host::interface::{commands, HostCommandInterface};
use crate::host::types::{Breakpoint, DebugConfig, DirEntry, GitDiff, GitStatus};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

async fn call<T: DeserializeOwned>(
    host: &dyn HostCommandInterface,
    command: &str,
    args: Value,
) -> HostResult<T> {
    let response = host.invoke(command, args).await?;
    serde_json::from_value(response).map_err(|source| HostError::Decode {
        command: command.to_string(),
        source,
    })
}

async fn call_unit(host: &dyn HostCommandInterface, command: &str, args: Value) -> HostResult<()> {
    host.invoke(command, args).await.map(|_| ())
}

/// Filesystem commands
#[derive(Clone)]
pub struct FsProxy {
    host: Arc<dyn HostCommandInterface>,
}

impl FsProxy {
    pub fn new(host: Arc<dyn HostCommandInterface>) -> Self {
        Self { host }
    }

    pub async fn read_file(&self, path: &str) -> HostResult<String> {
        call(&*self.host, commands::READ_FILE, json!({ "path": path })).await
    }

    pub async fn write_file(&self, path: &str, content: &str) -> HostResult<()> {
        call_unit(
            &*self.host,
            commands::WRITE_FILE,
            json!({ "path": path, "content": content }),
        )
        .await
    }

    pub async fn read_dir(&self, path: &str) -> HostResult<Vec<DirEntry>> {
        call(&*self.host, commands::READ_DIR, json!({ "path": path })).await
    }

    pub async fn exists(&self, path: &str) -> HostResult<bool> {
        call(&*self.host, commands::FILE_EXISTS, json!({ "path": path })).await
    }

    pub async fn mkdir(&self, path: &str) -> HostResult<()> {
        call_unit(&*self.host, commands::CREATE_DIR, json!({ "path": path })).await
    }

    pub async fn remove(&self, path: &str) -> HostResult<()> {
        call_unit(&*self.host, commands::REMOVE_PATH, json!({ "path": path })).await
    }

    pub async fn rename(&self, old_path: &str, new_path: &str) -> HostResult<()> {
        call_unit(
            &*self.host,
            commands::RENAME_PATH,
            json!({ "oldPath": old_path, "newPath": new_path }),
        )
        .await
    }
}

/// Version-control commands
#[derive(Clone)]
pub struct GitProxy {
    host: Arc<dyn HostCommandInterface>,
}

impl GitProxy {
    pub fn new(host: Arc<dyn HostCommandInterface>) -> Self {
        Self { host }
    }

    pub async fn status(&self, repo_path: &str) -> HostResult<GitStatus> {
        call(&*self.host, commands::GIT_STATUS, json!({ "repoPath": repo_path })).await
    }

    pub async fn diff(&self, repo_path: &str, file_path: &str) -> HostResult<GitDiff> {
        call(
            &*self.host,
            commands::GIT_DIFF,
            json!({ "repoPath": repo_path, "filePath": file_path }),
        )
        .await
    }

    pub async fn revert_file(&self, repo_path: &str, file_path: &str) -> HostResult<()> {
        self.file_command(commands::GIT_REVERT_FILE, repo_path, file_path)
            .await
    }

    pub async fn stage_file(&self, repo_path: &str, file_path: &str) -> HostResult<()> {
        self.file_command(commands::GIT_STAGE_FILE, repo_path, file_path)
            .await
    }

    pub async fn unstage_file(&self, repo_path: &str, file_path: &str) -> HostResult<()> {
        self.file_command(commands::GIT_UNSTAGE_FILE, repo_path, file_path)
            .await
    }

    async fn file_command(
        &self,
        command: &str,
        repo_path: &str,
        file_path: &str,
    ) -> HostResult<()> {
        call_unit(
            &*self.host,
            command,
            json!({ "repoPath": repo_path, "filePath": file_path }),
        )
        .await
    }
}

/// Debug adapter commands
#[derive(Clone)]
pub struct DebugProxy {
    host: Arc<dyn HostCommandInterface>,
}

impl DebugProxy {
    pub fn new(host: Arc<dyn HostCommandInterface>) -> Self {
        Self { host }
    }

    pub async fn start(&self, config: &DebugConfig) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_START, json!({ "config": config })).await
    }

    pub async fn stop(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_STOP, json!({})).await
    }

    pub async fn pause(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_PAUSE, json!({})).await
    }

    pub async fn resume(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_CONTINUE, json!({})).await
    }

    pub async fn step_over(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_STEP_OVER, json!({})).await
    }

    pub async fn step_into(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_STEP_INTO, json!({})).await
    }

    pub async fn step_out(&self) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_STEP_OUT, json!({})).await
    }

    pub async fn set_breakpoint(&self, path: &str, line: u32) -> HostResult<Breakpoint> {
        call(
            &*self.host,
            commands::DEBUG_SET_BREAKPOINT,
            json!({ "path": path, "line": line }),
        )
        .await
    }

    pub async fn remove_breakpoint(&self, id: &str) -> HostResult<()> {
        call_unit(&*self.host, commands::DEBUG_REMOVE_BREAKPOINT, json!({ "id": id })).await
    }
}
