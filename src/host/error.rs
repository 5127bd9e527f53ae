//! Host Error Types

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("No host backend attached (command: {command})")]
    Unavailable { command: String },

    #[error("Host command '{command}' failed: {message}")]
    Failed { command: String, message: String },

    #[error("Unexpected response to host command '{command}': {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HostError {
    /// Name of the command that produced the error
    pub fn command(&self) -> &str {
        match self {
            HostError::Unavailable { command }
            | HostError::Failed { command, .. }
            | HostError::Decode { command, .. } => command,
        }
    }
}

/// Result type for host commands
pub type HostResult<T> = Result<T, HostError>;
