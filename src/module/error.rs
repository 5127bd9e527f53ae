//! Module Error Handling
//!
//! Errors raised by module lifecycle operations and returned by module hooks.
//! The loader never propagates them past its own boundary; it logs them at
//! the level their kind calls for.

use crate::core::error_handling::ContextualError;
use crate::host::api::HostError;
use crate::module::storage::StorageError;
use crate::module::types::ModuleState;
use std::fmt;

/// Result type alias for module operations and hooks
pub type ModuleResult<T> = std::result::Result<T, ModuleError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleError {
    /// No module registered under this id
    NotFound { module_id: String },

    /// A module with this id is already registered
    AlreadyRegistered { module_id: String },

    /// The requested transition is not valid from the current state
    InvalidTransition {
        module_id: String,
        operation: String,
        state: ModuleState,
    },

    /// A lifecycle hook returned an error or panicked
    HookFailed {
        module_id: String,
        hook: String,
        cause: String,
    },

    /// Error raised by module code
    Generic { message: String },
}

impl ModuleError {
    pub fn generic(message: impl Into<String>) -> Self {
        ModuleError::Generic {
            message: message.into(),
        }
    }

    /// True for guard violations that leave the loader untouched
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            ModuleError::AlreadyRegistered { .. } | ModuleError::InvalidTransition { .. }
        )
    }
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::NotFound { module_id } => {
                write!(f, "Module not found: {}", module_id)
            }
            ModuleError::AlreadyRegistered { module_id } => {
                write!(f, "Module '{}' is already registered", module_id)
            }
            ModuleError::InvalidTransition {
                module_id,
                operation,
                state,
            } => {
                write!(
                    f,
                    "Cannot {} module '{}' while it is {}",
                    operation, module_id, state
                )
            }
            ModuleError::HookFailed {
                module_id,
                hook,
                cause,
            } => {
                write!(f, "Module '{}' failed during '{}': {}", module_id, hook, cause)
            }
            ModuleError::Generic { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for ModuleError {}

impl ContextualError for ModuleError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ModuleError::Generic { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ModuleError::Generic { message } => Some(message),
            _ => None,
        }
    }
}

impl From<StorageError> for ModuleError {
    fn from(error: StorageError) -> Self {
        ModuleError::generic(error.to_string())
    }
}

impl From<HostError> for ModuleError {
    fn from(error: HostError) -> Self {
        ModuleError::generic(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = ModuleError::InvalidTransition {
            module_id: "search".to_string(),
            operation: "activate".to_string(),
            state: ModuleState::Active,
        };
        assert_eq!(
            error.to_string(),
            "Cannot activate module 'search' while it is active"
        );

        let error = ModuleError::HookFailed {
            module_id: "git-diff".to_string(),
            hook: "deactivate".to_string(),
            cause: "repository locked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Module 'git-diff' failed during 'deactivate': repository locked"
        );
    }

    #[test]
    fn test_guard_classification() {
        assert!(ModuleError::AlreadyRegistered {
            module_id: "a".to_string()
        }
        .is_guard());
        assert!(!ModuleError::NotFound {
            module_id: "a".to_string()
        }
        .is_guard());
        assert!(!ModuleError::generic("boom").is_guard());
    }

    #[test]
    fn test_host_error_converts_to_generic() {
        let error: ModuleError = HostError::Unavailable {
            command: "read_file".to_string(),
        }
        .into();
        assert!(matches!(error, ModuleError::Generic { .. }));
        assert!(error.to_string().contains("read_file"));
    }
}
