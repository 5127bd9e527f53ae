//! Generic error reporting utilities
//!
//! Errors across the host are split into user-actionable ones (bad flags,
//! broken config) and system ones (a module hook failing, a storage file
//! that cannot be written). The binary reports both through
//! [`log_error_with_context`].

/// Errors that know whether the user can do something about them
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True if the message should be shown to the user verbatim
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with the right amount of detail
///
/// User-actionable errors print their own message; system errors print the
/// operation context, with the error itself at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => log::error!("FATAL: {}", user_msg),
        None => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
