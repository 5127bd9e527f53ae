//! Panic isolation for code owned by modules
//!
//! Subscriber callbacks, command handlers and lifecycle hooks belong to
//! independently written modules. A panic in any of them is caught here and
//! turned into a message the caller can log.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Extract a readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run `f`, converting a panic into `Err(message)`
pub fn run_isolated<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}
