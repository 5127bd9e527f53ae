//! Public API for the event system
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::events::bus::{EventBus, EventCallback, Subscription, SubscriptionId};
pub use crate::events::topics::Topic;
