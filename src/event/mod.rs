//! Event system: change notifications, adapter events, dispatch traces.

pub mod handler;
pub mod message;

pub use handler::{EventQueue, Hook, Propagation, PropagationEnd};
pub use message::{FormEvent, Notification};
