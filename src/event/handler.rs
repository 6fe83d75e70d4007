//! Event dispatch: the adapter event queue and propagation traces.
//!
//! [`EventQueue`] buffers [`FormEvent`]s until the adapter drains them.
//! [`Propagation`] records how one notification actually
//! travelled: which containers ran their hooks, and where it ended.

use std::collections::VecDeque;

use super::message::{FormEvent, Notification};
use crate::tree::NodeId;

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// FIFO queue of adapter-facing events.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<FormEvent>,
}

impl EventQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event for later processing.
    pub fn push(&mut self, event: FormEvent) {
        self.queue.push_back(event);
    }

    /// Drain all pending events. The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<FormEvent> {
        self.queue.drain(..).collect()
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// The container hook that can stop a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    PreValidate,
    IsValid,
    OnChange,
}

/// Where a notification stopped travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationEnd {
    /// Every container passed; the root consumed the notification.
    ReachedRoot,
    /// `hook` of `container` returned `false`.
    Stopped { container: NodeId, hook: Hook },
}

/// Trace of one notification bubbling toward the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Notifications delivered, in order.
    pub steps: Vec<Notification>,
    pub end: PropagationEnd,
}

impl Propagation {
    pub fn reached_root(&self) -> bool {
        self.end == PropagationEnd::ReachedRoot
    }

    /// The container and hook that stopped the notification.
    pub fn stopped_at(&self) -> Option<(NodeId, Hook)> {
        match self.end {
            PropagationEnd::Stopped { container, hook } => Some((container, hook)),
            PropagationEnd::ReachedRoot => None,
        }
    }

    /// Containers visited, in order.
    pub fn containers(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.container).collect()
    }

    /// The attribute each container was told about, in order.
    pub fn attributes(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.attribute.as_str()).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
