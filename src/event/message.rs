//! Messages: the change notification that bubbles through containers, and the
//! [`FormEvent`]s queued for a rendering adapter.

use crate::element::{ElementId, InputState};
use crate::tree::NodeId;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// "Attribute `attribute` of `container` changed."
///
/// Raised by a field edit for the field's owning container, and by a
/// container's `on_change` for its parent, tagged with the container's own
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The container receiving the notification.
    pub container: NodeId,
    /// The child attribute that changed.
    pub attribute: String,
}

impl Notification {
    pub fn new(container: NodeId, attribute: impl Into<String>) -> Self {
        Self {
            container,
            attribute: attribute.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FormEvent
// ---------------------------------------------------------------------------

/// Events an adapter drains to keep its view in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// An element was created under `parent` (`None` for the root group).
    Mounted {
        element: ElementId,
        parent: Option<ElementId>,
    },
    /// A control's validation state changed after a user edit.
    Feedback {
        element: ElementId,
        state: InputState,
    },
    /// A change notification reached the root group and was consumed there.
    Changed {
        element: ElementId,
        attribute: String,
    },
    /// The root group's window title changed.
    WindowTitle { element: ElementId, title: String },
}

impl FormEvent {
    /// Human-readable name for this event type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted { .. } => "Mounted",
            Self::Feedback { .. } => "Feedback",
            Self::Changed { .. } => "Changed",
            Self::WindowTitle { .. } => "WindowTitle",
        }
    }

    /// The element the event concerns.
    pub fn element(&self) -> ElementId {
        match self {
            Self::Mounted { element, .. }
            | Self::Feedback { element, .. }
            | Self::Changed { element, .. }
            | Self::WindowTitle { element, .. } => *element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn names_and_elements() {
        let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
        let e = ids.insert(());
        let event = FormEvent::Feedback {
            element: e,
            state: InputState::Valid,
        };
        assert_eq!(event.name(), "Feedback");
        assert_eq!(event.element(), e);
        let event = FormEvent::WindowTitle {
            element: e,
            title: "T".into(),
        };
        assert_eq!(event.name(), "WindowTitle");
    }

    #[test]
    fn notification_new() {
        let n = Notification::new(NodeId::default(), "pipes");
        assert_eq!(n.attribute, "pipes");
    }
}
