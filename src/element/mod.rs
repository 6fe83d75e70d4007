//! Headless element models: what an external renderer draws.
//!
//! Every node of a built form controls one or more elements: a [`GroupBox`] for
//! containers, a [`Label`] plus a [`TextInput`] or [`Selector`] (and optionally
//! a unit-suffix label) for fields. Elements live in an [`ElementStore`] arena
//! that records each element's parent element, mirroring the node tree.

pub mod group;
pub mod input;
pub mod label;
pub mod selector;

use std::fmt;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

pub use group::GroupBox;
pub use input::{Keystroke, TextInput};
pub use label::Label;
pub use selector::Selector;

use crate::config::NumberLocale;
use crate::field::{Validity, Value};

new_key_type! {
    /// Unique identifier for an element. Copy, lightweight (u64).
    pub struct ElementId;
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Validation feedback state of an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputState {
    /// Not validated since creation or the last programmatic write.
    #[default]
    Unbound,
    Valid,
    Intermediate,
    Invalid,
}

impl From<Validity> for InputState {
    fn from(validity: Validity) -> Self {
        match validity {
            Validity::Valid => Self::Valid,
            Validity::Intermediate => Self::Intermediate,
            Validity::Invalid => Self::Invalid,
        }
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unbound => "unbound",
            Self::Valid => "valid",
            Self::Intermediate => "intermediate",
            Self::Invalid => "invalid",
        })
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A single element of a form's element tree.
#[derive(Debug)]
pub enum Element {
    Label(Label),
    Input(TextInput),
    Selector(Selector),
    Group(GroupBox),
}

impl Element {
    /// Type name, for diagnostics and renderers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Label(_) => "Label",
            Self::Input(_) => "TextInput",
            Self::Selector(_) => "Selector",
            Self::Group(_) => "GroupBox",
        }
    }

    /// Grid columns the element occupies in its parent group.
    pub fn span(&self) -> u16 {
        match self {
            Self::Group(_) => 3,
            _ => 1,
        }
    }

    /// Whether the element accepts user edits at all.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Selector(_))
    }

    /// Current display text of a label or control.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label.text()),
            Self::Input(input) => Some(input.text()),
            Self::Selector(selector) => Some(selector.text()),
            Self::Group(_) => None,
        }
    }

    /// Converted value of a control, `None` for non-controls and unparsable text.
    pub fn converted(&self) -> Option<Value> {
        match self {
            Self::Input(input) => input.converted(),
            Self::Selector(selector) => selector.converted(),
            _ => None,
        }
    }

    /// Feedback state of a control.
    pub fn state(&self) -> Option<InputState> {
        match self {
            Self::Input(input) => Some(input.state()),
            Self::Selector(selector) => Some(selector.state()),
            _ => None,
        }
    }

    /// Programmatic write of a control's display. Returns `false` for non-controls.
    pub(crate) fn write(&mut self, value: Option<&Value>, locale: NumberLocale) -> bool {
        match (self, value) {
            (Self::Input(input), Some(value)) => input.set_text(value.to_display(locale)),
            (Self::Input(input), None) => input.set_text(""),
            (Self::Selector(selector), Some(value)) => selector.set_value(value, locale),
            (Self::Selector(selector), None) => selector.clear(),
            _ => return false,
        }
        true
    }

    pub fn as_group(&self) -> Option<&GroupBox> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&TextInput> {
        match self {
            Self::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_selector(&self) -> Option<&Selector> {
        match self {
            Self::Selector(selector) => Some(selector),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ElementStore
// ---------------------------------------------------------------------------

/// Arena of elements with parent links.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: SlotMap<ElementId, Element>,
    parent: SecondaryMap<ElementId, ElementId>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, optionally under a parent element.
    pub fn insert(&mut self, element: Element, parent: Option<ElementId>) -> ElementId {
        let id = self.elements.insert(element);
        if let Some(parent) = parent {
            debug_assert!(self.elements.contains_key(parent), "parent element does not exist");
            self.parent.insert(id, parent);
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// The parent element, if any.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all elements (arena order, not tree order).
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::range::FloatRange;
    use crate::field::validator::FloatValidator;

    fn float_input() -> TextInput {
        TextInput::new(Box::new(FloatValidator::new(
            FloatRange::default(),
            NumberLocale::POINT,
        )))
    }

    #[test]
    fn kinds_and_spans() {
        let group = Element::Group(GroupBox::new("Title"));
        let label = Element::Label(Label::new("Mass:"));
        let input = Element::Input(float_input());
        assert_eq!(group.kind(), "GroupBox");
        assert_eq!(group.span(), 3);
        assert_eq!(label.span(), 1);
        assert!(input.is_editable());
        assert!(!label.is_editable());
        assert_eq!(group.text(), None);
        assert_eq!(label.text(), Some("Mass:"));
    }

    #[test]
    fn write_uses_locale() {
        let mut input = Element::Input(float_input());
        assert!(input.write(Some(&Value::Float(2.5)), NumberLocale::POINT));
        assert_eq!(input.text(), Some("2.5"));
        assert_eq!(input.converted(), Some(Value::Float(2.5)));
        assert!(input.write(None, NumberLocale::POINT));
        assert_eq!(input.text(), Some(""));

        let mut label = Element::Label(Label::new("x"));
        assert!(!label.write(Some(&Value::Integer(1)), NumberLocale::POINT));
    }

    #[test]
    fn store_tracks_parents() {
        let mut store = ElementStore::new();
        let group = store.insert(Element::Group(GroupBox::new("G")), None);
        let label = store.insert(Element::Label(Label::new("L")), Some(group));
        assert_eq!(store.parent(label), Some(group));
        assert_eq!(store.parent(group), None);
        assert_eq!(store.len(), 2);
        assert!(store.contains(label));
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn input_state_from_validity() {
        assert_eq!(InputState::from(Validity::Valid), InputState::Valid);
        assert_eq!(InputState::from(Validity::Invalid), InputState::Invalid);
        assert_eq!(InputState::default(), InputState::Unbound);
        assert_eq!(InputState::Intermediate.to_string(), "intermediate");
    }
}
