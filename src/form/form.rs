//! Form: a built instance of a schema.
//!
//! Owns the declaration tree, the element store, the subscription table that
//! routes element changes to their owning container, and the adapter event
//! queue. User edits enter through [`Form::edit_element`],
//! [`Form::select_element`] and [`Form::keystroke`] (or the attribute-based
//! equivalents on [`ContainerMut`]); every accepted edit is validated, reported
//! as feedback, and bubbled toward the root by [`Form::notify`].

use std::sync::Arc;

use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use super::access::{ContainerMut, ContainerRef};
use super::hooks::FormHooks;
use super::schema::FormSchema;
use crate::config::FormConfig;
use crate::element::{Element, ElementId, ElementStore, InputState, Keystroke};
use crate::error::StructuralError;
use crate::event::{EventQueue, FormEvent, Hook, Notification, Propagation, PropagationEnd};
use crate::field::{ValidationOutcome, Value};
use crate::tree::{DeclarationNode, DeclarationTree, NodeId};

/// Where an element's change notification is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// The owning container.
    pub container: NodeId,
    /// The attribute the element is declared under in that container.
    pub attribute: String,
}

/// Result of one user edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    /// Validation outcome of the edited text.
    pub outcome: ValidationOutcome<Value>,
    /// How the change notification travelled; `None` when the edit was refused
    /// or made by a hook during another notification.
    pub propagation: Option<Propagation>,
}

impl Edit {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }
}

/// A built form.
pub struct Form {
    pub(crate) tree: DeclarationTree,
    pub(crate) elements: ElementStore,
    pub(crate) subscriptions: SecondaryMap<ElementId, Subscription>,
    pub(crate) events: EventQueue,
    pub(crate) config: FormConfig,
    pub(crate) schema: Arc<FormSchema>,
    /// Set while [`Form::notify`] runs hooks.
    pub(crate) propagating: bool,
}

impl Form {
    /// Build a form with the default configuration.
    pub fn build(
        schema: &Arc<FormSchema>,
        title: impl Into<String>,
    ) -> Result<Self, StructuralError> {
        Self::build_with(schema, title, FormConfig::default())
    }

    // ── Structure ────────────────────────────────────────────────────

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn tree(&self) -> &DeclarationTree {
        &self.tree
    }

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// The root container node.
    pub fn root_node(&self) -> Result<NodeId, StructuralError> {
        self.tree.root().ok_or(StructuralError::UnknownNode)
    }

    /// The root group element.
    pub fn root_group(&self) -> Result<ElementId, StructuralError> {
        self.group_of(self.root_node()?)
    }

    /// Title of the root group.
    pub fn title(&self) -> &str {
        self.root_group()
            .ok()
            .and_then(|group| self.elements.get(group))
            .and_then(Element::as_group)
            .map_or("", |group| group.title())
    }

    /// Where `element`'s changes are delivered, if it is subscribed.
    pub fn subscription(&self, element: ElementId) -> Option<&Subscription> {
        self.subscriptions.get(element)
    }

    /// Number of container-child subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ── Access ───────────────────────────────────────────────────────

    /// Read-only handle on the root container.
    pub fn root(&self) -> Result<ContainerRef<'_>, StructuralError> {
        Ok(ContainerRef::new(self, self.root_node()?))
    }

    /// Mutable handle on the root container.
    pub fn root_mut(&mut self) -> Result<ContainerMut<'_>, StructuralError> {
        let root = self.root_node()?;
        Ok(ContainerMut::new(self, root))
    }

    /// Read-only handle on any container node.
    pub fn container_at(&self, node: NodeId) -> Result<ContainerRef<'_>, StructuralError> {
        self.container_node(node)?;
        Ok(ContainerRef::new(self, node))
    }

    /// Resolve a dotted attribute path (`"config.pipes"`) from the root.
    pub fn resolve(&self, path: &str) -> Result<NodeId, StructuralError> {
        let mut node = self.root_node()?;
        for attribute in path.split('.').filter(|part| !part.is_empty()) {
            self.container_node(node).map_err(|_| StructuralError::NotAContainer {
                attribute: self.tree.path(node),
            })?;
            node = self.child_of(node, attribute)?;
        }
        Ok(node)
    }

    /// The control element of the field at a dotted path.
    pub fn control_at(&self, path: &str) -> Result<ElementId, StructuralError> {
        let node = self.resolve(path)?;
        self.control_of(node)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Drain pending adapter events.
    pub fn drain_events(&mut self) -> Vec<FormEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.events.pending_count()
    }

    /// Title the window hosting the root group.
    pub fn set_window_title(&mut self, title: impl Into<String>) -> Result<(), StructuralError> {
        let title = title.into();
        let group = self.root_group()?;
        match self.elements.get_mut(group) {
            Some(Element::Group(root)) => root.set_window_title(title.clone()),
            _ => return Err(StructuralError::UnknownElement),
        }
        self.events.push(FormEvent::WindowTitle {
            element: group,
            title,
        });
        Ok(())
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Replace the text of a control as if typed by the user.
    pub fn edit_element(
        &mut self,
        element: ElementId,
        text: &str,
    ) -> Result<Edit, StructuralError> {
        let outcome = match self.elements.get_mut(element) {
            Some(Element::Input(input)) => input.edit(text),
            Some(Element::Selector(selector)) => selector.choose(text),
            Some(other) => return Err(not_editable(other)),
            None => return Err(StructuralError::UnknownElement),
        };
        self.after_edit(element, outcome)
    }

    /// Pick a selector item as if chosen by the user.
    pub fn select_element(
        &mut self,
        element: ElementId,
        index: usize,
    ) -> Result<Edit, StructuralError> {
        let outcome = match self.elements.get_mut(element) {
            Some(Element::Selector(selector)) => selector.select(index),
            Some(other) => return Err(not_editable(other)),
            None => return Err(StructuralError::UnknownElement),
        };
        self.after_edit(element, outcome)
    }

    /// Deliver one key to a text input. Cursor movement yields `None`.
    pub fn keystroke(
        &mut self,
        element: ElementId,
        key: Keystroke,
    ) -> Result<Option<Edit>, StructuralError> {
        let outcome = match self.elements.get_mut(element) {
            Some(Element::Input(input)) => input.apply(key),
            Some(other) => return Err(not_editable(other)),
            None => return Err(StructuralError::UnknownElement),
        };
        outcome
            .map(|outcome| self.after_edit(element, outcome))
            .transpose()
    }

    fn after_edit(
        &mut self,
        element: ElementId,
        outcome: ValidationOutcome<Value>,
    ) -> Result<Edit, StructuralError> {
        let subscription = self
            .subscriptions
            .get(element)
            .cloned()
            .ok_or(StructuralError::UnknownElement)?;

        if let ValidationOutcome::Rejected { reason, .. } = &outcome {
            warn!(attribute = %subscription.attribute, %reason, "edit refused");
            return Ok(Edit {
                outcome,
                propagation: None,
            });
        }

        let state: InputState = outcome.validity().into();
        debug!(
            attribute = %subscription.attribute,
            text = outcome.corrected(),
            ?state,
            "field edited"
        );
        self.events.push(FormEvent::Feedback { element, state });

        if self.propagating {
            debug!(attribute = %subscription.attribute, "edit during propagation, not bubbled");
            return Ok(Edit {
                outcome,
                propagation: None,
            });
        }

        let propagation = self.notify(subscription.container, subscription.attribute)?;
        Ok(Edit {
            outcome,
            propagation: Some(propagation),
        })
    }

    // ── Propagation ──────────────────────────────────────────────────

    /// Deliver "`attribute` changed" to `container` and bubble toward the root.
    ///
    /// Each container runs its hooks in order; the first `false` stops the
    /// notification. A container whose `on_change` passes notifies its parent,
    /// tagged with its own attribute. The root consumes the notification and
    /// queues [`FormEvent::Changed`].
    ///
    /// Edits made by hooks while a notification travels are validated and
    /// reported as feedback but never start a notification of their own.
    pub fn notify(
        &mut self,
        container: NodeId,
        attribute: impl Into<String>,
    ) -> Result<Propagation, StructuralError> {
        let outer = std::mem::replace(&mut self.propagating, true);
        let result = self.bubble(Notification::new(container, attribute));
        self.propagating = outer;
        result
    }

    fn bubble(&mut self, mut notification: Notification) -> Result<Propagation, StructuralError> {
        let mut steps = Vec::new();

        loop {
            let node = notification.container;
            let attribute = notification.attribute.clone();
            let hooks = self.hooks_of(node)?;
            steps.push(notification);

            let stop = |hook: Hook| {
                debug!(container = ?node, %attribute, ?hook, "change notification stopped");
                PropagationEnd::Stopped {
                    container: node,
                    hook,
                }
            };

            trace!(container = ?node, %attribute, "on_change_pre_validate");
            if !hooks.on_change_pre_validate(&attribute, &ContainerRef::new(self, node)) {
                let end = stop(Hook::PreValidate);
                return Ok(Propagation { steps, end });
            }
            trace!(container = ?node, "is_valid");
            if !hooks.is_valid(&ContainerRef::new(self, node)) {
                let end = stop(Hook::IsValid);
                return Ok(Propagation { steps, end });
            }
            trace!(container = ?node, %attribute, "on_change");
            if !hooks.on_change(&attribute, &mut ContainerMut::new(self, node)) {
                let end = stop(Hook::OnChange);
                return Ok(Propagation { steps, end });
            }

            let group = self.group_of(node)?;
            match self.subscriptions.get(group) {
                Some(parent) => {
                    notification = Notification::new(parent.container, parent.attribute.clone());
                }
                None => {
                    debug!(%attribute, steps = steps.len(), "change reached root");
                    self.events.push(FormEvent::Changed {
                        element: group,
                        attribute,
                    });
                    return Ok(Propagation {
                        steps,
                        end: PropagationEnd::ReachedRoot,
                    });
                }
            }
        }
    }

    // ── Internal helpers ─────────────────────────────────────────────

    pub(crate) fn node(&self, id: NodeId) -> Result<&DeclarationNode, StructuralError> {
        self.tree.get(id).ok_or(StructuralError::UnknownNode)
    }

    /// `id` as a container node; `NotAContainer` for fields.
    pub(crate) fn container_node(&self, id: NodeId) -> Result<&DeclarationNode, StructuralError> {
        let node = self.node(id)?;
        if !node.is_container() {
            return Err(StructuralError::NotAContainer {
                attribute: node.attribute().to_owned(),
            });
        }
        Ok(node)
    }

    /// Display name of a container for diagnostics.
    pub(crate) fn container_name(&self, id: NodeId) -> String {
        match self.tree.get(id).and_then(DeclarationNode::form) {
            Some(form) => form.schema().name().to_owned(),
            None => self.tree.path(id),
        }
    }

    pub(crate) fn child_of(
        &self,
        container: NodeId,
        attribute: &str,
    ) -> Result<NodeId, StructuralError> {
        self.tree
            .child(container, attribute)
            .ok_or_else(|| StructuralError::UnknownAttribute {
                container: self.container_name(container),
                attribute: attribute.to_owned(),
            })
    }

    pub(crate) fn group_of(&self, id: NodeId) -> Result<ElementId, StructuralError> {
        let node = self.node(id)?;
        node.group().ok_or_else(|| StructuralError::NotAContainer {
            attribute: node.attribute().to_owned(),
        })
    }

    pub(crate) fn control_of(&self, id: NodeId) -> Result<ElementId, StructuralError> {
        let node = self.node(id)?;
        node.control().ok_or_else(|| StructuralError::NotAField {
            attribute: node.attribute().to_owned(),
        })
    }

    fn hooks_of(&self, id: NodeId) -> Result<Arc<dyn FormHooks>, StructuralError> {
        let node = self.container_node(id)?;
        node.form()
            .map(|form| Arc::clone(form.schema().hooks()))
            .ok_or(StructuralError::UnknownNode)
    }

    pub(crate) fn subscribe(&mut self, element: ElementId, container: NodeId, attribute: &str) {
        trace!(?element, container = ?container, attribute, "subscribed");
        self.subscriptions.insert(
            element,
            Subscription {
                container,
                attribute: attribute.to_owned(),
            },
        );
    }
}

fn not_editable(element: &Element) -> StructuralError {
    StructuralError::NotEditable {
        kind: element.kind(),
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema.name())
            .field("nodes", &self.tree.len())
            .field("elements", &self.elements.len())
            .field("pending_events", &self.events.pending_count())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::NumberLocale;
    use crate::field::FieldDeclaration;

    /// Edits `target` to `text` whenever `source` changes, logging each call.
    struct Mirror {
        source: &'static str,
        target: &'static str,
        text: &'static str,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl FormHooks for Mirror {
        fn on_change(&self, attribute: &str, form: &mut ContainerMut<'_>) -> bool {
            self.calls.borrow_mut().push(attribute.to_owned());
            if attribute != self.source {
                return true;
            }
            match form.edit(self.target, self.text) {
                Ok(edit) => edit.propagation.is_none(),
                Err(_) => false,
            }
        }
    }

    fn mirrored(source: &'static str, target: &'static str) -> (Form, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let schema = FormSchema::builder("Pair")
            .field("a", FieldDeclaration::integer("A"))
            .field("b", FieldDeclaration::integer("B"))
            .hooks(Mirror {
                source,
                target,
                text: "1",
                calls: Rc::clone(&calls),
            })
            .build()
            .unwrap();
        let config = FormConfig::new().with_locale(NumberLocale::POINT);
        let mut form = Form::build_with(&schema, "Pair", config).unwrap();
        form.drain_events();
        (form, calls)
    }

    fn changed(events: &[FormEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, FormEvent::Changed { .. }))
            .count()
    }

    // ── Edits from hooks ─────────────────────────────────────────────

    #[test]
    fn hook_edit_of_sibling_does_not_bubble() {
        let (mut form, calls) = mirrored("a", "b");
        let a = form.control_at("a").unwrap();
        let b = form.control_at("b").unwrap();

        let edit = form.edit_element(a, "5").unwrap();
        assert!(edit.propagation.is_some_and(|p| p.reached_root()));
        assert_eq!(*calls.borrow(), vec!["a"]);

        let root = form.root().unwrap();
        assert_eq!(root.get("b").unwrap(), Some(Value::Integer(1)));
        assert_eq!(root.state("b").unwrap(), InputState::Valid);

        let events = form.drain_events();
        assert_eq!(changed(&events), 1);
        assert!(events.contains(&FormEvent::Feedback {
            element: b,
            state: InputState::Valid
        }));
    }

    #[test]
    fn hook_edit_of_own_field_terminates() {
        let (mut form, calls) = mirrored("a", "a");
        let a = form.control_at("a").unwrap();

        let edit = form.edit_element(a, "5").unwrap();
        assert!(edit.propagation.is_some_and(|p| p.reached_root()));
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(form.root().unwrap().text("a").unwrap(), "1");
        assert_eq!(changed(&form.drain_events()), 1);
    }

    #[test]
    fn user_edits_bubble_again_after_propagation() {
        let (mut form, calls) = mirrored("a", "b");
        form.root_mut().unwrap().edit("a", "5").unwrap();
        let edit = form.root_mut().unwrap().edit("b", "7").unwrap();
        assert!(edit.propagation.is_some());
        assert_eq!(*calls.borrow(), vec!["a", "b"]);
        assert!(!form.propagating);
        assert_eq!(changed(&form.drain_events()), 2);
    }
}
