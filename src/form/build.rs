//! Form construction: schema → declaration tree + element tree + subscriptions.
//!
//! Depth-first in declaration order. Every container gets one group; every
//! field gets a label, a control and an optional unit suffix in one grid row
//! of its container's group. Field controls subscribe to their owning
//! container, and every non-root group subscribes to its parent container,
//! each tagged with the attribute it was declared under.

use std::sync::Arc;

use slotmap::SecondaryMap;
use tracing::{debug, debug_span};

use super::form::Form;
use super::schema::{FormDeclaration, FormSchema, SchemaEntry};
use crate::config::FormConfig;
use crate::element::{Element, ElementId, ElementStore, GroupBox};
use crate::error::StructuralError;
use crate::event::{EventQueue, FormEvent};
use crate::field::FieldDeclaration;
use crate::tree::{Declaration, DeclarationNode, DeclarationTree, NodeElements, NodeId};

/// Attribute name of the root node.
pub const ROOT_ATTRIBUTE: &str = "root";

impl Form {
    /// Build a form from `schema`, shown under `title`.
    pub fn build_with(
        schema: &Arc<FormSchema>,
        title: impl Into<String>,
        config: FormConfig,
    ) -> Result<Self, StructuralError> {
        let _span = debug_span!("build_form", form = schema.name()).entered();
        let mut form = Self {
            tree: DeclarationTree::new(),
            elements: ElementStore::new(),
            subscriptions: SecondaryMap::new(),
            events: EventQueue::new(),
            config,
            schema: Arc::clone(schema),
            propagating: false,
        };

        let declaration = FormDeclaration::new(title, Arc::clone(schema));
        form.build_container(None, ROOT_ATTRIBUTE, declaration)?;
        if let Some(title) = form.config.window_title.clone() {
            form.set_window_title(title)?;
        }

        debug!(
            nodes = form.tree.len(),
            elements = form.elements.len(),
            subscriptions = form.subscriptions.len(),
            "form built"
        );
        Ok(form)
    }

    fn build_container(
        &mut self,
        parent: Option<NodeId>,
        attribute: &str,
        declaration: FormDeclaration,
    ) -> Result<NodeId, StructuralError> {
        let parent_group = parent.map(|p| self.group_of(p)).transpose()?;
        let schema = Arc::clone(declaration.schema());

        let group = self
            .elements
            .insert(Element::Group(GroupBox::new(declaration.title())), parent_group);
        self.events.push(FormEvent::Mounted {
            element: group,
            parent: parent_group,
        });

        let node = DeclarationNode::new(attribute, Declaration::Form(declaration));
        let id = match parent {
            None => self.tree.insert_root(node),
            Some(parent) => {
                let id = self.tree.insert_child(parent, node)?;
                self.subscribe(group, parent, attribute);
                id
            }
        };
        self.tree.set_elements(id, NodeElements::Group(group))?;

        for (attr, entry) in schema.entries() {
            let row = match entry {
                SchemaEntry::Field(field) => self.build_field(id, group, attr, field)?,
                SchemaEntry::Form(nested) => {
                    let child = self.build_container(Some(id), attr, nested.clone())?;
                    vec![self.group_of(child)?]
                }
            };
            if let Some(Element::Group(owner)) = self.elements.get_mut(group) {
                owner.push_row(row);
            }
        }
        Ok(id)
    }

    fn build_field(
        &mut self,
        container: NodeId,
        group: ElementId,
        attribute: &str,
        field: &Arc<FieldDeclaration>,
    ) -> Result<Vec<ElementId>, StructuralError> {
        let node = DeclarationNode::new(attribute, Declaration::Field(Arc::clone(field)));
        let id = self.tree.insert_child(container, node)?;

        let elements =
            field.create_elements(attribute, Some(group), &mut self.elements, &self.config)?;
        let ids = elements.ids();
        for &element in &ids {
            self.events.push(FormEvent::Mounted {
                element,
                parent: Some(group),
            });
        }
        self.subscribe(elements.control, container, attribute);
        self.tree.set_elements(id, NodeElements::Field(elements))?;
        Ok(ids)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
