//! Node types: NodeId, Declaration, DeclarationNode and its element handles.

use std::sync::Arc;

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::element::ElementId;
use crate::field::FieldDeclaration;
use crate::form::FormDeclaration;

new_key_type! {
    /// Unique identifier for a declaration node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// What a node was declared as.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// A nested form (or the root form itself).
    Form(FormDeclaration),
    /// A leaf field.
    Field(Arc<FieldDeclaration>),
}

/// Elements materialized for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldElements {
    pub label: ElementId,
    pub control: ElementId,
    pub suffix: Option<ElementId>,
}

impl FieldElements {
    /// All element ids in grid order.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut ids = vec![self.label, self.control];
        ids.extend(self.suffix);
        ids
    }
}

/// Element handles controlled by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeElements {
    /// Not materialized yet.
    #[default]
    Unbound,
    Group(ElementId),
    Field(FieldElements),
}

/// One declared attribute of a built form.
#[derive(Debug, Clone)]
pub struct DeclarationNode {
    attribute: String,
    declaration: Declaration,
    pub(crate) elements: NodeElements,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: IndexMap<String, NodeId>,
}

impl DeclarationNode {
    pub fn new(attribute: impl Into<String>, declaration: Declaration) -> Self {
        Self {
            attribute: attribute.into(),
            declaration,
            elements: NodeElements::Unbound,
            parent: None,
            children: IndexMap::new(),
        }
    }

    /// The attribute name this node was declared under.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn elements(&self) -> NodeElements {
        self.elements
    }

    /// The owning container; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes keyed by attribute, in declaration order.
    pub fn children(&self) -> &IndexMap<String, NodeId> {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        matches!(self.declaration, Declaration::Form(_))
    }

    /// The field declaration, for leaf nodes.
    pub fn field(&self) -> Option<&Arc<FieldDeclaration>> {
        match &self.declaration {
            Declaration::Field(field) => Some(field),
            Declaration::Form(_) => None,
        }
    }

    /// The form declaration, for containers.
    pub fn form(&self) -> Option<&FormDeclaration> {
        match &self.declaration {
            Declaration::Form(form) => Some(form),
            Declaration::Field(_) => None,
        }
    }

    /// The group element of a container.
    pub fn group(&self) -> Option<ElementId> {
        match self.elements {
            NodeElements::Group(group) => Some(group),
            _ => None,
        }
    }

    /// The control element of a field.
    pub fn control(&self) -> Option<ElementId> {
        match self.elements {
            NodeElements::Field(field) => Some(field.control),
            _ => None,
        }
    }
}
