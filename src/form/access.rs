//! Container handles: typed read and write access to a container's attributes.
//!
//! A [`ContainerRef`] reads; a [`ContainerMut`] also writes and edits. Both are
//! bound to one container node of a [`Form`] and resolve attribute names among
//! that container's children.
//!
//! Reads return the control's converted value (`None` when the text does not
//! parse). Writes set the control's display through the number locale without
//! validating and without raising a change notification.

use tracing::trace;

use super::form::{Edit, Form};
use super::mapping::{FormMapping, MappingValue};
use crate::element::{Element, ElementId, InputState};
use crate::error::{FormError, StructuralError, UnitError};
use crate::field::Value;
use crate::tree::{DeclarationNode, NodeId};
use crate::units::UnitKey;

// ---------------------------------------------------------------------------
// ContainerRef
// ---------------------------------------------------------------------------

/// Read-only view of one container.
#[derive(Clone, Copy)]
pub struct ContainerRef<'a> {
    form: &'a Form,
    node: NodeId,
}

impl<'a> ContainerRef<'a> {
    pub(crate) fn new(form: &'a Form, node: NodeId) -> Self {
        Self { form, node }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn form(&self) -> &'a Form {
        self.form
    }

    /// The attribute this container was declared under.
    pub fn attribute(&self) -> &'a str {
        self.form
            .tree
            .get(self.node)
            .map_or("", DeclarationNode::attribute)
    }

    /// The group title shown for this container.
    pub fn title(&self) -> &'a str {
        self.form
            .tree
            .get(self.node)
            .and_then(DeclarationNode::form)
            .map_or("", |form| form.title())
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> Vec<&'a str> {
        self.form
            .tree
            .get(self.node)
            .map(|node| node.children().keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.form.tree.parent(self.node).is_none()
    }

    /// The converted value of field `name`.
    pub fn get(&self, name: &str) -> Result<Option<Value>, StructuralError> {
        Ok(self.control(name)?.converted())
    }

    /// The converted value of field `name` as `T`; `None` if it does not convert.
    pub fn get_as<T: TryFrom<Value>>(&self, name: &str) -> Result<Option<T>, StructuralError> {
        Ok(self.get(name)?.and_then(|value| T::try_from(value).ok()))
    }

    /// The raw display text of field `name`.
    pub fn text(&self, name: &str) -> Result<&'a str, StructuralError> {
        Ok(self.control(name)?.text().unwrap_or_default())
    }

    /// The feedback state of field `name`.
    pub fn state(&self, name: &str) -> Result<InputState, StructuralError> {
        Ok(self.control(name)?.state().unwrap_or_default())
    }

    /// The value of field `name` converted from its declared unit to `unit`.
    pub fn get_in<'u>(
        &self,
        name: &str,
        unit: impl Into<UnitKey<'u>>,
    ) -> Result<Option<f64>, FormError> {
        let node = self.field_node(name)?;
        let suffix = node
            .field()
            .and_then(|field| field.unit())
            .ok_or_else(|| UnitError::NoUnit {
                attribute: name.to_owned(),
            })?;
        let Some(value) = self.get(name)?.and_then(|value| value.as_f64()) else {
            return Ok(None);
        };
        Ok(Some(suffix.quantity().convert(value, suffix.unit(), unit)?))
    }

    /// The nested container `name`.
    pub fn container(&self, name: &str) -> Result<ContainerRef<'a>, StructuralError> {
        let child = self.form.child_of(self.node, name)?;
        self.form.container_node(child)?;
        Ok(ContainerRef::new(self.form, child))
    }

    /// Nested mapping of every attribute's value, in declaration order.
    ///
    /// Unit suffixes are display only and never appear in the mapping.
    pub fn as_mapping(&self) -> FormMapping {
        let mut mapping = FormMapping::new();
        let Some(node) = self.form.tree.get(self.node) else {
            return mapping;
        };
        for (attribute, &child) in node.children() {
            let value = match self.form.tree.get(child) {
                Some(child_node) if child_node.is_container() => {
                    MappingValue::Form(ContainerRef::new(self.form, child).as_mapping())
                }
                Some(child_node) => MappingValue::Value(
                    child_node
                        .control()
                        .and_then(|control| self.form.elements.get(control))
                        .and_then(Element::converted),
                ),
                None => continue,
            };
            mapping.insert(attribute.clone(), value);
        }
        mapping
    }

    fn field_node(&self, name: &str) -> Result<&'a DeclarationNode, StructuralError> {
        let child = self.form.child_of(self.node, name)?;
        let node = self.form.node(child)?;
        if node.is_container() {
            return Err(StructuralError::NotAField {
                attribute: name.to_owned(),
            });
        }
        Ok(node)
    }

    fn control_id(&self, name: &str) -> Result<ElementId, StructuralError> {
        let child = self.form.child_of(self.node, name)?;
        self.form.control_of(child)
    }

    fn control(&self, name: &str) -> Result<&'a Element, StructuralError> {
        let id = self.control_id(name)?;
        self.form.elements.get(id).ok_or(StructuralError::UnknownElement)
    }
}

impl std::fmt::Debug for ContainerRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerRef")
            .field("attribute", &self.attribute())
            .field("node", &self.node)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ContainerMut
// ---------------------------------------------------------------------------

/// Mutable view of one container.
pub struct ContainerMut<'a> {
    form: &'a mut Form,
    node: NodeId,
}

impl<'a> ContainerMut<'a> {
    pub(crate) fn new(form: &'a mut Form, node: NodeId) -> Self {
        Self { form, node }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Read-only view of the same container.
    pub fn view(&self) -> ContainerRef<'_> {
        ContainerRef::new(self.form, self.node)
    }

    pub fn get(&self, name: &str) -> Result<Option<Value>, StructuralError> {
        self.view().get(name)
    }

    pub fn get_as<T: TryFrom<Value>>(&self, name: &str) -> Result<Option<T>, StructuralError> {
        self.view().get_as(name)
    }

    pub fn as_mapping(&self) -> FormMapping {
        self.view().as_mapping()
    }

    /// Write field `name`. Containers cannot be written directly.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StructuralError> {
        self.write(name, Some(value.into()))
    }

    /// Clear field `name`: empty text, or no selection.
    pub fn clear(&mut self, name: &str) -> Result<(), StructuralError> {
        self.write(name, None)
    }

    /// Write every value of `mapping`, recursing into nested forms.
    pub fn set_from_mapping(&mut self, mapping: &FormMapping) -> Result<(), StructuralError> {
        for (attribute, value) in mapping.iter() {
            match value {
                MappingValue::Value(Some(value)) => self.set(attribute, value.clone())?,
                MappingValue::Value(None) => self.clear(attribute)?,
                MappingValue::Form(nested) => {
                    self.container_mut(attribute)?.set_from_mapping(nested)?
                }
            }
        }
        Ok(())
    }

    /// Mutable handle on the nested container `name`.
    pub fn container_mut(&mut self, name: &str) -> Result<ContainerMut<'_>, StructuralError> {
        let child = self.form.child_of(self.node, name)?;
        self.form.container_node(child)?;
        Ok(ContainerMut::new(self.form, child))
    }

    /// Replace the text of field `name` as a user edit.
    ///
    /// From inside a hook the edit is validated but not bubbled.
    pub fn edit(&mut self, name: &str, text: &str) -> Result<Edit, StructuralError> {
        let control = self.view().control_id(name)?;
        self.form.edit_element(control, text)
    }

    /// Pick item `index` of selector field `name` as a user edit.
    pub fn select(&mut self, name: &str, index: usize) -> Result<Edit, StructuralError> {
        let control = self.view().control_id(name)?;
        self.form.select_element(control, index)
    }

    fn write(&mut self, name: &str, value: Option<Value>) -> Result<(), StructuralError> {
        let child = self.form.child_of(self.node, name)?;
        if self.form.node(child)?.is_container() {
            return Err(StructuralError::ContainerWrite {
                attribute: name.to_owned(),
            });
        }
        let control = self.form.control_of(child)?;
        let locale = self.form.config.locale;
        let element = self
            .form
            .elements
            .get_mut(control)
            .ok_or(StructuralError::UnknownElement)?;
        if !element.write(value.as_ref(), locale) {
            return Err(StructuralError::NotEditable {
                kind: element.kind(),
            });
        }
        trace!(attribute = name, ?value, "field written");
        Ok(())
    }
}

impl std::fmt::Debug for ContainerMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerMut").field("node", &self.node).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
