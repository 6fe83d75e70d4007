//! Tree operations: insert, lookup, walk.

use slotmap::SlotMap;

use super::node::{DeclarationNode, NodeElements, NodeId};
use crate::error::StructuralError;

/// The declaration tree of a built form, backed by a slotmap arena.
///
/// Nodes hold a non-owning parent id and their children keyed by attribute,
/// so attribute lookup under a container is O(1) and children keep
/// declaration order.
#[derive(Debug, Default)]
pub struct DeclarationTree {
    nodes: SlotMap<NodeId, DeclarationNode>,
    root: Option<NodeId>,
}

impl DeclarationTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parentless node. The first one becomes the root.
    pub fn insert_root(&mut self, mut node: DeclarationNode) -> NodeId {
        node.parent = None;
        let id = self.nodes.insert(node);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert `node` as the child of `parent`, keyed by its attribute.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        mut node: DeclarationNode,
    ) -> Result<NodeId, StructuralError> {
        let Some(owner) = self.nodes.get(parent) else {
            return Err(StructuralError::MissingParent {
                attribute: node.attribute().to_owned(),
            });
        };
        if owner.children.contains_key(node.attribute()) {
            return Err(StructuralError::DuplicateAttribute {
                form: owner.attribute().to_owned(),
                attribute: node.attribute().to_owned(),
            });
        }

        let attribute = node.attribute().to_owned();
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        if let Some(owner) = self.nodes.get_mut(parent) {
            owner.children.insert(attribute, id);
        }
        Ok(id)
    }

    /// Record the elements a node controls.
    pub fn set_elements(
        &mut self,
        id: NodeId,
        elements: NodeElements,
    ) -> Result<(), StructuralError> {
        let node = self.nodes.get_mut(id).ok_or(StructuralError::UnknownNode)?;
        node.elements = elements;
        Ok(())
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(DeclarationNode::parent)
    }

    /// The child declared under `attribute`.
    pub fn child(&self, id: NodeId, attribute: &str) -> Option<NodeId> {
        self.nodes
            .get(id)
            .and_then(|node| node.children.get(attribute).copied())
    }

    /// Child ids in declaration order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|node| node.children.values().copied().collect())
            .unwrap_or_default()
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Dotted attribute path from the root (`"config.pipes"`), empty for the root.
    pub fn path(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(node) = self.nodes.get(current) {
                parts.push(node.attribute());
            }
            current = parent;
        }
        parts.reverse();
        parts.join(".")
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for child in self.children(current).into_iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    pub fn get(&self, id: NodeId) -> Option<&DeclarationNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DeclarationNode> {
        self.nodes.get_mut(id)
    }

    /// The root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::field::FieldDeclaration;
    use crate::form::{FormDeclaration, FormSchema};
    use crate::tree::Declaration;

    fn form_node(attribute: &str, title: &str) -> DeclarationNode {
        let schema = FormSchema::builder(title).build().unwrap();
        DeclarationNode::new(attribute, Declaration::Form(FormDeclaration::new(title, schema)))
    }

    fn field_node(attribute: &str) -> DeclarationNode {
        DeclarationNode::new(
            attribute,
            Declaration::Field(Arc::new(FieldDeclaration::string(attribute))),
        )
    }

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///   name    config
    ///            /  \
    ///        pipes  mode
    /// ```
    fn build_tree() -> (DeclarationTree, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DeclarationTree::new();
        let root = tree.insert_root(form_node("root", "Form"));
        let name = tree.insert_child(root, field_node("name")).unwrap();
        let config = tree.insert_child(root, form_node("config", "Configuration")).unwrap();
        let pipes = tree.insert_child(config, field_node("pipes")).unwrap();
        let mode = tree.insert_child(config, field_node("mode")).unwrap();
        (tree, root, name, config, pipes, mode)
    }

    #[test]
    fn insert_root_sets_root() {
        let mut tree = DeclarationTree::new();
        let first = tree.insert_root(form_node("root", "Form"));
        let _second = tree.insert_root(form_node("other", "Other"));
        assert_eq!(tree.root(), Some(first));
    }

    #[test]
    fn parents_and_children() {
        let (tree, root, name, config, pipes, mode) = build_tree();
        assert_eq!(tree.parent(name), Some(root));
        assert_eq!(tree.parent(pipes), Some(config));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), vec![name, config]);
        assert_eq!(tree.children(config), vec![pipes, mode]);
        assert!(tree.children(pipes).is_empty());
        assert_eq!(tree.child(config, "mode"), Some(mode));
        assert_eq!(tree.child(config, "name"), None);
    }

    #[test]
    fn ancestors_and_path() {
        let (tree, root, _name, config, pipes, _mode) = build_tree();
        assert_eq!(tree.ancestors(pipes), vec![config, root]);
        assert!(tree.ancestors(root).is_empty());
        assert_eq!(tree.path(pipes), "config.pipes");
        assert_eq!(tree.path(root), "");
    }

    #[test]
    fn walk_depth_first_in_declaration_order() {
        let (tree, root, name, config, pipes, mode) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, name, config, pipes, mode]);
        assert_eq!(tree.walk_depth_first(config), vec![config, pipes, mode]);
    }

    #[test]
    fn missing_parent_is_an_error() {
        let (mut tree, ..) = build_tree();
        let err = tree.insert_child(NodeId::default(), field_node("x")).unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingParent {
                attribute: "x".into()
            }
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn duplicate_attribute_is_an_error() {
        let (mut tree, root, ..) = build_tree();
        let err = tree.insert_child(root, field_node("name")).unwrap_err();
        assert_eq!(
            err,
            StructuralError::DuplicateAttribute {
                form: "root".into(),
                attribute: "name".into()
            }
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn set_elements_and_lookup() {
        let (mut tree, _root, name, config, ..) = build_tree();
        assert!(tree.get(config).unwrap().is_container());
        assert!(tree.get(name).unwrap().field().is_some());
        assert_eq!(tree.get(name).unwrap().elements(), NodeElements::Unbound);
        assert_eq!(tree.get(config).unwrap().form().unwrap().title(), "Configuration");
        assert!(tree.set_elements(name, NodeElements::Unbound).is_ok());
        assert_eq!(tree.get_mut(name).unwrap().attribute(), "name");
    }
}
