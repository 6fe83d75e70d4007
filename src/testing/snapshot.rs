//! Snapshot helpers.
//!
//! Render a form's declaration tree and control states as plain text, suitable
//! for `insta` snapshots and assertions.

use crate::element::Element;
use crate::form::Form;
use crate::tree::{DeclarationNode, NodeElements};

/// Render the whole form as indented text.
///
/// One line per node, two spaces of indentation per nesting level:
///
/// ```text
/// [Test form]
/// name: "X" (valid)
/// pressure: "1.5" (unbound) bar(a)
/// config [Configuration]
///   level: <High> (valid) read-only
/// ```
///
/// Text inputs show their quoted text, selectors the selected item in angle
/// brackets; then the feedback state, the unit suffix and a read-only marker.
pub fn tree_to_string(form: &Form) -> String {
    let tree = form.tree();
    let Some(root) = tree.root() else {
        return String::new();
    };
    let mut out = format!("[{}]", form.title());
    if let Some(title) = form
        .root_group()
        .ok()
        .and_then(|group| form.element(group))
        .and_then(Element::as_group)
        .and_then(|group| group.window_title())
    {
        out.push_str(&format!(" window={title:?}"));
    }

    for id in tree.walk_depth_first(root).into_iter().skip(1) {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let depth = tree.ancestors(id).len() - 1;
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
        out.push_str(node.attribute());
        out.push_str(&describe(form, node));
    }
    out
}

fn describe(form: &Form, node: &DeclarationNode) -> String {
    match node.elements() {
        NodeElements::Group(_) => {
            let title = node.form().map_or("", |form| form.title());
            format!(" [{title}]")
        }
        NodeElements::Field(elements) => {
            let mut line = match form.element(elements.control) {
                Some(Element::Input(input)) => format!(": {:?} ({})", input.text(), input.state()),
                Some(Element::Selector(selector)) => {
                    format!(": <{}> ({})", selector.text(), selector.state())
                }
                _ => ": ?".to_owned(),
            };
            if node.field().is_some_and(|field| field.is_read_only()) {
                line.push_str(" read-only");
            }
            if let Some(suffix) = elements
                .suffix
                .and_then(|suffix| form.element(suffix))
                .and_then(Element::text)
            {
                line.push_str(&format!(" {suffix}"));
            }
            line
        }
        NodeElements::Unbound => ": <unbound>".to_owned(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
