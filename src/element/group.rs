//! GroupBox element: a titled container hosting a grid of child elements.
//!
//! Each row of the grid holds the elements of one declared attribute, in
//! declaration order: `[label, control(, unit)]` for fields, `[group]` for
//! nested forms.

use super::ElementId;

/// A titled grouping container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBox {
    title: String,
    window_title: Option<String>,
    rows: Vec<Vec<ElementId>>,
}

impl GroupBox {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window_title: None,
            rows: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title of the window hosting this group, when it is shown top-level.
    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    pub(crate) fn set_window_title(&mut self, title: impl Into<String>) {
        self.window_title = Some(title.into());
    }

    /// Append a grid row, returning its index.
    pub(crate) fn push_row(&mut self, row: Vec<ElementId>) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[Vec<ElementId>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
