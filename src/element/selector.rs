//! Selector element: a dropdown over the display items of an enumerable range.
//!
//! The first item is selected on creation. A read-only selector is disabled and
//! refuses user selection; programmatic writes still go through.

use std::fmt;

use super::input::READ_ONLY;
use super::InputState;
use crate::config::NumberLocale;
use crate::field::{DynValidator, ValidationOutcome, Value};

/// A dropdown control bound to a validator.
pub struct Selector {
    items: Vec<String>,
    index: Option<usize>,
    validator: Box<dyn DynValidator>,
    enabled: bool,
    state: InputState,
}

impl Selector {
    pub fn new(validator: Box<dyn DynValidator>) -> Self {
        let items = validator.display_items();
        let index = (!items.is_empty()).then_some(0);
        Self {
            items,
            index,
            validator,
            enabled: true,
            state: InputState::Unbound,
        }
    }

    /// Disable user selection (builder pattern).
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.enabled = !read_only;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Display text of the selected item, empty when nothing is selected.
    pub fn text(&self) -> &str {
        self.index
            .and_then(|i| self.items.get(i))
            .map_or("", String::as_str)
    }

    /// Converted value of the selected item.
    pub fn converted(&self) -> Option<Value> {
        self.index.and(self.validator.convert(self.text()))
    }

    /// User selection by index.
    pub fn select(&mut self, index: usize) -> ValidationOutcome<Value> {
        if !self.enabled {
            return self.refuse(READ_ONLY);
        }
        if index >= self.items.len() {
            return self.refuse("no item at this index");
        }
        self.index = Some(index);
        self.revalidate()
    }

    /// User selection by display text.
    pub fn choose(&mut self, text: &str) -> ValidationOutcome<Value> {
        match self.items.iter().position(|item| item == text) {
            Some(index) => self.select(index),
            None if !self.enabled => self.refuse(READ_ONLY),
            None => self.refuse("not a selectable item"),
        }
    }

    /// Programmatic write: select the item displayed as `value`, else the item
    /// converting to `value`, else clear the selection.
    pub(crate) fn set_value(&mut self, value: &Value, locale: NumberLocale) {
        let display = value.to_display(locale);
        self.index = self.items.iter().position(|item| *item == display).or_else(|| {
            self.items
                .iter()
                .position(|item| self.validator.convert(item).as_ref() == Some(value))
        });
        self.state = InputState::Unbound;
    }

    pub(crate) fn clear(&mut self) {
        self.index = None;
        self.state = InputState::Unbound;
    }

    fn revalidate(&mut self) -> ValidationOutcome<Value> {
        let outcome = self.validator.check(self.text());
        self.state = outcome.validity().into();
        outcome
    }

    fn refuse(&self, reason: &str) -> ValidationOutcome<Value> {
        ValidationOutcome::Rejected {
            corrected: self.text().to_owned(),
            reason: reason.to_owned(),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("items", &self.items)
            .field("index", &self.index)
            .field("enabled", &self.enabled)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
