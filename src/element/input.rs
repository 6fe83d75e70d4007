//! TextInput element: a free-text control with live validation.
//!
//! Every user edit (replacing the text, typing, deleting) re-runs the bound
//! validator and updates the feedback state. Programmatic writes through
//! [`TextInput::set_text`] skip validation and reset the state to
//! [`InputState::Unbound`]. Read-only inputs reject every user edit and keep
//! their text.
//!
//! The cursor position is tracked as a byte offset into the text. All cursor
//! operations are char-boundary safe.

use std::fmt;

use super::InputState;
use crate::field::{DynValidator, ValidationOutcome, Value};

/// Reason attached to edits refused by a read-only control.
pub const READ_ONLY: &str = "read-only";

// ---------------------------------------------------------------------------
// Keystroke
// ---------------------------------------------------------------------------

/// A single editing key delivered to a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// A text control bound to a validator.
pub struct TextInput {
    text: String,
    cursor_position: usize,
    validator: Box<dyn DynValidator>,
    read_only: bool,
    completion: bool,
    state: InputState,
}

impl TextInput {
    /// Create an empty, editable input with completion enabled.
    pub fn new(validator: Box<dyn DynValidator>) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
            validator,
            read_only: false,
            completion: true,
            state: InputState::Unbound,
        }
    }

    /// Set the initial text without validating (builder pattern).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cursor_position = self.text.len();
        self
    }

    /// Refuse all user edits (builder pattern).
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Enable or disable the completion list (builder pattern).
    pub fn with_completion(mut self, completion: bool) -> Self {
        self.completion = completion;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Return the cursor position (byte offset).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Converted value of the current text, without a range-membership check.
    pub fn converted(&self) -> Option<Value> {
        self.validator.convert(&self.text)
    }

    /// Programmatic write: replace the text without validating.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_position = self.text.len();
        self.state = InputState::Unbound;
    }

    /// User edit: replace the whole text and validate it.
    pub fn edit(&mut self, text: &str) -> ValidationOutcome<Value> {
        if self.read_only {
            return self.refuse();
        }
        self.text = text.to_owned();
        self.cursor_position = self.text.len();
        self.revalidate()
    }

    /// Insert a character at the cursor and validate.
    pub fn insert_char(&mut self, ch: char) -> ValidationOutcome<Value> {
        if self.read_only {
            return self.refuse();
        }
        self.text.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
        self.revalidate()
    }

    /// Delete the character before the cursor (backspace) and validate.
    pub fn delete_char(&mut self) -> ValidationOutcome<Value> {
        if self.read_only {
            return self.refuse();
        }
        if self.cursor_position > 0 {
            let prev = self.prev_char_boundary();
            self.text.drain(prev..self.cursor_position);
            self.cursor_position = prev;
        }
        self.revalidate()
    }

    /// Delete the character after the cursor and validate.
    pub fn delete_forward(&mut self) -> ValidationOutcome<Value> {
        if self.read_only {
            return self.refuse();
        }
        if self.cursor_position < self.text.len() {
            let next = self.next_char_boundary();
            self.text.drain(self.cursor_position..next);
        }
        self.revalidate()
    }

    /// Apply a keystroke. Cursor movement yields no outcome.
    pub fn apply(&mut self, key: Keystroke) -> Option<ValidationOutcome<Value>> {
        match key {
            Keystroke::Char(ch) => Some(self.insert_char(ch)),
            Keystroke::Backspace => Some(self.delete_char()),
            Keystroke::Delete => Some(self.delete_forward()),
            Keystroke::Left => {
                self.move_cursor_left();
                None
            }
            Keystroke::Right => {
                self.move_cursor_right();
                None
            }
            Keystroke::Home => {
                self.cursor_position = 0;
                None
            }
            Keystroke::End => {
                self.cursor_position = self.text.len();
                None
            }
        }
    }

    /// Validate the current text and update the feedback state.
    pub fn revalidate(&mut self) -> ValidationOutcome<Value> {
        let outcome = self.validator.check(&self.text);
        self.state = outcome.validity().into();
        outcome
    }

    /// Range items matching the current text, case-insensitively.
    ///
    /// Empty text lists every item. Inputs over non-enumerable ranges, or with
    /// completion disabled, never complete.
    pub fn completions(&self) -> Vec<String> {
        if !self.completion || !self.validator.is_enumerable() {
            return Vec::new();
        }
        let needle = self.text.to_lowercase();
        self.validator
            .display_items()
            .into_iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.prev_char_boundary();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.len() {
            self.cursor_position = self.next_char_boundary();
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn refuse(&self) -> ValidationOutcome<Value> {
        ValidationOutcome::Rejected {
            corrected: self.text.clone(),
            reason: READ_ONLY.to_owned(),
        }
    }

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position.saturating_sub(1);
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position + 1;
        while pos < self.text.len() && !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("text", &self.text)
            .field("cursor_position", &self.cursor_position)
            .field("read_only", &self.read_only)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
