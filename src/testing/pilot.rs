//! FormPilot: programmatic interaction with a built form.
//!
//! The pilot addresses fields by dotted path (`"config.pipes"`), simulates user
//! input through the same entry points an adapter uses, and records every
//! [`FormEvent`] the form emits.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::element::{InputState, Keystroke};
use crate::error::StructuralError;
use crate::event::FormEvent;
use crate::field::Value;
use crate::form::{Edit, Form, FormSchema};

// ---------------------------------------------------------------------------
// FormPilot
// ---------------------------------------------------------------------------

/// A headless form driver for testing.
///
/// # Examples
///
/// ```ignore
/// use declform::testing::FormPilot;
///
/// let mut pilot = FormPilot::build(&schema, "Test form")?;
/// pilot.type_text("config.pipes", "12")?;
/// assert_eq!(pilot.value("config.pipes")?, Some(Value::Integer(12)));
/// ```
pub struct FormPilot {
    form: Form,
    events: Vec<FormEvent>,
}

impl FormPilot {
    /// Wrap a built form, recording the events it has queued so far.
    pub fn new(mut form: Form) -> Self {
        let events = form.drain_events();
        Self { form, events }
    }

    /// Build `schema` with the default configuration.
    pub fn build(schema: &Arc<FormSchema>, title: &str) -> Result<Self, StructuralError> {
        Ok(Self::new(Form::build(schema, title)?))
    }

    /// Build `schema` with an explicit configuration.
    pub fn with_config(
        schema: &Arc<FormSchema>,
        title: &str,
        config: FormConfig,
    ) -> Result<Self, StructuralError> {
        Ok(Self::new(Form::build_with(schema, title, config)?))
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate one key press in the text input at `path`.
    pub fn press(&mut self, path: &str, key: Keystroke) -> Result<Option<Edit>, StructuralError> {
        let control = self.form.control_at(path)?;
        let edit = self.form.keystroke(control, key)?;
        self.process();
        Ok(edit)
    }

    /// Type each character of `text` at the end of the input at `path`.
    ///
    /// Returns one edit per character.
    pub fn type_text(&mut self, path: &str, text: &str) -> Result<Vec<Edit>, StructuralError> {
        self.press(path, Keystroke::End)?;
        let mut edits = Vec::with_capacity(text.len());
        for ch in text.chars() {
            edits.extend(self.press(path, Keystroke::Char(ch))?);
        }
        Ok(edits)
    }

    /// Replace the whole text of the control at `path`.
    pub fn replace(&mut self, path: &str, text: &str) -> Result<Edit, StructuralError> {
        let control = self.form.control_at(path)?;
        let edit = self.form.edit_element(control, text)?;
        self.process();
        Ok(edit)
    }

    /// Clear the text input at `path`.
    pub fn clear(&mut self, path: &str) -> Result<Edit, StructuralError> {
        self.replace(path, "")
    }

    /// Pick item `index` of the selector at `path`.
    pub fn select(&mut self, path: &str, index: usize) -> Result<Edit, StructuralError> {
        let control = self.form.control_at(path)?;
        let edit = self.form.select_element(control, index)?;
        self.process();
        Ok(edit)
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Move pending form events into the pilot's log.
    pub fn process(&mut self) {
        self.events.extend(self.form.drain_events());
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[FormEvent] {
        &self.events
    }

    /// Take and clear the recorded events.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of `Changed` events recorded (notifications that reached the root).
    pub fn changes(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, FormEvent::Changed { .. }))
            .count()
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Converted value of the field at `path`.
    pub fn value(&self, path: &str) -> Result<Option<Value>, StructuralError> {
        let control = self.form.control_at(path)?;
        Ok(self.form.element(control).and_then(|element| element.converted()))
    }

    /// Display text of the control at `path`.
    pub fn text(&self, path: &str) -> Result<&str, StructuralError> {
        let control = self.form.control_at(path)?;
        Ok(self
            .form
            .element(control)
            .and_then(|element| element.text())
            .unwrap_or_default())
    }

    /// Feedback state of the control at `path`.
    pub fn state(&self, path: &str) -> Result<InputState, StructuralError> {
        let control = self.form.control_at(path)?;
        Ok(self
            .form
            .element(control)
            .and_then(|element| element.state())
            .unwrap_or_default())
    }

    /// The tree dump of [`tree_to_string`](super::snapshot::tree_to_string).
    pub fn snapshot(&self) -> String {
        super::snapshot::tree_to_string(&self.form)
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumberLocale;
    use crate::field::range::{FloatRange, IntRange, MappedRange};
    use crate::field::FieldDeclaration;

    fn pilot() -> FormPilot {
        let config = FormSchema::builder("Config")
            .field("pipes", FieldDeclaration::integer_in("Pipes", IntRange::between(10, 99)))
            .field(
                "level",
                FieldDeclaration::choice(
                    "Level",
                    MappedRange::new([("Low", Value::Integer(1)), ("High", Value::Integer(10))]),
                ),
            )
            .build()
            .unwrap();
        let schema = FormSchema::builder("TestForm")
            .field("price", FieldDeclaration::float_in("Price", FloatRange::at_least(0.0)))
            .field("id", FieldDeclaration::string("Id").read_only(true))
            .form("config", "Configuration", &config)
            .build()
            .unwrap();
        FormPilot::with_config(
            &schema,
            "Test form",
            FormConfig::new().with_locale(NumberLocale::COMMA),
        )
        .unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn records_mount_events() {
        let pilot = pilot();
        assert_eq!(pilot.events().len(), pilot.form().elements().len());
        assert_eq!(pilot.changes(), 0);
    }

    // ── Typing ───────────────────────────────────────────────────────

    #[test]
    fn type_text_validates_each_keystroke() {
        let mut pilot = pilot();
        pilot.take_events();
        let edits = pilot.type_text("config.pipes", "42").unwrap();
        assert_eq!(edits.len(), 2);
        assert_eq!(pilot.state("config.pipes").unwrap(), InputState::Valid);
        assert!(!edits[0].is_accepted());
        assert!(edits[1].is_accepted());
        // Both keystrokes bubble, even the intermediate one.
        assert_eq!(pilot.changes(), 2);
        assert_eq!(pilot.value("config.pipes").unwrap(), Some(Value::Integer(42)));
    }

    #[test]
    fn typing_with_comma_locale() {
        let mut pilot = pilot();
        pilot.type_text("price", "2,5").unwrap();
        assert_eq!(pilot.value("price").unwrap(), Some(Value::Float(2.5)));
        pilot.press("price", Keystroke::Backspace).unwrap();
        assert_eq!(pilot.text("price").unwrap(), "2,");
        assert_eq!(pilot.state("price").unwrap(), InputState::Valid);
        pilot.clear("price").unwrap();
        assert_eq!(pilot.state("price").unwrap(), InputState::Intermediate);
    }

    #[test]
    fn cursor_keys_do_not_edit() {
        let mut pilot = pilot();
        pilot.take_events();
        assert!(pilot.press("price", Keystroke::Home).unwrap().is_none());
        assert!(pilot.events().is_empty());
    }

    #[test]
    fn read_only_field_refuses_typing() {
        let mut pilot = pilot();
        pilot.take_events();
        let edits = pilot.type_text("id", "abc").unwrap();
        assert!(edits.iter().all(|edit| edit.propagation.is_none()));
        assert_eq!(pilot.text("id").unwrap(), "");
        assert!(pilot.events().is_empty());
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn select_item() {
        let mut pilot = pilot();
        let edit = pilot.select("config.level", 1).unwrap();
        assert!(edit.propagation.is_some_and(|p| p.reached_root()));
        assert_eq!(pilot.value("config.level").unwrap(), Some(Value::Integer(10)));
        assert_eq!(pilot.text("config.level").unwrap(), "High");
    }

    #[test]
    fn unknown_path() {
        let mut pilot = pilot();
        assert!(matches!(
            pilot.replace("config.weight", "1"),
            Err(StructuralError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            pilot.replace("price.x", "1"),
            Err(StructuralError::NotAContainer { .. })
        ));
        assert!(matches!(
            pilot.replace("config", "1"),
            Err(StructuralError::NotAField { .. })
        ));
    }

    #[test]
    fn snapshot_reflects_edits() {
        let mut pilot = pilot();
        pilot.replace("price", "1,5").unwrap();
        assert!(pilot.snapshot().contains("price: \"1,5\" (valid)"));
        let form = pilot.into_form();
        assert_eq!(form.root().unwrap().get("price").unwrap(), Some(Value::Float(1.5)));
    }
}
