//! FieldDeclaration: how one attribute of a form is typed, labelled and edited.
//!
//! A declaration is static schema data. It owns a validator factory that
//! captures the field's own range by value, so every built form gets fresh
//! validators and no range is ever shared between declarations.

use std::fmt;
use std::sync::Arc;

use super::range::{AnyRange, FloatRange, IntRange, Range};
use super::validator::{
    ChoiceValidator, DynValidator, FloatValidator, IntegerValidator, StringValidator,
};
use super::value::Value;
use crate::config::FormConfig;
use crate::config::NumberLocale;
use crate::element::{Element, ElementId, ElementStore, Label, Selector, TextInput};
use crate::error::{StructuralError, UnitError};
use crate::tree::FieldElements;
use crate::units::{QuantityType, Unit, UnitKey};

/// Builds the validator bound to a field's control.
pub type ValidatorFactory = Arc<dyn Fn(NumberLocale) -> Box<dyn DynValidator> + Send + Sync>;

/// The value type a field reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Choice,
}

/// The control a field is edited through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TextInput,
    Selector,
}

/// The unit a numeric field's value is expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSuffix {
    quantity: QuantityType,
    unit: Unit,
}

impl UnitSuffix {
    pub fn quantity(&self) -> &QuantityType {
        &self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }
}

// ---------------------------------------------------------------------------
// FieldDeclaration
// ---------------------------------------------------------------------------

/// A typed, labelled field of a form schema.
#[derive(Clone)]
pub struct FieldDeclaration {
    label: String,
    kind: FieldKind,
    control: ControlKind,
    read_only: bool,
    unit: Option<UnitSuffix>,
    factory: ValidatorFactory,
}

impl FieldDeclaration {
    fn new(
        label: impl Into<String>,
        kind: FieldKind,
        control: ControlKind,
        factory: ValidatorFactory,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            control,
            read_only: false,
            unit: None,
            factory,
        }
    }

    /// Free text.
    pub fn string(label: impl Into<String>) -> Self {
        Self::string_in(label, AnyRange)
    }

    /// Text validated against (and completed from) a string range.
    pub fn string_in<R>(label: impl Into<String>, range: R) -> Self
    where
        R: Range<Raw = String, Converted = String> + Clone + Send + Sync + 'static,
    {
        let factory = validator_factory(move |_| {
            Box::new(StringValidator::new(range.clone()))
        });
        Self::new(label, FieldKind::String, ControlKind::TextInput, factory)
    }

    /// An unbounded whole number.
    pub fn integer(label: impl Into<String>) -> Self {
        Self::integer_in(label, IntRange::unbounded())
    }

    /// A whole number within `range`.
    pub fn integer_in(label: impl Into<String>, range: IntRange) -> Self {
        let factory = validator_factory(move |locale| {
            Box::new(IntegerValidator::new(range, locale))
        });
        Self::new(label, FieldKind::Integer, ControlKind::TextInput, factory)
    }

    /// An unbounded decimal number.
    pub fn float(label: impl Into<String>) -> Self {
        Self::float_in(label, FloatRange::unbounded())
    }

    /// A decimal number within `range`.
    pub fn float_in(label: impl Into<String>, range: FloatRange) -> Self {
        let factory = validator_factory(move |locale| {
            Box::new(FloatValidator::new(range, locale))
        });
        Self::new(label, FieldKind::Float, ControlKind::TextInput, factory)
    }

    /// One item of an enumerable range, picked from a selector.
    pub fn choice<R>(label: impl Into<String>, range: R) -> Self
    where
        R: Range<Raw = String> + Clone + Send + Sync + 'static,
        R::Converted: Into<Value>,
    {
        let factory = validator_factory(move |_| {
            Box::new(ChoiceValidator::new(range.clone()))
        });
        Self::new(label, FieldKind::Choice, ControlKind::Selector, factory)
    }

    /// Refuse user edits (builder pattern).
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Express the value in `unit` of `quantity`, shown as a suffix label.
    pub fn with_unit<'a>(
        mut self,
        quantity: &QuantityType,
        unit: impl Into<UnitKey<'a>>,
    ) -> Result<Self, UnitError> {
        let unit = quantity.get(unit)?.clone();
        self.unit = Some(UnitSuffix {
            quantity: quantity.clone(),
            unit,
        });
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn control(&self) -> ControlKind {
        self.control
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn unit(&self) -> Option<&UnitSuffix> {
        self.unit.as_ref()
    }

    /// A fresh validator for this field.
    pub fn validator(&self, locale: NumberLocale) -> Box<dyn DynValidator> {
        (self.factory)(locale)
    }

    /// Materialize the label, control and optional unit suffix under `parent`.
    pub fn create_elements(
        &self,
        attribute: &str,
        parent: Option<ElementId>,
        store: &mut ElementStore,
        config: &FormConfig,
    ) -> Result<FieldElements, StructuralError> {
        let Some(parent) = parent.filter(|&group| store.contains(group)) else {
            return Err(StructuralError::MissingParent {
                attribute: attribute.to_owned(),
            });
        };

        let label = Label::new(format!("{}:", self.label));
        let label = store.insert(Element::Label(label), Some(parent));
        let validator = self.validator(config.locale);
        let control = match self.control {
            ControlKind::TextInput => Element::Input(
                TextInput::new(validator)
                    .read_only(self.read_only)
                    .with_completion(config.completion),
            ),
            ControlKind::Selector => {
                Element::Selector(Selector::new(validator).read_only(self.read_only))
            }
        };
        let control = store.insert(control, Some(parent));
        let suffix = self.unit.as_ref().map(|suffix| {
            let label = Label::new(suffix.unit.name());
            store.insert(Element::Label(label), Some(parent))
        });

        tracing::trace!(attribute, label = %self.label, kind = ?self.kind, "materialized field");
        Ok(FieldElements {
            label,
            control,
            suffix,
        })
    }
}

fn validator_factory<F>(factory: F) -> ValidatorFactory
where
    F: Fn(NumberLocale) -> Box<dyn DynValidator> + Send + Sync + 'static,
{
    Arc::new(factory)
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("control", &self.control)
            .field("read_only", &self.read_only)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::GroupBox;
    use crate::field::range::{ListRange, MappedRange};
    use crate::units::PRESSURE;

    fn store_with_group() -> (ElementStore, ElementId) {
        let mut store = ElementStore::new();
        let group = store.insert(Element::Group(GroupBox::new("Form")), None);
        (store, group)
    }

    fn config() -> FormConfig {
        FormConfig::new().with_locale(NumberLocale::POINT)
    }

    #[test]
    fn constructors_set_kind_and_control() {
        assert_eq!(FieldDeclaration::string("Name").kind(), FieldKind::String);
        assert_eq!(FieldDeclaration::integer("Pipes").kind(), FieldKind::Integer);
        assert_eq!(FieldDeclaration::float("Price").kind(), FieldKind::Float);
        let choice = FieldDeclaration::choice("Level", ListRange::new(["a", "b"]));
        assert_eq!(choice.kind(), FieldKind::Choice);
        assert_eq!(choice.control(), ControlKind::Selector);
        assert_eq!(FieldDeclaration::string("x").control(), ControlKind::TextInput);
        assert!(!FieldDeclaration::string("x").is_read_only());
        assert!(FieldDeclaration::string("x").read_only(true).is_read_only());
    }

    #[test]
    fn validators_capture_their_own_range() {
        let small = FieldDeclaration::integer_in("Small", IntRange::between(0, 5));
        let large = FieldDeclaration::integer_in("Large", IntRange::between(100, 200));
        assert!(small.validator(NumberLocale::POINT).check("3").is_accepted());
        assert!(!large.validator(NumberLocale::POINT).check("3").is_accepted());
        assert!(large.validator(NumberLocale::POINT).check("150").is_accepted());
    }

    #[test]
    fn validator_follows_locale() {
        let price = FieldDeclaration::float("Price");
        assert_eq!(
            price.validator(NumberLocale::COMMA).convert("2,5"),
            Some(Value::Float(2.5))
        );
        assert_eq!(price.validator(NumberLocale::POINT).convert("2,5"), None);
    }

    #[test]
    fn create_elements_requires_parent() {
        let mut store = ElementStore::new();
        let err = FieldDeclaration::string("Name")
            .create_elements("name", None, &mut store, &config())
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingParent {
                attribute: "name".into()
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn create_elements_text_input() {
        let (mut store, group) = store_with_group();
        let elements = FieldDeclaration::string("Name")
            .create_elements("name", Some(group), &mut store, &config())
            .unwrap();
        assert_eq!(store.get(elements.label).and_then(Element::text), Some("Name:"));
        assert!(store.get(elements.control).and_then(Element::as_input).is_some());
        assert_eq!(elements.suffix, None);
        assert_eq!(store.parent(elements.control), Some(group));
    }

    #[test]
    fn create_elements_selector_read_only() {
        let (mut store, group) = store_with_group();
        let decl = FieldDeclaration::choice(
            "Level",
            MappedRange::new([("Low", Value::Integer(1)), ("High", Value::Integer(2))]),
        )
        .read_only(true);
        let elements = decl.create_elements("level", Some(group), &mut store, &config()).unwrap();
        let selector = store.get(elements.control).and_then(Element::as_selector).unwrap();
        assert!(!selector.is_enabled());
        assert_eq!(selector.items(), &["Low".to_owned(), "High".to_owned()]);
    }

    #[test]
    fn unit_suffix_label() {
        let (mut store, group) = store_with_group();
        let decl = FieldDeclaration::float("Pressure")
            .with_unit(&PRESSURE, "bar(g)")
            .unwrap();
        assert_eq!(decl.unit().map(|u| u.unit().name()), Some("bar(g)"));
        let elements = decl.create_elements("p", Some(group), &mut store, &config()).unwrap();
        let suffix = elements.suffix.unwrap();
        assert_eq!(store.get(suffix).and_then(Element::text), Some("bar(g)"));
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let err = FieldDeclaration::float("Pressure")
            .with_unit(&PRESSURE, "psi")
            .unwrap_err();
        assert_eq!(err.to_string(), "psi is not a valid unit of Pressure");
    }
}
