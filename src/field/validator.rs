//! Validators: parse raw text, check range membership, map to converted values.
//!
//! Each validator is bound to a [`Range`]. [`Validator::validate`] chains
//! parse → range membership → a tri-state [`ValidationOutcome`];
//! [`Validator::converted`] is the narrower parse → map operation used when a
//! field value is read. [`DynValidator`] erases the raw/converted types to
//! [`Value`] so heterogeneous fields can live in one element tree.

use super::range::{AnyRange, FloatRange, IntRange, Range};
use super::value::Value;
use crate::config::NumberLocale;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why text is not (yet) an acceptable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Incomplete {
    /// The text does not parse for the field's type.
    Unparsed,
    /// The text parses but lies outside the field's range.
    OutOfRange,
}

/// Coarse validity, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    Valid,
    Intermediate,
    Invalid,
}

/// Tri-state result of validating raw text.
///
/// Every state carries the (possibly corrected) display text.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<T> {
    /// Parses and lies in range; carries the parsed, pre-conversion value.
    Accepted { value: T, corrected: String },
    /// Could become valid with further edits. Never an error.
    Intermediate { corrected: String, reason: Incomplete },
    /// Explicitly invalidated. Built-in validators never produce this.
    Rejected { corrected: String, reason: String },
}

impl<T> ValidationOutcome<T> {
    /// The display text to show for this outcome.
    pub fn corrected(&self) -> &str {
        match self {
            Self::Accepted { corrected, .. }
            | Self::Intermediate { corrected, .. }
            | Self::Rejected { corrected, .. } => corrected,
        }
    }

    pub fn validity(&self) -> Validity {
        match self {
            Self::Accepted { .. } => Validity::Valid,
            Self::Intermediate { .. } => Validity::Intermediate,
            Self::Rejected { .. } => Validity::Invalid,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The accepted value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Accepted { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Map the accepted value, keeping the state and display text.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationOutcome<U> {
        match self {
            Self::Accepted { value, corrected } => ValidationOutcome::Accepted {
                value: f(value),
                corrected,
            },
            Self::Intermediate { corrected, reason } => {
                ValidationOutcome::Intermediate { corrected, reason }
            }
            Self::Rejected { corrected, reason } => {
                ValidationOutcome::Rejected { corrected, reason }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validator trait
// ---------------------------------------------------------------------------

/// Raw value type of a validator's range.
pub type RawOf<V> = <<V as Validator>::Range as Range>::Raw;
/// Converted value type of a validator's range.
pub type ConvertedOf<V> = <<V as Validator>::Range as Range>::Converted;

/// Parses text into a raw value and maps it through its bound range.
pub trait Validator {
    type Range: Range;

    /// The range this validator checks against.
    fn range(&self) -> &Self::Range;

    /// Parse display text. Malformed text yields `None`, never a panic.
    fn parse(&self, text: &str) -> Option<RawOf<Self>>;

    fn in_range(&self, raw: &RawOf<Self>) -> bool {
        self.range().contains(raw)
    }

    /// Map a parsed value to its converted value.
    fn map_to_range(&self, raw: RawOf<Self>) -> Option<ConvertedOf<Self>> {
        self.range().to_converted(raw)
    }

    /// Parse, check range membership, and classify.
    fn validate(&self, text: &str) -> ValidationOutcome<RawOf<Self>> {
        let corrected = text.to_owned();
        let Some(raw) = self.parse(text) else {
            return ValidationOutcome::Intermediate {
                corrected,
                reason: Incomplete::Unparsed,
            };
        };
        if !self.in_range(&raw) {
            return ValidationOutcome::Intermediate {
                corrected,
                reason: Incomplete::OutOfRange,
            };
        }
        ValidationOutcome::Accepted {
            value: raw,
            corrected,
        }
    }

    /// Parse and map, without checking range membership.
    fn converted(&self, text: &str) -> Option<ConvertedOf<Self>> {
        self.parse(text).and_then(|raw| self.map_to_range(raw))
    }
}

// ---------------------------------------------------------------------------
// StringValidator
// ---------------------------------------------------------------------------

/// Accepts any text as-is; membership is decided by the range.
#[derive(Debug, Clone, Default)]
pub struct StringValidator<R = AnyRange> {
    range: R,
}

impl<R> StringValidator<R> {
    pub fn new(range: R) -> Self {
        Self { range }
    }
}

impl<R: Range<Raw = String>> Validator for StringValidator<R> {
    type Range = R;

    fn range(&self) -> &R {
        &self.range
    }

    fn parse(&self, text: &str) -> Option<String> {
        Some(text.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Numeric validators
// ---------------------------------------------------------------------------

/// Parses whole numbers. Text containing either decimal separator is rejected early.
#[derive(Debug, Clone)]
pub struct IntegerValidator {
    range: IntRange,
    locale: NumberLocale,
}

impl IntegerValidator {
    pub fn new(range: IntRange, locale: NumberLocale) -> Self {
        Self { range, locale }
    }
}

impl Validator for IntegerValidator {
    type Range = IntRange;

    fn range(&self) -> &IntRange {
        &self.range
    }

    fn parse(&self, text: &str) -> Option<i64> {
        if text.contains(self.locale.decimal()) || text.contains(self.locale.alternate()) {
            return None;
        }
        text.trim().parse().ok()
    }
}

/// Parses decimal numbers written with the locale's separator.
#[derive(Debug, Clone)]
pub struct FloatValidator {
    range: FloatRange,
    locale: NumberLocale,
}

impl FloatValidator {
    pub fn new(range: FloatRange, locale: NumberLocale) -> Self {
        Self { range, locale }
    }
}

impl Validator for FloatValidator {
    type Range = FloatRange;

    fn range(&self) -> &FloatRange {
        &self.range
    }

    fn parse(&self, text: &str) -> Option<f64> {
        if text.contains(self.locale.alternate()) {
            return None;
        }
        self.locale.normalize(text).parse().ok()
    }
}

// ---------------------------------------------------------------------------
// ChoiceValidator
// ---------------------------------------------------------------------------

/// Accepts exactly the members of an enumerable range.
#[derive(Debug, Clone)]
pub struct ChoiceValidator<R> {
    range: R,
}

impl<R> ChoiceValidator<R> {
    pub fn new(range: R) -> Self {
        Self { range }
    }
}

impl<R: Range<Raw = String>> Validator for ChoiceValidator<R> {
    type Range = R;

    fn range(&self) -> &R {
        &self.range
    }

    fn parse(&self, text: &str) -> Option<String> {
        let raw = text.to_owned();
        self.range.contains(&raw).then_some(raw)
    }
}

// ---------------------------------------------------------------------------
// DynValidator
// ---------------------------------------------------------------------------

/// Object-safe validator over [`Value`]s, bound into input elements.
pub trait DynValidator {
    /// Full tri-state validation.
    fn check(&self, text: &str) -> ValidationOutcome<Value>;

    /// The converted value of `text`, if it parses.
    fn convert(&self, text: &str) -> Option<Value>;

    /// Display items of the bound range.
    fn display_items(&self) -> Vec<String>;

    /// Whether the bound range is enumerable.
    fn is_enumerable(&self) -> bool;
}

impl<V> DynValidator for V
where
    V: Validator,
    RawOf<V>: Into<Value>,
    ConvertedOf<V>: Into<Value>,
{
    fn check(&self, text: &str) -> ValidationOutcome<Value> {
        self.validate(text).map(Into::into)
    }

    fn convert(&self, text: &str) -> Option<Value> {
        self.converted(text).map(Into::into)
    }

    fn display_items(&self) -> Vec<String> {
        self.range().display_items()
    }

    fn is_enumerable(&self) -> bool {
        self.range().is_enumerable()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
