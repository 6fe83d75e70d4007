//! Ranges: the set of legal raw values for a field.
//!
//! A range answers membership for raw (parsed) values and, when it is
//! enumerable, supplies the ordered display items a selector or completer shows
//! and the mapping from a chosen item to its converted value.

use indexmap::IndexMap;

use super::value::Value;

// ---------------------------------------------------------------------------
// Range trait
// ---------------------------------------------------------------------------

/// Legality of raw values and, for enumerable ranges, their display items.
pub trait Range {
    /// The parsed value a validator produces.
    type Raw;
    /// The value a field reports after range mapping.
    type Converted;

    /// Whether `raw` is a legal value.
    fn contains(&self, raw: &Self::Raw) -> bool;

    /// Whether the range is a finite list of selectable items.
    fn is_enumerable(&self) -> bool;

    /// Ordered display items. Non-enumerable ranges return a single blank item.
    fn display_items(&self) -> Vec<String>;

    /// Map a raw value to its converted value.
    ///
    /// Returns `None` only for values outside an enumerable range.
    fn to_converted(&self, raw: Self::Raw) -> Option<Self::Converted>;
}

// ---------------------------------------------------------------------------
// AnyRange
// ---------------------------------------------------------------------------

/// Every string is legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyRange;

impl Range for AnyRange {
    type Raw = String;
    type Converted = String;

    fn contains(&self, _raw: &String) -> bool {
        true
    }

    fn is_enumerable(&self) -> bool {
        false
    }

    fn display_items(&self) -> Vec<String> {
        vec![String::new()]
    }

    fn to_converted(&self, raw: String) -> Option<String> {
        Some(raw)
    }
}

// ---------------------------------------------------------------------------
// IntervalRange
// ---------------------------------------------------------------------------

/// A numeric interval with independently inclusive ends.
///
/// A missing bound is unbounded on that side. Both ends are inclusive by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRange<T> {
    low: Option<T>,
    high: Option<T>,
    low_inclusive: bool,
    high_inclusive: bool,
}

/// Interval over integers.
pub type IntRange = IntervalRange<i64>;
/// Interval over floats.
pub type FloatRange = IntervalRange<f64>;

impl<T> IntervalRange<T> {
    /// No bounds at all.
    pub fn unbounded() -> Self {
        Self {
            low: None,
            high: None,
            low_inclusive: true,
            high_inclusive: true,
        }
    }

    /// `low ..= high`.
    pub fn between(low: T, high: T) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
            ..Self::unbounded()
        }
    }

    /// `low ..`.
    pub fn at_least(low: T) -> Self {
        Self {
            low: Some(low),
            ..Self::unbounded()
        }
    }

    /// `..= high`.
    pub fn at_most(high: T) -> Self {
        Self {
            high: Some(high),
            ..Self::unbounded()
        }
    }

    /// Set whether the low bound itself is legal (builder).
    pub fn low_inclusive(mut self, inclusive: bool) -> Self {
        self.low_inclusive = inclusive;
        self
    }

    /// Set whether the high bound itself is legal (builder).
    pub fn high_inclusive(mut self, inclusive: bool) -> Self {
        self.high_inclusive = inclusive;
        self
    }

    pub fn low(&self) -> Option<&T> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&T> {
        self.high.as_ref()
    }
}

impl<T> Default for IntervalRange<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: PartialOrd + Clone> Range for IntervalRange<T> {
    type Raw = T;
    type Converted = T;

    fn contains(&self, x: &T) -> bool {
        // NaN is outside every interval, bounded or not.
        if x.partial_cmp(x).is_none() {
            return false;
        }
        let above_low = self.low.as_ref().is_none_or(|low| low < x);
        let below_high = self.high.as_ref().is_none_or(|high| x < high);
        if above_low && below_high {
            return true;
        }
        if self.low_inclusive && self.low.as_ref() == Some(x) {
            return true;
        }
        self.high_inclusive && self.high.as_ref() == Some(x)
    }

    fn is_enumerable(&self) -> bool {
        false
    }

    fn display_items(&self) -> Vec<String> {
        vec![String::new()]
    }

    fn to_converted(&self, raw: T) -> Option<T> {
        Some(raw)
    }
}

// ---------------------------------------------------------------------------
// ListRange
// ---------------------------------------------------------------------------

/// A fixed, ordered list of legal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRange {
    items: Vec<String>,
}

impl ListRange {
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Range for ListRange {
    type Raw = String;
    type Converted = String;

    fn contains(&self, raw: &String) -> bool {
        self.items.contains(raw)
    }

    fn is_enumerable(&self) -> bool {
        true
    }

    fn display_items(&self) -> Vec<String> {
        self.items.clone()
    }

    fn to_converted(&self, raw: String) -> Option<String> {
        Some(raw)
    }
}

// ---------------------------------------------------------------------------
// MappedRange
// ---------------------------------------------------------------------------

/// Display labels mapped to arbitrary converted values, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRange<C = Value> {
    items: IndexMap<String, C>,
}

impl<C> MappedRange<C> {
    pub fn new(items: impl IntoIterator<Item = (impl Into<String>, C)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }

    /// The label and value at `index` in insertion order.
    pub fn item_at(&self, index: usize) -> Option<(&str, &C)> {
        self.items
            .get_index(index)
            .map(|(label, value)| (label.as_str(), value))
    }

    /// The value for a label.
    pub fn get(&self, label: &str) -> Option<&C> {
        self.items.get(label)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<C: Clone> Range for MappedRange<C> {
    type Raw = String;
    type Converted = C;

    fn contains(&self, raw: &String) -> bool {
        self.items.contains_key(raw)
    }

    fn is_enumerable(&self) -> bool {
        true
    }

    fn display_items(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    fn to_converted(&self, raw: String) -> Option<C> {
        self.items.get(&raw).cloned()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── AnyRange ─────────────────────────────────────────────────────

    #[test]
    fn any_range_accepts_everything() {
        let r = AnyRange;
        assert!(r.contains(&String::new()));
        assert!(r.contains(&"anything".to_owned()));
        assert!(!r.is_enumerable());
        assert_eq!(r.display_items(), vec![String::new()]);
        assert_eq!(r.to_converted("x".into()), Some("x".to_owned()));
    }

    // ── IntervalRange ────────────────────────────────────────────────

    #[test]
    fn interval_inclusive_bounds() {
        let r = FloatRange::between(0.0, 1.0);
        assert!(r.contains(&0.0));
        assert!(r.contains(&1.0));
        assert!(r.contains(&0.5));
        assert!(!r.contains(&-0.001));
        assert!(!r.contains(&1.001));
    }

    #[test]
    fn interval_exclusive_low() {
        let r = FloatRange::between(0.0, 1.0).low_inclusive(false);
        assert!(!r.contains(&0.0));
        assert!(r.contains(&1e-9));
        assert!(r.contains(&1.0));
    }

    #[test]
    fn interval_exclusive_high_compares_against_high() {
        let r = IntRange::between(1, 10).high_inclusive(false);
        assert!(!r.contains(&10));
        assert!(r.contains(&9));

        let inclusive = IntRange::between(1, 10);
        assert!(inclusive.contains(&10));
        // The inclusivity flag is never compared against the value itself.
        assert!(!IntRange::between(-5, 0).contains(&1));
    }

    #[test]
    fn interval_half_open_sides() {
        let r = IntRange::at_least(0);
        assert!(r.contains(&0));
        assert!(r.contains(&i64::MAX));
        assert!(!r.contains(&-1));

        let r = IntRange::at_most(5).high_inclusive(false);
        assert!(r.contains(&i64::MIN));
        assert!(!r.contains(&5));
    }

    #[test]
    fn interval_rejects_nan() {
        assert!(!FloatRange::between(0.0, 1.0).contains(&f64::NAN));
        assert!(!FloatRange::unbounded().contains(&f64::NAN));
        assert!(!FloatRange::default().contains(&f64::NAN));
        assert!(!FloatRange::at_least(0.0).contains(&f64::NAN));
        assert!(!FloatRange::at_most(0.0).contains(&f64::NAN));
        assert!(FloatRange::unbounded().contains(&f64::INFINITY));
    }

    #[test]
    fn interval_is_not_enumerable() {
        let r = IntRange::default();
        assert!(!r.is_enumerable());
        assert_eq!(r.display_items(), vec![String::new()]);
        assert_eq!(r.to_converted(42), Some(42));
        assert_eq!(r.low(), None);
        assert_eq!(IntRange::between(1, 2).high(), Some(&2));
    }

    // ── ListRange ────────────────────────────────────────────────────

    #[test]
    fn list_range_membership_and_items() {
        let items = ["Pro", "Average", "Total failure"];
        let r = ListRange::new(items);
        assert_eq!(r.display_items(), items.to_vec());
        for item in items {
            assert!(r.contains(&item.to_owned()));
        }
        assert!(!r.contains(&"pro".to_owned()));
        assert!(r.is_enumerable());
        assert_eq!(r.len(), 3);
    }

    // ── MappedRange ──────────────────────────────────────────────────

    #[test]
    fn mapped_range_lookup() {
        let r = MappedRange::new([
            ("Low", Value::Integer(1)),
            ("Medium", Value::Integer(5)),
            ("High", Value::Integer(10)),
        ]);
        assert!(r.contains(&"Medium".to_owned()));
        assert!(!r.contains(&"5".to_owned()));
        assert_eq!(r.display_items(), vec!["Low", "Medium", "High"]);
        assert_eq!(r.to_converted("High".into()), Some(Value::Integer(10)));
        assert_eq!(r.to_converted("Missing".into()), None);
        assert_eq!(r.item_at(1), Some(("Medium", &Value::Integer(5))));
        assert_eq!(r.item_at(3), None);
        assert_eq!(r.get("Low"), Some(&Value::Integer(1)));
    }

    #[test]
    fn mapped_range_keeps_insertion_order() {
        let r = MappedRange::new([("z", 1), ("a", 2), ("m", 3)]);
        assert_eq!(r.display_items(), vec!["z", "a", "m"]);
        assert_eq!(r.item_at(0), Some(("z", &1)));
    }
}
