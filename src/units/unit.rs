//! Unit: a named affine map to and from a family's base representation.

/// An immutable unit of measurement.
///
/// `to_base(v) = factor * v + offset` and `from_base(v) = (v - offset) / factor`.
/// The factor must never be zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    factor: f64,
    offset: f64,
}

impl Unit {
    /// A unit identical to the base representation.
    pub fn new(name: impl Into<String>) -> Self {
        Self::affine(name, 1.0, 0.0)
    }

    /// A unit that is a multiple of the base representation.
    pub fn scaled(name: impl Into<String>, factor: f64) -> Self {
        Self::affine(name, factor, 0.0)
    }

    /// A unit with both a factor and an additive offset (e.g. degrees Celsius).
    pub fn affine(name: impl Into<String>, factor: f64, offset: f64) -> Self {
        debug_assert!(factor != 0.0, "unit factor must be non-zero");
        Self {
            name: name.into(),
            factor,
            offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Express `value` (in this unit) in the base representation.
    pub fn to_base(&self, value: f64) -> f64 {
        self.factor * value + self.offset
    }

    /// Express a base value in this unit.
    pub fn from_base(&self, value: f64) -> f64 {
        (value - self.offset) / self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn identity_unit() {
        let u = Unit::new("Pa");
        assert_eq!(u.to_base(3.5), 3.5);
        assert_eq!(u.from_base(3.5), 3.5);
        assert_eq!(u.factor(), 1.0);
        assert_eq!(u.offset(), 0.0);
    }

    #[test]
    fn affine_unit() {
        let gauge = Unit::affine("bar(g)", 100_000.0, 100_000.0);
        assert_eq!(gauge.to_base(1.0), 200_000.0);
        assert_eq!(gauge.from_base(100_000.0), 0.0);
    }

    #[test]
    fn round_trip_holds() {
        let units = [
            Unit::new("K"),
            Unit::affine("\u{2103}", 1.0, 273.15),
            Unit::scaled("mm\u{00B2}", 1e-6),
            Unit::affine("odd", -3.25, 17.0),
        ];
        for u in &units {
            for v in [-1e6, -40.0, -1.5, 0.0, 1e-9, 2.75, 1e12] {
                assert!(close(u.from_base(u.to_base(v)), v), "{} {v}", u.name());
            }
        }
    }
}
