//! QuantityType: a family of compatible units and the built-in families.

use std::fmt;
use std::sync::LazyLock;

use super::unit::Unit;
use crate::error::UnitError;

// ---------------------------------------------------------------------------
// UnitKey
// ---------------------------------------------------------------------------

/// Identifies a unit inside a family, either by name or by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitKey<'a> {
    Name(&'a str),
    Unit(&'a Unit),
}

impl<'a> From<&'a str> for UnitKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for UnitKey<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Unit> for UnitKey<'a> {
    fn from(unit: &'a Unit) -> Self {
        Self::Unit(unit)
    }
}

impl fmt::Display for UnitKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Unit(unit) => f.write_str(unit.name()),
        }
    }
}

// ---------------------------------------------------------------------------
// QuantityType
// ---------------------------------------------------------------------------

/// A named family of units that convert through a common base.
///
/// Unit names are unique within a family.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityType {
    name: String,
    units: Vec<Unit>,
}

impl QuantityType {
    /// Create a family from its units, in order.
    ///
    /// Fails with [`UnitError::DuplicateUnit`] if two units share a name.
    pub fn new(
        name: impl Into<String>,
        units: impl IntoIterator<Item = Unit>,
    ) -> Result<Self, UnitError> {
        let name = name.into();
        let mut collected: Vec<Unit> = Vec::new();
        for unit in units {
            if collected.iter().any(|u| u.name() == unit.name()) {
                return Err(UnitError::DuplicateUnit {
                    quantity: name,
                    unit: unit.name().to_owned(),
                });
            }
            collected.push(unit);
        }
        Ok(Self {
            name,
            units: collected,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The units of this family, in declaration order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Unit names in declaration order (useful as a unit selector's items).
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(Unit::name).collect()
    }

    /// Resolve a unit by name or by value.
    pub fn get<'a>(&self, key: impl Into<UnitKey<'a>>) -> Result<&Unit, UnitError> {
        let key = key.into();
        let found = match key {
            UnitKey::Name(name) => self.units.iter().find(|u| u.name() == name),
            UnitKey::Unit(unit) => self.units.iter().find(|u| *u == unit),
        };
        found.ok_or_else(|| UnitError::UnknownUnit {
            quantity: self.name.clone(),
            unit: key.to_string(),
        })
    }

    /// Whether the unit belongs to this family.
    pub fn contains<'a>(&self, key: impl Into<UnitKey<'a>>) -> bool {
        self.get(key).is_ok()
    }

    /// Convert `value` from one unit of this family to another.
    pub fn convert<'a, 'b>(
        &self,
        value: f64,
        from: impl Into<UnitKey<'a>>,
        to: impl Into<UnitKey<'b>>,
    ) -> Result<f64, UnitError> {
        let start = self.get(from)?;
        let end = self.get(to)?;
        Ok(end.from_base(start.to_base(value)))
    }
}

// ---------------------------------------------------------------------------
// Built-in families
// ---------------------------------------------------------------------------

fn builtin(name: &str, units: Vec<Unit>) -> QuantityType {
    QuantityType::new(name, units).expect("built-in unit names are unique")
}

/// Dimensionless values.
pub static UNITLESS: LazyLock<QuantityType> =
    LazyLock::new(|| builtin("Unitless", vec![Unit::new("-")]));

/// Fractions: plain, percent, parts per million and per billion.
pub static FRACTION: LazyLock<QuantityType> = LazyLock::new(|| {
    builtin(
        "Fraction",
        vec![
            Unit::new("-"),
            Unit::scaled("%", 0.01),
            Unit::scaled("ppm", 1e-6),
            Unit::scaled("ppt", 1e-9),
        ],
    )
});

/// Pressure in pascal, absolute bar and gauge bar.
pub static PRESSURE: LazyLock<QuantityType> = LazyLock::new(|| {
    builtin(
        "Pressure",
        vec![
            Unit::new("Pa"),
            Unit::scaled("bar(a)", 100_000.0),
            Unit::affine("bar(g)", 100_000.0, 100_000.0),
        ],
    )
});

/// Temperature in kelvin and degrees Celsius.
pub static TEMPERATURE: LazyLock<QuantityType> = LazyLock::new(|| {
    builtin(
        "Temperature",
        vec![Unit::new("K"), Unit::affine("\u{2103}", 1.0, 273.15)],
    )
});

/// Area in square metres, millimetres and centimetres.
pub static AREA: LazyLock<QuantityType> = LazyLock::new(|| {
    builtin(
        "Area",
        vec![
            Unit::new("m\u{00B2}"),
            Unit::scaled("mm\u{00B2}", 1e-6),
            Unit::scaled("cm\u{00B2}", 1e-4),
        ],
    )
});

/// Force in newton and kilonewton.
pub static FORCE: LazyLock<QuantityType> =
    LazyLock::new(|| builtin("Force", vec![Unit::new("N"), Unit::scaled("kN", 1000.0)]));

// ===========================================================================
// Tests
// ===========================================================================
