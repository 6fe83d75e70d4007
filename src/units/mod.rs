//! Unit conversion: units grouped into quantity families.
//!
//! Independent of forms. A [`QuantityType`] converts between any two of its own
//! [`Unit`]s through a shared base representation; there is no cross-family
//! conversion.

pub mod quantity;
pub mod unit;

pub use quantity::{QuantityType, UnitKey, AREA, FORCE, FRACTION, PRESSURE, TEMPERATURE, UNITLESS};
pub use unit::Unit;
