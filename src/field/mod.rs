//! Field typing: ranges, validators, converted values and field declarations.

pub mod declaration;
pub mod range;
pub mod validator;
pub mod value;

pub use declaration::{ControlKind, FieldDeclaration, FieldKind, UnitSuffix, ValidatorFactory};
pub use range::{AnyRange, FloatRange, IntRange, IntervalRange, ListRange, MappedRange, Range};
pub use validator::{
    ChoiceValidator, DynValidator, FloatValidator, Incomplete, IntegerValidator, StringValidator,
    ValidationOutcome, Validator, Validity,
};
pub use value::Value;
