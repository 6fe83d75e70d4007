//! Error types: structural tree errors, unit errors, and the umbrella [`FormError`].
//!
//! Validation problems (unparsable text, values out of range) are *not* errors;
//! they surface as [`ValidationOutcome::Intermediate`](crate::field::ValidationOutcome)
//! and drive element feedback only. Everything here is a programmer error and is
//! returned to the caller immediately.

/// A tree invariant was violated or an attribute access could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("field `{attribute}` cannot be materialized without a parent container")]
    MissingParent { attribute: String },
    #[error("`{container}` has no attribute `{attribute}`")]
    UnknownAttribute { container: String, attribute: String },
    #[error("`{attribute}` is a field, not a container")]
    NotAContainer { attribute: String },
    #[error("`{attribute}` is a container, not a field")]
    NotAField { attribute: String },
    #[error("cannot write container `{attribute}` directly; write its fields individually")]
    ContainerWrite { attribute: String },
    #[error("attribute `{attribute}` declared twice in form `{form}`")]
    DuplicateAttribute { form: String, attribute: String },
    #[error("node is not part of this form")]
    UnknownNode,
    #[error("element is not part of this form")]
    UnknownElement,
    #[error("element `{kind}` does not accept edits")]
    NotEditable { kind: &'static str },
}

/// Errors from unit lookup and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("{unit} is not a valid unit of {quantity}")]
    UnknownUnit { quantity: String, unit: String },
    #[error("unit {unit} declared twice in {quantity}")]
    DuplicateUnit { quantity: String, unit: String },
    #[error("field `{attribute}` has no unit")]
    NoUnit { attribute: String },
}

/// Umbrella error for operations that touch both the tree and the unit system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Unit(#[from] UnitError),
}
