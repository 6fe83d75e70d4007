//! Headless testing helpers: FormPilot, tree snapshots.
//!
//! Use the [`FormPilot`] to drive a [`Form`](crate::form::Form) the way a user
//! would, field by field. Use [`tree_to_string`] to capture the whole form as
//! plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::FormPilot;
pub use snapshot::tree_to_string;
