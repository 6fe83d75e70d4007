//! # declform
//!
//! Declarative data-entry forms: typed fields, locale-aware validation, and
//! change bubbling over a headless element tree.
//!
//! A form type is declared once as an ordered [`FormSchema`](form::FormSchema)
//! of typed fields and nested sub-forms. Building it yields a [`Form`](form::Form)
//! with one declaration node per attribute, a tree of headless elements for an
//! external renderer to draw, and typed `get`/`set` access to every value. User
//! edits are validated into a tri-state outcome and bubble from the owning
//! container up to the root through each form's gating hooks.
//!
//! ## Core Systems
//!
//! - **[`units`]**: Units and quantity families with affine conversion
//! - **[`field`]**: Ranges, validators, converted values, field declarations
//! - **[`tree`]**: Slotmap-backed declaration tree, one node per attribute
//! - **[`element`]**: Headless element models: Label, TextInput, Selector, GroupBox
//! - **[`event`]**: Change notifications, adapter events, propagation traces
//! - **[`form`]**: Schemas, hooks, form building, container access, value mappings
//! - **[`config`]**: Number locale and build-time options
//! - **[`error`]**: Structural and unit errors
//! - **[`testing`]**: Headless FormPilot and tree snapshots

// Foundation
pub mod config;
pub mod error;
pub mod units;

// Declarations
pub mod field;
pub mod tree;

// Runtime
pub mod element;
pub mod event;
pub mod form;

// Test support
pub mod testing;
