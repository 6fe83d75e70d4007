//! FormHooks: per-form gates run as a change notification passes a container.

use super::access::{ContainerMut, ContainerRef};

/// Hooks a form type runs when one of its attributes changes.
///
/// They run in order `on_change_pre_validate` → `is_valid` → `on_change`; the
/// first to return `false` stops the notification. When `on_change` returns
/// `true` the container notifies its own parent. Every hook defaults to `true`.
///
/// Writes made from `on_change` never raise new notifications. Edits made
/// from it are validated and reported as feedback, and are not bubbled.
pub trait FormHooks {
    /// Inspect the changed attribute before validation.
    fn on_change_pre_validate(&self, _attribute: &str, _form: &ContainerRef<'_>) -> bool {
        true
    }

    /// Whole-form validity check.
    fn is_valid(&self, _form: &ContainerRef<'_>) -> bool {
        true
    }

    /// React to the change, possibly writing other fields.
    fn on_change(&self, _attribute: &str, _form: &mut ContainerMut<'_>) -> bool {
        true
    }
}

/// Hooks that accept every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl FormHooks for DefaultHooks {}
