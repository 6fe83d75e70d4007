//! Forms: schemas, hooks, built instances and their value access.
//!
//! A [`FormSchema`] declares a form type once. [`Form::build`] turns it into a
//! live instance whose values are read and written through [`ContainerRef`]
//! and [`ContainerMut`], and whose user edits bubble through each container's
//! [`FormHooks`].

pub mod access;
pub mod build;
#[allow(clippy::module_inception)]
pub mod form;
pub mod hooks;
pub mod mapping;
pub mod schema;

pub use access::{ContainerMut, ContainerRef};
pub use build::ROOT_ATTRIBUTE;
pub use form::{Edit, Form, Subscription};
pub use hooks::{DefaultHooks, FormHooks};
pub use mapping::{FormMapping, MappingValue};
pub use schema::{FormDeclaration, FormSchema, FormSchemaBuilder, SchemaEntry};
