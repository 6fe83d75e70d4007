//! FormSchema: the static, ordered attribute list of a form type.
//!
//! ```ignore
//! let config = FormSchema::builder("Config")
//!     .field("pipes", FieldDeclaration::integer("Pipes"))
//!     .build()?;
//! let schema = FormSchema::builder("TestForm")
//!     .field("name", FieldDeclaration::string("Name"))
//!     .field("price", FieldDeclaration::float("Price"))
//!     .form("config", "Configuration", &config)
//!     .build()?;
//! ```

use std::fmt;
use std::sync::Arc;

use super::hooks::{DefaultHooks, FormHooks};
use crate::error::StructuralError;
use crate::field::FieldDeclaration;

/// A nested form: a schema shown under a group title.
#[derive(Debug, Clone)]
pub struct FormDeclaration {
    title: String,
    schema: Arc<FormSchema>,
}

impl FormDeclaration {
    pub fn new(title: impl Into<String>, schema: Arc<FormSchema>) -> Self {
        Self {
            title: title.into(),
            schema,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }
}

/// One declared attribute.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Field(Arc<FieldDeclaration>),
    Form(FormDeclaration),
}

/// Ordered attribute declarations of a form type plus its hooks.
pub struct FormSchema {
    name: String,
    entries: Vec<(String, SchemaEntry)>,
    hooks: Arc<dyn FormHooks>,
}

impl FormSchema {
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            entries: Vec::new(),
            hooks: Arc::new(DefaultHooks),
        }
    }

    /// The form type's name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(attr, entry)| (attr.as_str(), entry))
    }

    pub fn entry(&self, attribute: &str) -> Option<&SchemaEntry> {
        self.entries
            .iter()
            .find(|(attr, _)| attr == attribute)
            .map(|(_, entry)| entry)
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> Vec<&str> {
        self.entries.iter().map(|(attr, _)| attr.as_str()).collect()
    }

    pub fn hooks(&self) -> &Arc<dyn FormHooks> {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`FormSchema`].
pub struct FormSchemaBuilder {
    name: String,
    entries: Vec<(String, SchemaEntry)>,
    hooks: Arc<dyn FormHooks>,
}

impl FormSchemaBuilder {
    /// Declare a field attribute.
    pub fn field(mut self, attribute: impl Into<String>, field: FieldDeclaration) -> Self {
        self.entries
            .push((attribute.into(), SchemaEntry::Field(Arc::new(field))));
        self
    }

    /// Declare a nested form attribute shown under `title`.
    pub fn form(
        mut self,
        attribute: impl Into<String>,
        title: impl Into<String>,
        schema: &Arc<FormSchema>,
    ) -> Self {
        self.entries.push((
            attribute.into(),
            SchemaEntry::Form(FormDeclaration::new(title, Arc::clone(schema))),
        ));
        self
    }

    /// Install the form type's hooks.
    pub fn hooks(mut self, hooks: impl FormHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Finish the schema. Fails on a duplicate attribute name.
    pub fn build(self) -> Result<Arc<FormSchema>, StructuralError> {
        for (i, (attr, _)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(seen, _)| seen == attr) {
                return Err(StructuralError::DuplicateAttribute {
                    form: self.name,
                    attribute: attr.clone(),
                });
            }
        }
        Ok(Arc::new(FormSchema {
            name: self.name,
            entries: self.entries,
            hooks: self.hooks,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<FormSchema> {
        FormSchema::builder("Config")
            .field("pipes", FieldDeclaration::integer("Pipes"))
            .build()
            .unwrap()
    }

    #[test]
    fn entries_keep_declaration_order() {
        let schema = FormSchema::builder("TestForm")
            .field("name", FieldDeclaration::string("Name"))
            .field("price", FieldDeclaration::float("Price"))
            .form("config", "Configuration", &config())
            .build()
            .unwrap();
        assert_eq!(schema.attributes(), vec!["name", "price", "config"]);
        assert_eq!(schema.len(), 3);
        assert!(matches!(
            schema.entry("config"),
            Some(SchemaEntry::Form(f)) if f.title() == "Configuration"
        ));
        assert!(matches!(schema.entry("name"), Some(SchemaEntry::Field(_))));
        assert!(schema.entry("missing").is_none());
    }

    #[test]
    fn duplicate_attribute_rejected() {
        let err = FormSchema::builder("TestForm")
            .field("name", FieldDeclaration::string("Name"))
            .form("name", "Configuration", &config())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::DuplicateAttribute {
                form: "TestForm".into(),
                attribute: "name".into()
            }
        );
    }

    #[test]
    fn nested_schema_is_shared() {
        let inner = config();
        let a = FormSchema::builder("A").form("c", "C", &inner).build().unwrap();
        let b = FormSchema::builder("B").form("c", "C", &inner).build().unwrap();
        assert!(a.entry("c").is_some() && b.entry("c").is_some());
        assert_eq!(Arc::strong_count(&inner), 3);
        assert!(FormSchema::builder("Empty").build().unwrap().is_empty());
    }
}
