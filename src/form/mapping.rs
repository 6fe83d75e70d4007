//! FormMapping: a nested, ordered dump of a form's values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::Value;

/// A field value (possibly absent) or a nested form's mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingValue {
    Form(FormMapping),
    Value(Option<Value>),
}

/// Attribute → value, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormMapping(IndexMap<String, MappingValue>);

impl FormMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: MappingValue) {
        self.0.insert(attribute.into(), value);
    }

    /// Add a field value (builder pattern).
    pub fn with_value(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(attribute, MappingValue::Value(Some(value.into())));
        self
    }

    /// Add an absent field value (builder pattern).
    pub fn with_empty(mut self, attribute: impl Into<String>) -> Self {
        self.insert(attribute, MappingValue::Value(None));
        self
    }

    /// Add a nested form (builder pattern).
    pub fn with_form(mut self, attribute: impl Into<String>, form: FormMapping) -> Self {
        self.insert(attribute, MappingValue::Form(form));
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&MappingValue> {
        self.0.get(attribute)
    }

    /// The value of a field attribute, if present and set.
    pub fn value(&self, attribute: &str) -> Option<&Value> {
        match self.0.get(attribute) {
            Some(MappingValue::Value(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// The mapping of a nested form attribute.
    pub fn form(&self, attribute: &str) -> Option<&FormMapping> {
        match self.0.get(attribute) {
            Some(MappingValue::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingValue)> {
        self.0.iter().map(|(attr, value)| (attr.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as JSON. Absent values and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(attr, value)| (attr.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Parse a JSON object into a mapping.
    pub fn from_json(json: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }
}

impl MappingValue {
    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Form(form) => form.to_json(),
            Self::Value(None) => serde_json::Value::Null,
            Self::Value(Some(Value::Integer(i))) => (*i).into(),
            Self::Value(Some(Value::Float(f))) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Value(Some(Value::Text(s))) => s.clone().into(),
        }
    }
}
