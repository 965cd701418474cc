//! Nested-document scope descriptor for sort clauses.

use serde_json::{Map, Value, json};

use crate::error::{AzimuthError, Result};

/// Restricts which nested documents' values participate in a sort.
///
/// Carries a nested object path and/or an opaque boolean filter expression.
/// The filter is not interpreted here; it is handed through to the field
/// value accessor that resolves nested scopes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedSortBuilder {
    path: Option<String>,
    filter: Option<Value>,
}

impl NestedSortBuilder {
    /// Create a descriptor for the given nested path.
    pub fn new<P: Into<String>>(path: P) -> Self {
        NestedSortBuilder {
            path: Some(path.into()),
            filter: None,
        }
    }

    /// Restrict participating nested documents with a filter expression.
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// The nested object path, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The filter expression, if set.
    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    /// Decode from the wire `nested` object (`path` and/or `filter` keys).
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AzimuthError::configuration("[nested] must be an object with [path] and/or [filter]")
        })?;

        let mut nested = NestedSortBuilder::default();
        for (key, val) in obj {
            match key.as_str() {
                "path" => {
                    let path = val.as_str().ok_or_else(|| {
                        AzimuthError::configuration("[nested.path] must be a string")
                    })?;
                    nested.path = Some(path.to_string());
                }
                "filter" => {
                    nested.filter = Some(val.clone());
                }
                other => {
                    return Err(AzimuthError::configuration(format!(
                        "unknown field [{other}] in [nested]"
                    )));
                }
            }
        }
        Ok(nested)
    }

    /// Encode to the wire `nested` object, emitting only the set parts.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(path) = &self.path {
            obj.insert("path".to_string(), json!(path));
        }
        if let Some(filter) = &self.filter {
            obj.insert("filter".to_string(), filter.clone());
        }
        Value::Object(obj)
    }
}
