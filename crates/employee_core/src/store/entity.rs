//! Key and entity value types.

use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Unique addressing handle for one entity: namespace + kind + name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub namespace: Option<String>,
    pub kind: String,
    pub name: String,
}

impl Key {
    /// Builds a key; a blank namespace is the default (`None`) namespace.
    pub fn new(namespace: Option<&str>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub(crate) fn namespace_column(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}/{}/{}", self.kind, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

/// One stored record: a key plus schemaless properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub key: Key,
    pub properties: Map<String, Value>,
}

impl Entity {
    /// Creates an entity with no properties.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            properties: Map::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns the property as a string slice when it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Removes the property and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}
