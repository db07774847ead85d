//! Resource - Representing configuration and state of remote entities

use std::collections::HashMap;

use crate::provider::{ProviderError, ProviderResult};

/// Unique identifier for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "filesystem", "groupnet")
    pub resource_type: String,
    /// Resource name (label given by the operator)
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// A JSON number that does not fit an `Int` attribute
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0} is not an integer")]
pub struct NotAnInteger(pub String);

/// Integral floats such as `5.0` are accepted
fn integer(n: &serde_json::Number) -> Result<i64, NotAnInteger> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(NotAnInteger(n.to_string())),
    }
}

/// Attribute value of a resource
///
/// A null attribute is represented by the key being absent from the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    /// Convert a JSON value to a Value. `null` maps to `None`, and a null
    /// entry of an array or object is dropped.
    ///
    /// Numbers must be integers; a float with a fractional part is an error.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Value>, NotAnInteger> {
        Ok(match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => Some(Value::Int(integer(n)?)),
            serde_json::Value::Array(arr) => {
                let mut items = Vec::with_capacity(arr.len());
                for item in arr {
                    if let Some(v) = Value::from_json(item)? {
                        items.push(v);
                    }
                }
                Some(Value::List(items))
            }
            serde_json::Value::Object(obj) => {
                let mut map = HashMap::with_capacity(obj.len());
                for (k, v) in obj {
                    if let Some(v) = Value::from_json(v)? {
                        map.insert(k.clone(), v);
                    }
                }
                Some(Value::Map(map))
            }
        })
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Build a list of strings
    pub fn string_list<I, S>(items: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Typed accessors for attribute maps
pub trait AttributeMap {
    fn get_str(&self, key: &str) -> Option<&str>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn get_list(&self, key: &str) -> Option<&[Value]>;
    fn get_map(&self, key: &str) -> Option<&HashMap<String, Value>>;

    /// Get a list attribute as strings, skipping non-string elements
    fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        self.get_list(key).map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}

impl AttributeMap for HashMap<String, Value> {
    fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    fn get_list(&self, key: &str) -> Option<&[Value]> {
        match self.get(key) {
            Some(Value::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    fn get_map(&self, key: &str) -> Option<&HashMap<String, Value>> {
        match self.get(key) {
            Some(Value::Map(map)) => Some(map),
            _ => None,
        }
    }
}

/// Get a string attribute that must be set, naming the resource when it is not
pub fn require_str<'a>(
    id: &ResourceId,
    attributes: &'a HashMap<String, Value>,
    key: &str,
) -> ProviderResult<&'a str> {
    attributes.get_str(key).ok_or_else(|| {
        ProviderError::new(format!("Missing required attribute '{}'", key)).for_resource(id.clone())
    })
}

/// Desired configuration declared by the operator
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
    /// If true, this is a data source (read-only) that won't be modified
    pub read_only: bool,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: HashMap::new(),
            read_only: false,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Returns true if this resource is a data source (read-only)
    pub fn is_data_source(&self) -> bool {
        self.read_only
    }

    /// Get a string attribute that must be set
    pub fn require_str(&self, key: &str) -> ProviderResult<&str> {
        require_str(&self.id, &self.attributes, key)
    }
}

/// Last-known state of a remote entity
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: ResourceId,
    /// Server-side identifier (share id, snapshot id, directory path, ...)
    pub identifier: Option<String>,
    pub attributes: HashMap<String, Value>,
    /// Whether this state exists
    pub exists: bool,
}

impl State {
    pub fn not_found(id: ResourceId) -> Self {
        Self {
            id,
            identifier: None,
            attributes: HashMap::new(),
            exists: false,
        }
    }

    pub fn existing(id: ResourceId, attributes: HashMap<String, Value>) -> Self {
        Self {
            id,
            identifier: None,
            attributes,
            exists: true,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Get a string attribute that must be set
    pub fn require_str(&self, key: &str) -> ProviderResult<&str> {
        require_str(&self.id, &self.attributes, key)
    }

    /// Render the state as a JSON object (attributes only)
    pub fn to_json(&self) -> serde_json::Value {
        Value::Map(self.attributes.clone()).to_json()
    }
}
