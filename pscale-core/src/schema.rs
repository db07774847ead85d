//! Schema - Define attribute schemas for resources and data sources
//!
//! Handlers declare one schema per resource type. The schema carries the
//! Required/Optional/Computed markers and static defaults, and is used to
//! validate configuration before any REST call is made.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested object with its own attribute schemas
    Object(HashMap<String, AttributeSchema>),
}

impl AttributeType {
    /// Build a nested object type from attribute schemas
    pub fn object(attributes: impl IntoIterator<Item = AttributeSchema>) -> Self {
        AttributeType::Object(
            attributes
                .into_iter()
                .map(|a| (a.name.clone(), a))
                .collect(),
        )
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Object(attributes), Value::Map(map)) => {
                match validate_attributes(attributes, map).into_iter().next() {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Object(_) => "Object".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("An argument named '{name}' is not expected here")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is read-only and cannot be set in configuration")]
    ComputedOnly { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Populated by the server
    pub computed: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl AttributeSchema {
    /// New optional attribute
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            default: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Mark as server-populated. Combine with `optional()` for Optional+Computed.
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    /// Static default. Implies Optional+Computed, as the framework does.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self.optional = true;
        self.computed = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Whether the operator may set this attribute
    pub fn is_settable(&self) -> bool {
        self.required || self.optional
    }

    /// Short label used when listing schemas
    pub fn mode_label(&self) -> &'static str {
        match (self.required, self.optional, self.computed) {
            (true, _, _) => "required",
            (false, true, true) => "optional, computed",
            (false, true, false) => "optional",
            _ => "computed",
        }
    }
}

fn validate_attributes(
    schemas: &HashMap<String, AttributeSchema>,
    attributes: &HashMap<String, Value>,
) -> Vec<TypeError> {
    let mut errors = Vec::new();

    // Check required attributes
    let mut names: Vec<&String> = schemas.keys().collect();
    names.sort();
    for name in names {
        let schema = &schemas[name];
        if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
            errors.push(TypeError::MissingRequired { name: name.clone() });
        }
    }

    let mut keys: Vec<&String> = attributes.keys().collect();
    keys.sort();
    for name in keys {
        let value = &attributes[name];
        match schemas.get(name) {
            None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
            Some(schema) if !schema.is_settable() => {
                errors.push(TypeError::ComputedOnly { name: name.clone() })
            }
            Some(schema) => {
                if let Err(e) = schema.attr_type.validate(value) {
                    errors.push(TypeError::AttributeError {
                        name: name.clone(),
                        inner: Box::new(e),
                    });
                }
            }
        }
    }

    errors
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate configuration attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let errors = validate_attributes(&self.attributes, attributes);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fill in static defaults for unset attributes
    pub fn apply_defaults(&self, attributes: &mut HashMap<String, Value>) {
        for (name, schema) in &self.attributes {
            if let Some(default) = &schema.default
                && !attributes.contains_key(name)
            {
                attributes.insert(name.clone(), default.clone());
            }
        }
    }

    /// Attribute schemas sorted by name
    pub fn sorted_attributes(&self) -> Vec<&AttributeSchema> {
        let mut attrs: Vec<&AttributeSchema> = self.attributes.values().collect();
        attrs.sort_by(|a, b| a.name.cmp(&b.name));
        attrs
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Named access rights accepted by the namespace API
    pub const ACCESS_RIGHTS: &[&str] = &[
        "private_read",
        "private",
        "public_read",
        "public_read_write",
        "public",
    ];

    /// String that must not be empty
    pub fn non_empty_string() -> AttributeType {
        AttributeType::Custom {
            name: "NonEmptyString".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) if s.trim().is_empty() => {
                    Err("Value must not be empty".to_string())
                }
                _ => Ok(()),
            },
        }
    }

    /// Directory access control: a named access right or a POSIX mode (e.g. "0755")
    pub fn access_control() -> AttributeType {
        AttributeType::Custom {
            name: "AccessControl".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_access_control(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
        }
    }

    /// Non-negative integer type
    pub fn non_negative_int() -> AttributeType {
        AttributeType::Custom {
            name: "NonNegativeInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if *n < 0 => Err("Value must not be negative".to_string()),
                _ => Ok(()),
            },
        }
    }

    /// List of strings
    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }
}

/// Returns true if the value is a POSIX octal mode such as "0755" or "700"
pub fn is_posix_mode(s: &str) -> bool {
    regex::Regex::new(r"^0?[0-7]{3}$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

/// Validate a directory access control value
pub fn validate_access_control(s: &str) -> Result<(), String> {
    if types::ACCESS_RIGHTS.contains(&s) || is_posix_mode(s) {
        Ok(())
    } else {
        Err(format!(
            "Invalid access control '{}': expected one of {} or a POSIX mode like 0755",
            s,
            types::ACCESS_RIGHTS.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_type() -> AttributeType {
        AttributeType::object([
            AttributeSchema::new("id", AttributeType::String).required(),
            AttributeSchema::new("name", AttributeType::String).required(),
        ])
    }

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::Enum(vec!["a".to_string(), "b".to_string()]);
        assert!(t.validate(&Value::String("a".to_string())).is_ok());
        assert!(t.validate(&Value::String("c".to_string())).is_err());
    }

    #[test]
    fn validate_access_control_type() {
        let t = types::access_control();
        assert!(t.validate(&Value::String("0755".to_string())).is_ok());
        assert!(t.validate(&Value::String("700".to_string())).is_ok());
        assert!(t.validate(&Value::String("public_read".to_string())).is_ok());
        assert!(t.validate(&Value::String("0789".to_string())).is_err());
        assert!(t.validate(&Value::String("everyone".to_string())).is_err());
        assert!(t.validate(&Value::Int(755)).is_err());
    }

    #[test]
    fn validate_nested_object() {
        let t = member_type();
        let mut ok = HashMap::new();
        ok.insert("id".to_string(), Value::String("UID:0".to_string()));
        ok.insert("name".to_string(), Value::String("root".to_string()));
        assert!(t.validate(&Value::Map(ok.clone())).is_ok());

        ok.remove("name");
        assert!(matches!(
            t.validate(&Value::Map(ok)),
            Err(TypeError::MissingRequired { .. })
        ));
    }

    #[test]
    fn computed_only_attribute_cannot_be_set() {
        let schema = ResourceSchema::new("groupnet")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("id", AttributeType::String).computed());

        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("g1".to_string()));
        attrs.insert("id".to_string(), Value::String("g1".to_string()));

        let errors = schema.validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TypeError::ComputedOnly { .. }));
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let schema = ResourceSchema::new("groupnet")
            .attribute(AttributeSchema::new("name", AttributeType::String));

        let mut attrs = HashMap::new();
        attrs.insert("badfilter".to_string(), Value::String("x".to_string()));

        let errors = schema.validate(&attrs).unwrap_err();
        assert!(errors[0].to_string().contains("is not expected here"));
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("filesystem")
            .attribute(AttributeSchema::new("name", AttributeType::String).required());

        let result = schema.validate(&HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn apply_defaults_fills_unset_only() {
        let schema = ResourceSchema::new("filesystem")
            .attribute(
                AttributeSchema::new("directory_path", AttributeType::String)
                    .with_default(Value::String("/ifs".to_string())),
            )
            .attribute(
                AttributeSchema::new("recursive", AttributeType::Bool)
                    .with_default(Value::Bool(true)),
            );

        let mut attrs = HashMap::new();
        attrs.insert("recursive".to_string(), Value::Bool(false));
        schema.apply_defaults(&mut attrs);

        assert_eq!(
            attrs.get("directory_path"),
            Some(&Value::String("/ifs".to_string()))
        );
        assert_eq!(attrs.get("recursive"), Some(&Value::Bool(false)));
    }

    #[test]
    fn mode_labels() {
        let a = AttributeSchema::new("a", AttributeType::String);
        assert_eq!(a.mode_label(), "optional");
        assert_eq!(a.clone().required().mode_label(), "required");
        assert_eq!(a.clone().computed().mode_label(), "computed");
        assert_eq!(a.computed().optional().mode_label(), "optional, computed");
    }
}
