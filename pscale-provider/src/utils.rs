//! Helpers shared by the resource handlers

use std::collections::HashMap;

use pscale_client::ClientError;
use pscale_client::models::MemberObject;
use pscale_core::provider::ProviderError;
use pscale_core::resource::{AttributeMap, ResourceId, Value};

/// Join a parent directory and a directory name into a full path
///
/// `("/ifs/data/", "home")` -> `"/ifs/data/home"`
pub fn directory_path(parent: &str, name: &str) -> String {
    format!(
        "{}/{}",
        parent.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}

/// Human-readable message of a client failure
pub fn error_detail(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
        other => other.to_string(),
    }
}

/// Wrap a client failure into a provider error
///
/// `summary` is the headline shown to the operator, `context` prefixes the
/// extracted API message in the detail.
pub fn api_error(summary: &str, context: &str, id: &ResourceId, err: ClientError) -> ProviderError {
    ProviderError::new(summary)
        .with_detail(format!("{} with error: {}", context, error_detail(&err)))
        .for_resource(id.clone())
        .with_cause(err)
}

/// Read a `{id, name, type}` object attribute
pub fn member_from_attr(attrs: &HashMap<String, Value>, key: &str) -> Option<MemberObject> {
    let map = attrs.get_map(key)?;
    Some(MemberObject {
        id: map.get_str("id").map(str::to_string),
        name: map.get_str("name").map(str::to_string),
        member_type: map.get_str("type").map(str::to_string),
    })
}

/// Render a member as a `{id, name, type}` object attribute
pub fn member_to_value(member: &MemberObject) -> Value {
    let mut map = HashMap::new();
    set_opt(&mut map, "id", member.id.clone().map(Value::String));
    set_opt(&mut map, "name", member.name.clone().map(Value::String));
    set_opt(&mut map, "type", member.member_type.clone().map(Value::String));
    Value::Map(map)
}

/// Set `key` to `value`, or clear it when the value is absent
pub fn set_opt(attrs: &mut HashMap<String, Value>, key: &str, value: Option<Value>) {
    match value {
        Some(v) => {
            attrs.insert(key.to_string(), v);
        }
        None => {
            attrs.remove(key);
        }
    }
}

/// Overwrite `key` only when the server returned a value
pub fn set_if_some(attrs: &mut HashMap<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        attrs.insert(key.to_string(), v);
    }
}

/// True if any of `keys` differs between two attribute maps
pub fn changed(
    from: &HashMap<String, Value>,
    to: &HashMap<String, Value>,
    keys: &[&str],
) -> bool {
    keys.iter().any(|k| from.get(*k) != to.get(*k))
}
