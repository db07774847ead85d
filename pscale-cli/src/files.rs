//! Configuration and state files
//!
//! A configuration file holds one resource or data source:
//!
//! ```json
//! { "type": "filesystem", "name": "home", "attributes": { "name": "home" } }
//! ```
//!
//! A state file is what `create`, `read` and `update` write back, with the
//! server-side identifier alongside the attributes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pscale_core::resource::{Resource, ResourceId, State, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default)]
    attributes: serde_json::Value,
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn attributes_from_json(
    path: &Path,
    json: &serde_json::Value,
) -> Result<HashMap<String, Value>, String> {
    match Value::from_json(json) {
        Ok(Some(Value::Map(map))) => Ok(map),
        Ok(None) => Ok(HashMap::new()),
        Ok(Some(_)) => Err(format!("{}: attributes must be an object", path.display())),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

/// Load a resource or data source configuration
pub fn load_resource(path: &Path, data_source: bool) -> Result<Resource, String> {
    let content = read(path)?;
    let file: ConfigFile = serde_json::from_str(&content)
        .map_err(|e| format!("Parse error in {}: {}", path.display(), e))?;

    let attributes =
        attributes_from_json(path, &serde_json::Value::Object(file.attributes))?;
    Ok(Resource {
        id: ResourceId::new(file.resource_type, file.name),
        attributes,
        read_only: data_source,
    })
}

/// Load a state file written by an earlier run
pub fn load_state(path: &Path) -> Result<State, String> {
    let content = read(path)?;
    let file: StateFile = serde_json::from_str(&content)
        .map_err(|e| format!("Parse error in {}: {}", path.display(), e))?;

    let attributes = attributes_from_json(path, &file.attributes)?;
    let state = State::existing(ResourceId::new(file.resource_type, file.name), attributes);
    Ok(match file.identifier {
        Some(identifier) => state.with_identifier(identifier),
        None => state,
    })
}

/// Render a state the way `load_state` reads it
pub fn state_to_json(state: &State) -> serde_json::Value {
    let file = StateFile {
        resource_type: state.id.resource_type.clone(),
        name: state.id.name.clone(),
        identifier: state.identifier.clone(),
        attributes: state.to_json(),
    };
    serde_json::to_value(file).unwrap_or(serde_json::Value::Null)
}

pub fn save_state(path: &Path, state: &State) -> Result<(), String> {
    let content = serde_json::to_string_pretty(&state_to_json(state))
        .map_err(|e| format!("Failed to serialize state: {}", e))?;
    fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscale_core::resource::AttributeMap;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_resource_configuration() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "home.json",
            r#"{"type":"filesystem","name":"home","attributes":{"name":"home","recursive":false,"owner":{"id":"UID:0","name":"root","type":"user"}}}"#,
        );

        let resource = load_resource(&path, false).unwrap();
        assert_eq!(resource.id, ResourceId::new("filesystem", "home"));
        assert_eq!(resource.attributes.get_bool("recursive"), Some(false));
        assert_eq!(
            resource.attributes.get_map("owner").and_then(|o| o.get_str("name")),
            Some("root")
        );
        assert!(!resource.is_data_source());
    }

    #[test]
    fn null_attributes_are_absent() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "gn.json",
            r#"{"type":"groupnet","name":"all","attributes":{"filter":null}}"#,
        );

        let resource = load_resource(&path, true).unwrap();
        assert!(resource.attributes.is_empty());
        assert!(resource.is_data_source());
    }

    #[test]
    fn fractional_number_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "snap.json",
            r#"{"type":"snapshot","name":"s","attributes":{"path":"/ifs/data","expires":1700000000.5}}"#,
        );

        let err = load_resource(&path, false).unwrap_err();
        assert!(err.ends_with("1700000000.5 is not an integer"), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = load_resource(&dir.path().join("nope.json"), false).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", r#"{"name":"x"}"#);
        let err = load_resource(&path, false).unwrap_err();
        assert!(err.starts_with("Parse error"));
    }

    #[test]
    fn state_survives_a_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut attributes = HashMap::new();
        attributes.insert("id".to_string(), Value::String("share1".to_string()));
        attributes.insert("zid".to_string(), Value::Int(1));
        let state = State::existing(ResourceId::new("smb_share", "share1"), attributes)
            .with_identifier("share1");

        save_state(&path, &state).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
    }
}
