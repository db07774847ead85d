//! Namespace (directory) API models

use serde::{Deserialize, Serialize};

/// A user or group reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
}

impl MemberObject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        member_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            member_type: Some(member_type.into()),
        }
    }
}

/// Access control of a directory (`?acl`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceAcl {
    /// "acl" if access rights are set, otherwise "mode"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<MemberObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<MemberObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Vec<serde_json::Value>>,
}

/// One metadata attribute of a directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttr {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Directory metadata (`?metadata`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryMetadata {
    #[serde(default)]
    pub attrs: Vec<MetadataAttr>,
}

impl DirectoryMetadata {
    /// Value of a named attribute rendered as a string
    pub fn get(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| match &a.value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
    }
}

/// Options for creating a directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDirectoryOptions {
    pub overwrite: bool,
    pub recursive: bool,
    /// Access rights keyword or POSIX mode
    pub access_control: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_values_render_as_strings() {
        let meta: DirectoryMetadata = serde_json::from_value(json!({
            "attrs": [
                {"name": "type", "value": "container", "namespace": null},
                {"name": "size", "value": 24},
                {"name": "empty", "value": null}
            ]
        }))
        .unwrap();

        assert_eq!(meta.get("type"), Some("container".to_string()));
        assert_eq!(meta.get("size"), Some("24".to_string()));
        assert_eq!(meta.get("empty"), None);
        assert_eq!(meta.get("missing"), None);
    }

    #[test]
    fn member_type_serializes_as_type() {
        let member = MemberObject::new("UID:0", "root", "user");
        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({"id": "UID:0", "name": "root", "type": "user"})
        );
    }

    #[test]
    fn acl_skips_unset_fields() {
        let acl = NamespaceAcl {
            authoritative: Some("mode".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&acl).unwrap(),
            json!({"authoritative": "mode"})
        );
    }
}
