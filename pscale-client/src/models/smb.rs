//! SMB share models

use serde::{Deserialize, Serialize};

use super::namespace::MemberObject;

/// One entry of a share's permission list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmbPermission {
    /// "full", "change" or "read"
    pub permission: String,
    /// "allow" or "deny"
    pub permission_type: String,
    pub trustee: MemberObject,
}

/// An SMB share. Used for create and update bodies as well as responses;
/// unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmbShare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_filtering_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_dot_files: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_based_enumeration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<SmbPermission>>,
    /// Access zone id, returned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zid: Option<i64>,
}

/// `{"shares": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmbShareList {
    #[serde(default)]
    pub shares: Vec<SmbShare>,
}
