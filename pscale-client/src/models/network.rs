//! Network groupnet models

use serde::{Deserialize, Serialize};

/// A groupnet as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Groupnet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub allow_wildcard_subdomains: bool,
    #[serde(default)]
    pub dns_cache_enabled: bool,
    #[serde(default)]
    pub dns_resolver_rotate: bool,
    #[serde(default)]
    pub server_side_dns_search: bool,
    #[serde(default)]
    pub dns_search: Vec<String>,
    #[serde(default)]
    pub dns_servers: Vec<String>,
    #[serde(default)]
    pub subnets: Vec<String>,
}

/// Create/update body for a groupnet. Unset fields are left to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupnetParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_wildcard_subdomains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_cache_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_resolver_rotate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_dns_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_search: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<String>>,
}

/// `{"groupnets": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupnetList {
    #[serde(default)]
    pub groupnets: Vec<Groupnet>,
}
