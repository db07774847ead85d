//! Snapshot and writable snapshot models

use serde::{Deserialize, Serialize};

/// A snapshot as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub expires: Option<i64>,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub target_name: Option<String>,
}

/// Create/update body for a snapshot
///
/// Unset fields are left out of the body. On update, `expires: 0` removes
/// the expiration and an empty `alias` removes the alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// `{"snapshots": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

/// A writable snapshot as returned by create and get
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WritableSnapshot {
    pub id: i64,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub dst_path: String,
    #[serde(default)]
    pub log_size: i64,
    #[serde(default)]
    pub phys_size: i64,
    #[serde(default)]
    pub src_id: i64,
    #[serde(default)]
    pub src_path: String,
    #[serde(default)]
    pub src_snap: String,
    #[serde(default)]
    pub state: String,
}

/// Create body for a writable snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WritableSnapshotParams {
    /// Source snapshot id or name
    pub src_snap: String,
    pub dst_path: String,
}

/// `{"writable": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WritableSnapshotList {
    #[serde(default)]
    pub writable: Vec<WritableSnapshot>,
}
