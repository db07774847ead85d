//! Request and response bodies of the PowerScale API

pub mod job;
pub mod namespace;
pub mod network;
pub mod smb;
pub mod snapshot;

pub use job::{Job, JobRequest, SnaprevertParams};
pub use namespace::{CreateDirectoryOptions, DirectoryMetadata, MemberObject, MetadataAttr, NamespaceAcl};
pub use network::{Groupnet, GroupnetParams};
pub use smb::{SmbPermission, SmbShare};
pub use snapshot::{Snapshot, SnapshotParams, WritableSnapshot, WritableSnapshotParams};

use serde::Deserialize;

/// Body returned by create operations: `{"id": ...}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateResponse<T> {
    pub id: T,
}
