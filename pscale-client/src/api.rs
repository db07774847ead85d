//! PowerScaleApi - one method per REST operation
//!
//! Handlers depend on this trait rather than on the HTTP client, so tests
//! can pass their own implementation.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{
    CreateDirectoryOptions, DirectoryMetadata, Groupnet, GroupnetParams, Job, JobRequest,
    NamespaceAcl, SmbShare, Snapshot, SnapshotParams, WritableSnapshot, WritableSnapshotParams,
};

#[async_trait]
pub trait PowerScaleApi: Send + Sync {
    // Namespace

    /// Create a directory at `path` (e.g. "/ifs/data/home")
    async fn create_directory(&self, path: &str, options: &CreateDirectoryOptions)
    -> ClientResult<()>;

    async fn get_directory_metadata(&self, path: &str) -> ClientResult<DirectoryMetadata>;

    async fn get_directory_acl(&self, path: &str) -> ClientResult<NamespaceAcl>;

    async fn set_directory_acl(&self, path: &str, acl: &NamespaceAcl) -> ClientResult<()>;

    async fn delete_directory(&self, path: &str) -> ClientResult<()>;

    // SMB shares

    /// Create a share and return its id
    async fn create_smb_share(&self, share: &SmbShare, zone: Option<&str>) -> ClientResult<String>;

    async fn get_smb_share(&self, id: &str, zone: Option<&str>) -> ClientResult<SmbShare>;

    async fn update_smb_share(
        &self,
        id: &str,
        share: &SmbShare,
        zone: Option<&str>,
    ) -> ClientResult<()>;

    async fn delete_smb_share(&self, id: &str, zone: Option<&str>) -> ClientResult<()>;

    // Snapshots

    async fn create_snapshot(&self, params: &SnapshotParams) -> ClientResult<Snapshot>;

    /// Get a snapshot by id or name
    async fn get_snapshot(&self, id: &str) -> ClientResult<Snapshot>;

    async fn list_snapshots(&self) -> ClientResult<Vec<Snapshot>>;

    async fn update_snapshot(&self, id: &str, params: &SnapshotParams) -> ClientResult<()>;

    async fn delete_snapshot(&self, id: &str) -> ClientResult<()>;

    // Writable snapshots

    async fn create_writable_snapshot(
        &self,
        params: &WritableSnapshotParams,
    ) -> ClientResult<WritableSnapshot>;

    async fn get_writable_snapshot(&self, dst_path: &str) -> ClientResult<WritableSnapshot>;

    async fn delete_writable_snapshot(&self, dst_path: &str) -> ClientResult<()>;

    // Groupnets

    async fn list_groupnets(&self) -> ClientResult<Vec<Groupnet>>;

    async fn get_groupnet(&self, id: &str) -> ClientResult<Groupnet>;

    /// Create a groupnet and return its id
    async fn create_groupnet(&self, params: &GroupnetParams) -> ClientResult<String>;

    async fn update_groupnet(&self, id: &str, params: &GroupnetParams) -> ClientResult<()>;

    async fn delete_groupnet(&self, id: &str) -> ClientResult<()>;

    // Jobs

    /// Start a job and return its id
    async fn create_job(&self, request: &JobRequest) -> ClientResult<i64>;

    async fn get_job(&self, id: i64) -> ClientResult<Job>;
}
