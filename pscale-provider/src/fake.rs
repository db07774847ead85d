//! In-memory PowerScaleApi used by handler tests
//!
//! Each test builds its own instance and hands it to the handlers, so no
//! state is shared between tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pscale_client::models::{
    CreateDirectoryOptions, DirectoryMetadata, Groupnet, GroupnetParams, Job, JobRequest,
    MemberObject, MetadataAttr, NamespaceAcl, SmbShare, Snapshot, SnapshotParams,
    WritableSnapshot, WritableSnapshotParams,
};
use pscale_client::{ClientError, ClientResult, PowerScaleApi};
use pscale_core::schema::is_posix_mode;

const CREATED: i64 = 1_760_000_000;

#[derive(Default)]
struct Store {
    directories: HashMap<String, NamespaceAcl>,
    shares: Vec<SmbShare>,
    snapshots: Vec<Snapshot>,
    snapshot_updates: Vec<SnapshotParams>,
    writable: Vec<WritableSnapshot>,
    groupnets: Vec<Groupnet>,
    jobs: Vec<(Job, JobRequest)>,
}

#[derive(Default)]
pub struct FakeApi {
    store: Mutex<Store>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, (u16, String)>>,
}

fn not_found(what: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        message: format!("{} not found", what),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groupnets(groupnets: Vec<Groupnet>) -> Self {
        let api = Self::new();
        api.lock().groupnets = groupnets;
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    /// Make every later call of `op` fail with the given status and message
    pub fn fail_on(&self, op: &str, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op.to_string(), (status, message.to_string()));
    }

    /// Calls made so far, as "operation argument"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_directory(&self, path: &str) -> bool {
        self.lock().directories.contains_key(path)
    }

    /// Change a directory's mode behind the provider's back
    pub fn set_mode(&self, path: &str, mode: &str) {
        if let Some(acl) = self.lock().directories.get_mut(path) {
            acl.mode = Some(mode.to_string());
        }
    }

    pub fn add_snapshot(&self, id: i64, name: &str, path: &str) {
        self.lock().snapshots.push(Snapshot {
            id,
            name: name.to_string(),
            path: path.to_string(),
            created: CREATED,
            state: "active".to_string(),
            ..Default::default()
        });
    }

    pub fn snapshot(&self, id: i64) -> Option<Snapshot> {
        self.lock().snapshots.iter().find(|s| s.id == id).cloned()
    }

    /// Bodies of every snapshot update, in call order
    pub fn snapshot_updates(&self) -> Vec<SnapshotParams> {
        self.lock().snapshot_updates.clone()
    }

    pub fn snapshot_count(&self) -> usize {
        self.lock().snapshots.len()
    }

    pub fn share_count(&self) -> usize {
        self.lock().shares.len()
    }

    pub fn has_writable(&self, dst_path: &str) -> bool {
        self.lock().writable.iter().any(|w| w.dst_path == dst_path)
    }

    pub fn groupnet(&self, id: &str) -> Option<Groupnet> {
        self.lock().groupnets.iter().find(|g| g.id == id).cloned()
    }

    pub fn job_requests(&self) -> Vec<JobRequest> {
        self.lock().jobs.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Move a job to another state, as the job engine would
    pub fn set_job_state(&self, id: i64, state: &str) {
        if let Some((job, _)) = self.lock().jobs.iter_mut().find(|(j, _)| j.id == id) {
            job.state = state.to_string();
        }
    }

    /// Drop a job from the job history
    pub fn purge_job(&self, id: i64) {
        self.lock().jobs.retain(|(j, _)| j.id != id);
    }

    fn record(&self, op: &str, arg: &str) -> ClientResult<()> {
        let entry = if arg.is_empty() {
            op.to_string()
        } else {
            format!("{} {}", op, arg)
        };
        self.calls.lock().unwrap().push(entry);
        match self.failures.lock().unwrap().get(op) {
            Some((status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn find_snapshot<'a>(snapshots: &'a [Snapshot], key: &str) -> Option<&'a Snapshot> {
    snapshots
        .iter()
        .find(|s| s.id.to_string() == key || s.name == key)
}

#[async_trait]
impl PowerScaleApi for FakeApi {
    async fn create_directory(
        &self,
        path: &str,
        options: &CreateDirectoryOptions,
    ) -> ClientResult<()> {
        self.record("create_directory", path)?;
        let mut store = self.lock();
        if store.directories.contains_key(path) && !options.overwrite {
            return Err(ClientError::Api {
                status: 409,
                message: format!("{} already exists", path),
            });
        }
        let mode = options
            .access_control
            .clone()
            .filter(|a| is_posix_mode(a))
            .unwrap_or_else(|| "0700".to_string());
        store.directories.insert(
            path.to_string(),
            NamespaceAcl {
                authoritative: Some("mode".to_string()),
                mode: Some(mode),
                owner: Some(MemberObject::new("UID:0", "root", "user")),
                group: Some(MemberObject::new("GID:0", "wheel", "group")),
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn get_directory_metadata(&self, path: &str) -> ClientResult<DirectoryMetadata> {
        self.record("get_directory_metadata", path)?;
        if !self.has_directory(path) {
            return Err(not_found(path));
        }
        Ok(DirectoryMetadata {
            attrs: vec![
                MetadataAttr {
                    name: "type".to_string(),
                    value: serde_json::json!("container"),
                    namespace: None,
                },
                MetadataAttr {
                    name: "create_time".to_string(),
                    value: serde_json::json!("Thu, 09 Oct 2025 08:00:00 GMT"),
                    namespace: None,
                },
            ],
        })
    }

    async fn get_directory_acl(&self, path: &str) -> ClientResult<NamespaceAcl> {
        self.record("get_directory_acl", path)?;
        self.lock()
            .directories
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn set_directory_acl(&self, path: &str, acl: &NamespaceAcl) -> ClientResult<()> {
        self.record("set_directory_acl", path)?;
        let mut store = self.lock();
        let current = store.directories.get_mut(path).ok_or_else(|| not_found(path))?;
        if acl.owner.is_some() {
            current.owner = acl.owner.clone();
        }
        if acl.group.is_some() {
            current.group = acl.group.clone();
        }
        if acl.mode.is_some() {
            current.mode = acl.mode.clone();
        }
        if acl.authoritative.is_some() {
            current.authoritative = acl.authoritative.clone();
        }
        Ok(())
    }

    async fn delete_directory(&self, path: &str) -> ClientResult<()> {
        self.record("delete_directory", path)?;
        self.lock()
            .directories
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    async fn create_smb_share(&self, share: &SmbShare, zone: Option<&str>) -> ClientResult<String> {
        let name = share.name.clone().unwrap_or_default();
        self.record("create_smb_share", &name)?;
        let mut store = self.lock();
        if store.shares.iter().any(|s| s.name.as_deref() == Some(name.as_str())) {
            return Err(ClientError::Api {
                status: 409,
                message: format!("Share {} already exists", name),
            });
        }
        let mut created = share.clone();
        created.id = Some(name.clone());
        created.zid = Some(if zone.is_some_and(|z| z != "System") { 2 } else { 1 });
        created.browsable = share.browsable.or(Some(true));
        created.ca_timeout = share.ca_timeout.or(Some(120));
        created.hide_dot_files = share.hide_dot_files.or(Some(false));
        created.description = share.description.clone().or(Some(String::new()));
        created.permissions = share.permissions.clone().or(Some(Vec::new()));
        store.shares.push(created);
        Ok(name)
    }

    async fn get_smb_share(&self, id: &str, _zone: Option<&str>) -> ClientResult<SmbShare> {
        self.record("get_smb_share", id)?;
        self.lock()
            .shares
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_smb_share(
        &self,
        id: &str,
        share: &SmbShare,
        _zone: Option<&str>,
    ) -> ClientResult<()> {
        self.record("update_smb_share", id)?;
        let mut store = self.lock();
        let current = store
            .shares
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| not_found(id))?;
        if let Some(name) = &share.name {
            current.name = Some(name.clone());
            current.id = Some(name.clone());
        }
        if share.path.is_some() {
            current.path = share.path.clone();
        }
        if share.description.is_some() {
            current.description = share.description.clone();
        }
        if share.browsable.is_some() {
            current.browsable = share.browsable;
        }
        if share.ca_timeout.is_some() {
            current.ca_timeout = share.ca_timeout;
        }
        if share.hide_dot_files.is_some() {
            current.hide_dot_files = share.hide_dot_files;
        }
        if share.permissions.is_some() {
            current.permissions = share.permissions.clone();
        }
        Ok(())
    }

    async fn delete_smb_share(&self, id: &str, _zone: Option<&str>) -> ClientResult<()> {
        self.record("delete_smb_share", id)?;
        let mut store = self.lock();
        let before = store.shares.len();
        store.shares.retain(|s| s.id.as_deref() != Some(id));
        if store.shares.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn create_snapshot(&self, params: &SnapshotParams) -> ClientResult<Snapshot> {
        let path = params.path.clone().unwrap_or_default();
        self.record("create_snapshot", &path)?;
        let mut store = self.lock();
        let id = store.snapshots.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let snapshot = Snapshot {
            id,
            name: params.name.clone().unwrap_or_else(|| format!("s{}", id)),
            path,
            created: CREATED,
            expires: params.expires,
            size: 0,
            state: "active".to_string(),
            alias: params.alias.clone(),
            target_name: None,
        };
        store.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn get_snapshot(&self, id: &str) -> ClientResult<Snapshot> {
        self.record("get_snapshot", id)?;
        let store = self.lock();
        find_snapshot(&store.snapshots, id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_snapshots(&self) -> ClientResult<Vec<Snapshot>> {
        self.record("list_snapshots", "")?;
        Ok(self.lock().snapshots.clone())
    }

    async fn update_snapshot(&self, id: &str, params: &SnapshotParams) -> ClientResult<()> {
        self.record("update_snapshot", id)?;
        let mut store = self.lock();
        store.snapshot_updates.push(params.clone());
        let current = store
            .snapshots
            .iter_mut()
            .find(|s| s.id.to_string() == id)
            .ok_or_else(|| not_found(id))?;
        if let Some(name) = &params.name {
            current.name = name.clone();
        }
        if let Some(expires) = params.expires {
            current.expires = (expires != 0).then_some(expires);
        }
        if let Some(alias) = &params.alias {
            current.alias = (!alias.is_empty()).then(|| alias.clone());
        }
        Ok(())
    }

    async fn delete_snapshot(&self, id: &str) -> ClientResult<()> {
        self.record("delete_snapshot", id)?;
        let mut store = self.lock();
        let before = store.snapshots.len();
        store.snapshots.retain(|s| s.id.to_string() != id);
        if store.snapshots.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn create_writable_snapshot(
        &self,
        params: &WritableSnapshotParams,
    ) -> ClientResult<WritableSnapshot> {
        self.record("create_writable_snapshot", &params.dst_path)?;
        let mut store = self.lock();
        let source = find_snapshot(&store.snapshots, &params.src_snap)
            .cloned()
            .ok_or_else(|| not_found(&params.src_snap))?;
        let id = store.writable.len() as i64 + 1;
        let writable = WritableSnapshot {
            id,
            created: CREATED,
            dst_path: params.dst_path.clone(),
            log_size: 0,
            phys_size: 2048,
            src_id: source.id,
            src_path: source.path,
            src_snap: source.name,
            state: "active".to_string(),
        };
        store.writable.push(writable.clone());
        Ok(writable)
    }

    async fn get_writable_snapshot(&self, dst_path: &str) -> ClientResult<WritableSnapshot> {
        self.record("get_writable_snapshot", dst_path)?;
        self.lock()
            .writable
            .iter()
            .find(|w| w.dst_path == dst_path)
            .cloned()
            .ok_or_else(|| not_found(dst_path))
    }

    async fn delete_writable_snapshot(&self, dst_path: &str) -> ClientResult<()> {
        self.record("delete_writable_snapshot", dst_path)?;
        let mut store = self.lock();
        let before = store.writable.len();
        store.writable.retain(|w| w.dst_path != dst_path);
        if store.writable.len() == before {
            return Err(not_found(dst_path));
        }
        Ok(())
    }

    async fn list_groupnets(&self) -> ClientResult<Vec<Groupnet>> {
        self.record("list_groupnets", "")?;
        Ok(self.lock().groupnets.clone())
    }

    async fn get_groupnet(&self, id: &str) -> ClientResult<Groupnet> {
        self.record("get_groupnet", id)?;
        self.groupnet(id).ok_or_else(|| not_found(id))
    }

    async fn create_groupnet(&self, params: &GroupnetParams) -> ClientResult<String> {
        let name = params.name.clone().unwrap_or_default();
        self.record("create_groupnet", &name)?;
        let groupnet = Groupnet {
            id: name.clone(),
            name: name.clone(),
            description: params.description.clone().unwrap_or_default(),
            allow_wildcard_subdomains: params.allow_wildcard_subdomains.unwrap_or(true),
            dns_cache_enabled: params.dns_cache_enabled.unwrap_or(true),
            dns_resolver_rotate: params.dns_resolver_rotate.unwrap_or(false),
            server_side_dns_search: params.server_side_dns_search.unwrap_or(true),
            dns_search: params.dns_search.clone().unwrap_or_default(),
            dns_servers: params.dns_servers.clone().unwrap_or_default(),
            subnets: Vec::new(),
        };
        self.lock().groupnets.push(groupnet);
        Ok(name)
    }

    async fn update_groupnet(&self, id: &str, params: &GroupnetParams) -> ClientResult<()> {
        self.record("update_groupnet", id)?;
        let mut store = self.lock();
        let current = store
            .groupnets
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;
        if let Some(name) = &params.name {
            current.name = name.clone();
            current.id = name.clone();
        }
        if let Some(description) = &params.description {
            current.description = description.clone();
        }
        if let Some(v) = params.allow_wildcard_subdomains {
            current.allow_wildcard_subdomains = v;
        }
        if let Some(v) = params.dns_cache_enabled {
            current.dns_cache_enabled = v;
        }
        if let Some(v) = params.dns_resolver_rotate {
            current.dns_resolver_rotate = v;
        }
        if let Some(v) = params.server_side_dns_search {
            current.server_side_dns_search = v;
        }
        if let Some(v) = &params.dns_search {
            current.dns_search = v.clone();
        }
        if let Some(v) = &params.dns_servers {
            current.dns_servers = v.clone();
        }
        Ok(())
    }

    async fn delete_groupnet(&self, id: &str) -> ClientResult<()> {
        self.record("delete_groupnet", id)?;
        let mut store = self.lock();
        let before = store.groupnets.len();
        store.groupnets.retain(|g| g.id != id);
        if store.groupnets.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn create_job(&self, request: &JobRequest) -> ClientResult<i64> {
        self.record("create_job", &request.job_type)?;
        let mut store = self.lock();
        let id = 100 + store.jobs.len() as i64;
        let job = Job {
            id,
            state: "running".to_string(),
            job_type: request.job_type.clone(),
        };
        store.jobs.push((job, request.clone()));
        Ok(id)
    }

    async fn get_job(&self, id: i64) -> ClientResult<Job> {
        self.record("get_job", &id.to_string())?;
        self.lock()
            .jobs
            .iter()
            .find(|(j, _)| j.id == id)
            .map(|(j, _)| j.clone())
            .ok_or_else(|| not_found(&id.to_string()))
    }
}
