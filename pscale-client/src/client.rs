//! HTTP implementation of PowerScaleApi

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::PowerScaleApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::job::JobList;
use crate::models::network::GroupnetList;
use crate::models::smb::SmbShareList;
use crate::models::snapshot::{SnapshotList, WritableSnapshotList};
use crate::models::{
    CreateDirectoryOptions, CreateResponse, DirectoryMetadata, Groupnet, GroupnetParams, Job,
    JobRequest, NamespaceAcl, SmbShare, Snapshot, SnapshotParams, WritableSnapshot,
    WritableSnapshotParams,
};

const SMB_SHARES: &str = "/platform/7/protocols/smb/shares";
const SNAPSHOTS: &str = "/platform/1/snapshot/snapshots";
const WRITABLE_SNAPSHOTS: &str = "/platform/14/snapshot/writable";
const GROUPNETS: &str = "/platform/10/network/groupnets";
const JOBS: &str = "/platform/10/job/jobs";

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

fn sanitize_for_log(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    let truncated = if truncated.len() < body.len() {
        format!("{}... [truncated, {} bytes total]", truncated, body.len())
    } else {
        truncated
    };
    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Build the namespace URL path for a directory, encoding each segment
pub fn namespace_path(path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/namespace/{}", encoded.join("/"))
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

/// PowerScale REST client
#[derive(Clone)]
pub struct PowerScaleClient {
    http: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl PowerScaleClient {
    /// Create a client from connection settings
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(concat!("pscale/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.http
            .request(method, format!("{}{}", self.endpoint, path))
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn execute(&self, builder: RequestBuilder) -> ClientResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let body = self.execute(builder).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> ClientResult<String> {
        self.execute(self.request(method, path).json(body)).await
    }

    fn with_zone(builder: RequestBuilder, zone: Option<&str>) -> RequestBuilder {
        match zone {
            Some(zone) => builder.query(&[("zone", zone)]),
            None => builder,
        }
    }
}

fn first<T>(items: Vec<T>, what: &str, id: &str) -> ClientResult<T> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::Missing(format!("{} '{}'", what, id)))
}

#[async_trait]
impl PowerScaleApi for PowerScaleClient {
    async fn create_directory(
        &self,
        path: &str,
        options: &CreateDirectoryOptions,
    ) -> ClientResult<()> {
        let mut builder = self
            .request(Method::PUT, &namespace_path(path))
            .header("x-isi-ifs-target-type", "container")
            .query(&[
                ("overwrite", options.overwrite.to_string()),
                ("recursive", options.recursive.to_string()),
            ]);
        if let Some(access) = options.access_control.as_deref().filter(|a| !a.is_empty()) {
            builder = builder.header("x-isi-ifs-access-control", access);
        }
        self.execute(builder).await.map(|_| ())
    }

    async fn get_directory_metadata(&self, path: &str) -> ClientResult<DirectoryMetadata> {
        self.fetch(
            self.request(Method::GET, &namespace_path(path))
                .query(&[("metadata", "true")]),
        )
        .await
    }

    async fn get_directory_acl(&self, path: &str) -> ClientResult<NamespaceAcl> {
        self.fetch(
            self.request(Method::GET, &namespace_path(path))
                .query(&[("acl", "true")]),
        )
        .await
    }

    async fn set_directory_acl(&self, path: &str, acl: &NamespaceAcl) -> ClientResult<()> {
        let builder = self
            .request(Method::PUT, &namespace_path(path))
            .query(&[("acl", "true")])
            .json(acl);
        self.execute(builder).await.map(|_| ())
    }

    async fn delete_directory(&self, path: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &namespace_path(path)))
            .await
            .map(|_| ())
    }

    async fn create_smb_share(&self, share: &SmbShare, zone: Option<&str>) -> ClientResult<String> {
        let builder = Self::with_zone(self.request(Method::POST, SMB_SHARES), zone).json(share);
        let created: CreateResponse<String> = self.fetch(builder).await?;
        Ok(created.id)
    }

    async fn get_smb_share(&self, id: &str, zone: Option<&str>) -> ClientResult<SmbShare> {
        let builder = Self::with_zone(self.request(Method::GET, &item_path(SMB_SHARES, id)), zone);
        let list: SmbShareList = self.fetch(builder).await?;
        first(list.shares, "SMB share", id)
    }

    async fn update_smb_share(
        &self,
        id: &str,
        share: &SmbShare,
        zone: Option<&str>,
    ) -> ClientResult<()> {
        let builder =
            Self::with_zone(self.request(Method::PUT, &item_path(SMB_SHARES, id)), zone).json(share);
        self.execute(builder).await.map(|_| ())
    }

    async fn delete_smb_share(&self, id: &str, zone: Option<&str>) -> ClientResult<()> {
        let builder =
            Self::with_zone(self.request(Method::DELETE, &item_path(SMB_SHARES, id)), zone);
        self.execute(builder).await.map(|_| ())
    }

    async fn create_snapshot(&self, params: &SnapshotParams) -> ClientResult<Snapshot> {
        self.fetch(self.request(Method::POST, SNAPSHOTS).json(params))
            .await
    }

    async fn get_snapshot(&self, id: &str) -> ClientResult<Snapshot> {
        let list: SnapshotList = self
            .fetch(self.request(Method::GET, &item_path(SNAPSHOTS, id)))
            .await?;
        first(list.snapshots, "snapshot", id)
    }

    async fn list_snapshots(&self) -> ClientResult<Vec<Snapshot>> {
        let list: SnapshotList = self.fetch(self.request(Method::GET, SNAPSHOTS)).await?;
        Ok(list.snapshots)
    }

    async fn update_snapshot(&self, id: &str, params: &SnapshotParams) -> ClientResult<()> {
        self.send(Method::PUT, &item_path(SNAPSHOTS, id), params)
            .await
            .map(|_| ())
    }

    async fn delete_snapshot(&self, id: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &item_path(SNAPSHOTS, id)))
            .await
            .map(|_| ())
    }

    async fn create_writable_snapshot(
        &self,
        params: &WritableSnapshotParams,
    ) -> ClientResult<WritableSnapshot> {
        self.fetch(self.request(Method::POST, WRITABLE_SNAPSHOTS).json(params))
            .await
    }

    async fn get_writable_snapshot(&self, dst_path: &str) -> ClientResult<WritableSnapshot> {
        let list: WritableSnapshotList = self
            .fetch(self.request(Method::GET, &item_path(WRITABLE_SNAPSHOTS, dst_path)))
            .await?;
        first(list.writable, "writable snapshot", dst_path)
    }

    async fn delete_writable_snapshot(&self, dst_path: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &item_path(WRITABLE_SNAPSHOTS, dst_path)))
            .await
            .map(|_| ())
    }

    async fn list_groupnets(&self) -> ClientResult<Vec<Groupnet>> {
        let list: GroupnetList = self.fetch(self.request(Method::GET, GROUPNETS)).await?;
        Ok(list.groupnets)
    }

    async fn get_groupnet(&self, id: &str) -> ClientResult<Groupnet> {
        let list: GroupnetList = self
            .fetch(self.request(Method::GET, &item_path(GROUPNETS, id)))
            .await?;
        first(list.groupnets, "groupnet", id)
    }

    async fn create_groupnet(&self, params: &GroupnetParams) -> ClientResult<String> {
        let created: CreateResponse<String> = self
            .fetch(self.request(Method::POST, GROUPNETS).json(params))
            .await?;
        Ok(created.id)
    }

    async fn update_groupnet(&self, id: &str, params: &GroupnetParams) -> ClientResult<()> {
        self.send(Method::PUT, &item_path(GROUPNETS, id), params)
            .await
            .map(|_| ())
    }

    async fn delete_groupnet(&self, id: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &item_path(GROUPNETS, id)))
            .await
            .map(|_| ())
    }

    async fn create_job(&self, request: &JobRequest) -> ClientResult<i64> {
        let created: CreateResponse<i64> = self
            .fetch(self.request(Method::POST, JOBS).json(request))
            .await?;
        Ok(created.id)
    }

    async fn get_job(&self, id: i64) -> ClientResult<Job> {
        let list: JobList = self
            .fetch(self.request(Method::GET, &format!("{}/{}", JOBS, id)))
            .await?;
        first(list.jobs, "job", &id.to_string())
    }
}
