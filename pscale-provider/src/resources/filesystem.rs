//! Filesystem resource
//!
//! A directory under `/ifs` with its owner, group and access control. Create
//! is a four step sequence (create directory, set owner/group, read metadata,
//! read ACL). A failure after the first step leaves the directory in place.

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::{CreateDirectoryOptions, DirectoryMetadata, MemberObject, NamespaceAcl};
use pscale_core::provider::{ProviderError, ProviderResult};
use pscale_core::resource::{AttributeMap, Resource, ResourceId, State, Value, require_str};
use pscale_core::schema::is_posix_mode;

use crate::schemas::filesystem::DEFAULT_DIRECTORY_PATH;
use crate::utils::{api_error, directory_path, member_from_attr, member_to_value, set_if_some, set_opt};

const CREATE_ERROR: &str = "Could not create filesystem";
const READ_ERROR: &str = "Could not read filesystem";
const UPDATE_ERROR: &str = "Could not update filesystem";
const DELETE_ERROR: &str = "Could not delete filesystem";

const METADATA_ERROR: &str = "Error getting the metadata for the filesystem";
const ACL_ERROR: &str = "Error getting the acl for the filesystem";

/// Typed view of filesystem attributes
#[derive(Debug, Clone, PartialEq)]
pub struct FilesystemConfig {
    pub name: String,
    pub directory_path: String,
    pub owner: Option<MemberObject>,
    pub group: Option<MemberObject>,
    pub access_control: Option<String>,
    pub recursive: bool,
    pub overwrite: bool,
}

impl FilesystemConfig {
    pub fn from_attributes(id: &ResourceId, attrs: &HashMap<String, Value>) -> ProviderResult<Self> {
        Ok(Self {
            name: require_str(id, attrs, "name")?.to_string(),
            directory_path: attrs
                .get_str("directory_path")
                .unwrap_or(DEFAULT_DIRECTORY_PATH)
                .to_string(),
            owner: member_from_attr(attrs, "owner"),
            group: member_from_attr(attrs, "group"),
            access_control: attrs
                .get_str("access_control")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            recursive: attrs.get_bool("recursive").unwrap_or(true),
            overwrite: attrs.get_bool("overwrite").unwrap_or(false),
        })
    }

    /// Path of the directory on the cluster
    pub fn full_path(&self) -> String {
        directory_path(&self.directory_path, &self.name)
    }

    fn owner_group_acl(&self) -> NamespaceAcl {
        NamespaceAcl {
            authoritative: Some("mode".to_string()),
            owner: self.owner.clone(),
            group: self.group.clone(),
            ..Default::default()
        }
    }
}

/// Build filesystem state from the configuration and the server's view
///
/// Configured attributes pass through; identifiers, type, creation time and
/// ACL details come from the server.
pub fn reconcile(
    plan: &HashMap<String, Value>,
    full_path: &str,
    meta: &DirectoryMetadata,
    acl: &NamespaceAcl,
) -> HashMap<String, Value> {
    let mut attrs = plan.clone();
    attrs.insert("id".to_string(), Value::String(full_path.to_string()));
    attrs.insert("full_path".to_string(), Value::String(full_path.to_string()));
    set_opt(&mut attrs, "type", meta.get("type").map(Value::String));
    set_opt(&mut attrs, "creation_time", meta.get("create_time").map(Value::String));
    set_opt(&mut attrs, "authoritative", acl.authoritative.clone().map(Value::String));
    set_opt(&mut attrs, "mode", acl.mode.clone().map(Value::String));
    set_if_some(&mut attrs, "owner", acl.owner.as_ref().map(member_to_value));
    set_if_some(&mut attrs, "group", acl.group.as_ref().map(member_to_value));
    attrs
}

async fn fetch(
    api: &dyn PowerScaleApi,
    path: &str,
    id: &ResourceId,
    context: &str,
) -> ProviderResult<(DirectoryMetadata, NamespaceAcl)> {
    let meta = api
        .get_directory_metadata(path)
        .await
        .map_err(|e| api_error(METADATA_ERROR, context, id, e))?;
    let acl = api
        .get_directory_acl(path)
        .await
        .map_err(|e| api_error(ACL_ERROR, context, id, e))?;
    Ok((meta, acl))
}

fn to_state(id: &ResourceId, attrs: HashMap<String, Value>, full_path: &str) -> State {
    State::existing(id.clone(), attrs).with_identifier(full_path)
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating File System..");
    let plan = FilesystemConfig::from_attributes(&resource.id, &resource.attributes)?;
    let path = plan.full_path();

    debug!("Creating directory {}", path);
    let options = CreateDirectoryOptions {
        overwrite: plan.overwrite,
        recursive: plan.recursive,
        access_control: plan.access_control.clone(),
    };
    api.create_directory(&path, &options)
        .await
        .map_err(|e| api_error("Error creating File System", CREATE_ERROR, &resource.id, e))?;

    debug!("Setting owner and group of {}", path);
    api.set_directory_acl(&path, &plan.owner_group_acl())
        .await
        .map_err(|e| {
            api_error(
                "Error Setting User / Groups for the filesystem",
                CREATE_ERROR,
                &resource.id,
                e,
            )
        })?;

    let (meta, acl) = fetch(api, &path, &resource.id, CREATE_ERROR).await?;
    let attrs = reconcile(&resource.attributes, &path, &meta, &acl);
    info!("Done with Create File System resource");
    Ok(to_state(&resource.id, attrs, &path))
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Read File System Resource..");
    let config = FilesystemConfig::from_attributes(&prior.id, &prior.attributes)?;
    let path = config.full_path();

    let meta = match api.get_directory_metadata(&path).await {
        Err(e) if e.is_not_found() => {
            info!("File System {} no longer exists", path);
            return Ok(State::not_found(prior.id.clone()));
        }
        Err(e) => return Err(api_error(METADATA_ERROR, READ_ERROR, &prior.id, e)),
        Ok(meta) => meta,
    };
    let acl = api
        .get_directory_acl(&path)
        .await
        .map_err(|e| api_error(ACL_ERROR, READ_ERROR, &prior.id, e))?;

    let attrs = reconcile(&prior.attributes, &path, &meta, &acl);
    info!("Read File System Resource Complete.");
    Ok(to_state(&prior.id, attrs, &path))
}

pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating File System..");
    let prior = FilesystemConfig::from_attributes(&from.id, &from.attributes)?;
    let plan = FilesystemConfig::from_attributes(&to.id, &to.attributes)?;
    let path = plan.full_path();

    if prior.full_path() != path {
        return Err(ProviderError::new("Error updating File System")
            .with_detail(format!(
                "name and directory_path cannot be changed ({} -> {}), the filesystem must be replaced",
                prior.full_path(),
                path
            ))
            .for_resource(to.id.clone()));
    }

    let mut acl = NamespaceAcl::default();
    let mut modified = false;

    if prior.owner != plan.owner || prior.group != plan.group {
        acl = plan.owner_group_acl();
        modified = true;
    }

    if let Some(mode) = plan.access_control.as_deref()
        && prior.access_control.as_deref() != Some(mode)
    {
        let from_posix = prior.access_control.as_deref().is_none_or(is_posix_mode);
        if !(from_posix && is_posix_mode(mode)) {
            return Err(ProviderError::new("Error updating File System")
                .with_detail("Modification of ACL is only supported from POSIX to POSIX mode")
                .for_resource(to.id.clone()));
        }
        acl.authoritative = Some("mode".to_string());
        acl.mode = Some(mode.to_string());
        modified = true;
    }

    if modified {
        debug!("Updating ACL of {}", path);
        api.set_directory_acl(&path, &acl)
            .await
            .map_err(|e| api_error("Error updating File System", UPDATE_ERROR, &to.id, e))?;
    }

    let (meta, acl) = fetch(api, &path, &to.id, UPDATE_ERROR).await?;
    let attrs = reconcile(&to.attributes, &path, &meta, &acl);
    info!("Done with Update File System resource");
    Ok(to_state(&to.id, attrs, &path))
}

pub async fn delete(api: &dyn PowerScaleApi, state: &State) -> ProviderResult<()> {
    info!("Deleting File System Resource..");
    let config = FilesystemConfig::from_attributes(&state.id, &state.attributes)?;
    api.delete_directory(&config.full_path())
        .await
        .map_err(|e| api_error("Error Deleting filesystem", DELETE_ERROR, &state.id, e))?;
    info!("Delete File system complete");
    Ok(())
}
