//! Snapshot restore resource
//!
//! Creating the resource starts a SnapRevert job. The job runs on the
//! cluster independently: reading records the job's current state, and
//! deleting only drops local state. A job purged from the job history
//! keeps its last recorded state.

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::JobRequest;
use pscale_core::provider::{ProviderError, ProviderResult};
use pscale_core::resource::{AttributeMap, Resource, ResourceId, State, Value};

use crate::utils::{api_error, changed};

const RESTORE_ERROR: &str = "Could not restore snapshot";

/// Which snapshot to revert to
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRef {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnaprevertConfig {
    pub snapshot: SnapshotRef,
    pub allow_dup: Option<bool>,
}

impl SnaprevertConfig {
    /// Read `snaprevert_params`. `snapshot_id` wins when both it and
    /// `snapshot_name` are set.
    pub fn from_attributes(id: &ResourceId, attrs: &HashMap<String, Value>) -> ProviderResult<Self> {
        let invalid = |detail: String| {
            ProviderError::new("Error restoring snapshot")
                .with_detail(detail)
                .for_resource(id.clone())
        };

        let params = attrs
            .get_map("snaprevert_params")
            .ok_or_else(|| invalid("snaprevert_params must be set".to_string()))?;

        let snapshot = match (params.get_str("snapshot_id"), params.get_str("snapshot_name")) {
            (Some(snapshot_id), _) => SnapshotRef::Id(snapshot_id.parse().map_err(|_| {
                invalid(format!("snapshot_id '{}' is not a valid snapshot ID", snapshot_id))
            })?),
            (None, Some(name)) => SnapshotRef::Name(name.to_string()),
            (None, None) => {
                return Err(invalid(
                    "either snapshot_id or snapshot_name must be set".to_string(),
                ));
            }
        };

        Ok(Self {
            snapshot,
            allow_dup: params.get_bool("allow_dup"),
        })
    }
}

async fn resolve_snapshot_id(
    api: &dyn PowerScaleApi,
    id: &ResourceId,
    snapshot: &SnapshotRef,
) -> ProviderResult<i64> {
    let name = match snapshot {
        SnapshotRef::Id(snapshot_id) => return Ok(*snapshot_id),
        SnapshotRef::Name(name) => name,
    };

    let snapshots = api
        .list_snapshots()
        .await
        .map_err(|e| api_error("Error getting the list of snapshots", RESTORE_ERROR, id, e))?;

    snapshots
        .iter()
        .find(|s| &s.name == name)
        .map(|s| s.id)
        .ok_or_else(|| {
            ProviderError::new("Error restoring snapshot")
                .with_detail(format!("Snapshot with name '{}' not found", name))
                .for_resource(id.clone())
        })
}

async fn start_revert(
    api: &dyn PowerScaleApi,
    id: &ResourceId,
    attrs: &HashMap<String, Value>,
) -> ProviderResult<State> {
    let config = SnaprevertConfig::from_attributes(id, attrs)?;
    let snapshot_id = resolve_snapshot_id(api, id, &config.snapshot).await?;

    debug!("Starting SnapRevert job for snapshot {}", snapshot_id);
    let job_id = api
        .create_job(&JobRequest::snap_revert(snapshot_id, config.allow_dup))
        .await
        .map_err(|e| api_error("Error restoring snapshot", RESTORE_ERROR, id, e))?;

    let mut state_attrs = attrs.clone();
    state_attrs.insert("id".to_string(), Value::String(job_id.to_string()));
    state_attrs.insert("job_id".to_string(), Value::Int(job_id));
    Ok(State::existing(id.clone(), state_attrs).with_identifier(job_id.to_string()))
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating snapshot restore..");
    let state = start_revert(api, &resource.id, &resource.attributes).await?;
    info!("Done with Create snapshot restore resource");
    Ok(state)
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Reading snapshot restore resource");
    let Some(job_id) = prior.attributes.get_int("job_id") else {
        return Ok(prior.clone());
    };

    let job = match api.get_job(job_id).await {
        Ok(job) => job,
        Err(e) if e.is_not_found() => {
            debug!("SnapRevert job {} is no longer in the job history", job_id);
            return Ok(prior.clone());
        }
        Err(e) => {
            return Err(api_error(
                "Error reading snapshot restore",
                &format!("Could not read SnapRevert job {}", job_id),
                &prior.id,
                e,
            ));
        }
    };

    let mut state = prior.clone();
    state
        .attributes
        .insert("job_state".to_string(), Value::String(job.state));
    Ok(state)
}

pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating snapshot restore resource");
    if !changed(&from.attributes, &to.attributes, &["snaprevert_params"]) {
        return Ok(State {
            id: to.id.clone(),
            ..from.clone()
        });
    }

    let state = start_revert(api, &to.id, &to.attributes).await?;
    info!("Done with Update snapshot restore resource");
    Ok(state)
}

pub async fn delete(_api: &dyn PowerScaleApi, _state: &State) -> ProviderResult<()> {
    info!("Deleting snapshot restore resource");
    Ok(())
}
