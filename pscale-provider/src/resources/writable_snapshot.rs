//! Writable snapshot resource
//!
//! A writable snapshot cannot be modified in place. Changing the source
//! snapshot or the destination path deletes the current one and creates a
//! new one.

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::{WritableSnapshot, WritableSnapshotParams};
use pscale_core::provider::ProviderResult;
use pscale_core::resource::{Resource, ResourceId, State, Value, require_str};

use crate::utils::{api_error, changed};

const CREATE_ERROR: &str = "Could not create writable snapshot";
const READ_ERROR: &str = "Could not read writable snapshot";
const DELETE_ERROR: &str = "Could not delete writable snapshot";

/// Copy the server-computed fields into state
pub fn reconcile(
    plan: &HashMap<String, Value>,
    writable: &WritableSnapshot,
) -> HashMap<String, Value> {
    let mut attrs = plan.clone();
    attrs.insert("dst_path".to_string(), Value::String(writable.dst_path.clone()));
    attrs.insert("src_snap".to_string(), Value::String(writable.src_snap.clone()));
    attrs.insert("id".to_string(), Value::Int(writable.id));
    attrs.insert("created".to_string(), Value::Int(writable.created));
    attrs.insert("log_size".to_string(), Value::Int(writable.log_size));
    attrs.insert("phys_size".to_string(), Value::Int(writable.phys_size));
    attrs.insert("src_id".to_string(), Value::Int(writable.src_id));
    attrs.insert("src_path".to_string(), Value::String(writable.src_path.clone()));
    attrs.insert("state".to_string(), Value::String(writable.state.clone()));
    attrs
}

fn to_state(id: &ResourceId, attrs: HashMap<String, Value>, writable: &WritableSnapshot) -> State {
    State::existing(id.clone(), attrs).with_identifier(writable.dst_path.clone())
}

async fn create_from(
    api: &dyn PowerScaleApi,
    id: &ResourceId,
    attrs: &HashMap<String, Value>,
) -> ProviderResult<State> {
    let params = WritableSnapshotParams {
        src_snap: require_str(id, attrs, "snap_id")?.to_string(),
        dst_path: require_str(id, attrs, "dst_path")?.to_string(),
    };

    debug!(
        "Creating writable snapshot {} from {}",
        params.dst_path, params.src_snap
    );
    let writable = api
        .create_writable_snapshot(&params)
        .await
        .map_err(|e| api_error("Error creating writable snapshot", CREATE_ERROR, id, e))?;

    Ok(to_state(id, reconcile(attrs, &writable), &writable))
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating writable snapshot..");
    let state = create_from(api, &resource.id, &resource.attributes).await?;
    info!("Done with Create writable snapshot resource");
    Ok(state)
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Reading writable snapshot resource");
    let dst_path = prior.require_str("dst_path")?;

    let writable = match api.get_writable_snapshot(dst_path).await {
        Err(e) if e.is_not_found() => return Ok(State::not_found(prior.id.clone())),
        Err(e) => {
            return Err(api_error(
                "Error reading writable snapshot",
                READ_ERROR,
                &prior.id,
                e,
            ));
        }
        Ok(writable) => writable,
    };

    let attrs = reconcile(&prior.attributes, &writable);
    info!("Done with Read writable snapshot resource");
    Ok(to_state(&prior.id, attrs, &writable))
}

/// Re-create the writable snapshot when its source or destination changes
///
/// The old snapshot is deleted first; if the create then fails it is not
/// restored.
pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating writable snapshot resource");

    if !changed(&from.attributes, &to.attributes, &["snap_id", "dst_path"]) {
        return read(api, from).await.map(|state| State {
            id: to.id.clone(),
            ..state
        });
    }

    delete(api, from).await?;
    let state = create_from(api, &to.id, &to.attributes).await?;
    info!("Done with Update writable snapshot resource");
    Ok(state)
}

pub async fn delete(api: &dyn PowerScaleApi, state: &State) -> ProviderResult<()> {
    info!("Deleting writable snapshot resource");
    let dst_path = state.require_str("dst_path")?;
    api.delete_writable_snapshot(dst_path)
        .await
        .map_err(|e| {
            api_error(
                "Error deleting writable snapshot",
                DELETE_ERROR,
                &state.id,
                e,
            )
        })?;
    info!("Done with Delete writable snapshot resource");
    Ok(())
}
