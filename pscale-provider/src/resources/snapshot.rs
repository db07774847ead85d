//! Snapshot resource

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::{Snapshot, SnapshotParams};
use pscale_core::provider::{ProviderError, ProviderResult};
use pscale_core::resource::{AttributeMap, Resource, ResourceId, State, Value};

use crate::utils::{api_error, set_opt};

const CREATE_ERROR: &str = "Could not create snapshot";
const READ_ERROR: &str = "Could not read snapshot";
const UPDATE_ERROR: &str = "Could not update snapshot";
const DELETE_ERROR: &str = "Could not delete snapshot";

/// `expires` value that removes the expiration
const NO_EXPIRY: i64 = 0;

fn params_from_attributes(attrs: &HashMap<String, Value>) -> SnapshotParams {
    SnapshotParams {
        name: attrs.get_str("name").map(str::to_string),
        path: attrs.get_str("path").map(str::to_string),
        expires: attrs.get_int("expires"),
        alias: attrs.get_str("alias").map(str::to_string),
    }
}

/// Build snapshot state from the configuration and the server's view
pub fn reconcile(plan: &HashMap<String, Value>, snapshot: &Snapshot) -> HashMap<String, Value> {
    let mut attrs = plan.clone();
    attrs.insert("id".to_string(), Value::String(snapshot.id.to_string()));
    attrs.insert("name".to_string(), Value::String(snapshot.name.clone()));
    attrs.insert("path".to_string(), Value::String(snapshot.path.clone()));
    attrs.insert("created".to_string(), Value::Int(snapshot.created));
    attrs.insert("size".to_string(), Value::Int(snapshot.size));
    attrs.insert("state".to_string(), Value::String(snapshot.state.clone()));
    set_opt(&mut attrs, "expires", snapshot.expires.map(Value::Int));
    set_opt(
        &mut attrs,
        "target_name",
        snapshot.target_name.clone().map(Value::String),
    );
    attrs
}

fn snapshot_id(state: &State) -> ProviderResult<&str> {
    match state.identifier.as_deref() {
        Some(identifier) => Ok(identifier),
        None => state.require_str("id"),
    }
}

fn to_state(id: &ResourceId, attrs: HashMap<String, Value>, snapshot: &Snapshot) -> State {
    State::existing(id.clone(), attrs).with_identifier(snapshot.id.to_string())
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating snapshot..");
    let params = params_from_attributes(&resource.attributes);

    let snapshot = api
        .create_snapshot(&params)
        .await
        .map_err(|e| api_error("Error creating snapshot", CREATE_ERROR, &resource.id, e))?;
    debug!("Created snapshot {} ({})", snapshot.id, snapshot.name);

    let attrs = reconcile(&resource.attributes, &snapshot);
    info!("Done with Create snapshot resource");
    Ok(to_state(&resource.id, attrs, &snapshot))
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Reading snapshot resource");
    let id = snapshot_id(prior)?;

    let snapshot = match api.get_snapshot(id).await {
        Err(e) if e.is_not_found() => return Ok(State::not_found(prior.id.clone())),
        Err(e) => return Err(api_error("Error reading snapshot", READ_ERROR, &prior.id, e)),
        Ok(snapshot) => snapshot,
    };

    let attrs = reconcile(&prior.attributes, &snapshot);
    info!("Done with Read snapshot resource");
    Ok(to_state(&prior.id, attrs, &snapshot))
}

pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating snapshot resource");
    let id = snapshot_id(from)?;
    let desired = params_from_attributes(&to.attributes);

    if desired.path.as_deref() != from.attributes.get_str("path") {
        return Err(ProviderError::new("Error updating snapshot")
            .with_detail("path cannot be changed, the snapshot must be replaced")
            .for_resource(to.id.clone()));
    }

    let mut params = SnapshotParams {
        path: None,
        ..desired
    };
    // Unset fields are not sent, so a field dropped from the configuration
    // has to be cleared explicitly.
    if params.expires.is_none() && from.attributes.get_int("expires").is_some() {
        params.expires = Some(NO_EXPIRY);
    }
    if params.alias.is_none() && from.attributes.get_str("alias").is_some() {
        params.alias = Some(String::new());
    }
    api.update_snapshot(id, &params)
        .await
        .map_err(|e| api_error("Error updating snapshot", UPDATE_ERROR, &to.id, e))?;

    let snapshot = api
        .get_snapshot(id)
        .await
        .map_err(|e| api_error("Error reading snapshot", UPDATE_ERROR, &to.id, e))?;

    let attrs = reconcile(&to.attributes, &snapshot);
    info!("Done with Update snapshot resource");
    Ok(to_state(&to.id, attrs, &snapshot))
}

pub async fn delete(api: &dyn PowerScaleApi, state: &State) -> ProviderResult<()> {
    info!("Deleting snapshot resource");
    let id = snapshot_id(state)?;
    api.delete_snapshot(id)
        .await
        .map_err(|e| api_error("Error deleting snapshot", DELETE_ERROR, &state.id, e))?;
    info!("Done with Delete snapshot resource");
    Ok(())
}
