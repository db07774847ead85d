//! Groupnet resource

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::{Groupnet, GroupnetParams};
use pscale_core::provider::ProviderResult;
use pscale_core::resource::{AttributeMap, Resource, State, Value};

use crate::utils::api_error;

const CREATE_ERROR: &str = "Could not create groupnet";
const READ_ERROR: &str = "Could not read groupnet";
const UPDATE_ERROR: &str = "Could not update groupnet";
const DELETE_ERROR: &str = "Could not delete groupnet";

pub fn params_from_attributes(attrs: &HashMap<String, Value>) -> GroupnetParams {
    GroupnetParams {
        name: attrs.get_str("name").map(str::to_string),
        description: attrs.get_str("description").map(str::to_string),
        allow_wildcard_subdomains: attrs.get_bool("allow_wildcard_subdomains"),
        dns_cache_enabled: attrs.get_bool("dns_cache_enabled"),
        dns_resolver_rotate: attrs.get_bool("dns_resolver_rotate"),
        server_side_dns_search: attrs.get_bool("server_side_dns_search"),
        dns_search: attrs.get_str_list("dns_search"),
        dns_servers: attrs.get_str_list("dns_servers"),
    }
}

/// Groupnet fields as attributes, as used in both state and data source entries
pub fn groupnet_to_attributes(groupnet: &Groupnet) -> HashMap<String, Value> {
    let mut attrs = HashMap::new();
    attrs.insert("id".to_string(), Value::String(groupnet.id.clone()));
    attrs.insert("name".to_string(), Value::String(groupnet.name.clone()));
    attrs.insert(
        "description".to_string(),
        Value::String(groupnet.description.clone()),
    );
    attrs.insert(
        "allow_wildcard_subdomains".to_string(),
        Value::Bool(groupnet.allow_wildcard_subdomains),
    );
    attrs.insert(
        "dns_cache_enabled".to_string(),
        Value::Bool(groupnet.dns_cache_enabled),
    );
    attrs.insert(
        "dns_resolver_rotate".to_string(),
        Value::Bool(groupnet.dns_resolver_rotate),
    );
    attrs.insert(
        "server_side_dns_search".to_string(),
        Value::Bool(groupnet.server_side_dns_search),
    );
    attrs.insert(
        "dns_search".to_string(),
        Value::string_list(&groupnet.dns_search),
    );
    attrs.insert(
        "dns_servers".to_string(),
        Value::string_list(&groupnet.dns_servers),
    );
    attrs.insert("subnets".to_string(), Value::string_list(&groupnet.subnets));
    attrs
}

/// Build groupnet state from the configuration and the server's view
pub fn reconcile(plan: &HashMap<String, Value>, groupnet: &Groupnet) -> HashMap<String, Value> {
    let mut attrs = plan.clone();
    attrs.extend(groupnet_to_attributes(groupnet));
    attrs
}

fn groupnet_id(state: &State) -> ProviderResult<&str> {
    match state.identifier.as_deref() {
        Some(identifier) => Ok(identifier),
        None => state.require_str("id"),
    }
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating groupnet..");
    let params = params_from_attributes(&resource.attributes);

    let id = api
        .create_groupnet(&params)
        .await
        .map_err(|e| api_error("Error creating groupnet", CREATE_ERROR, &resource.id, e))?;
    debug!("Created groupnet {}", id);

    let groupnet = api
        .get_groupnet(&id)
        .await
        .map_err(|e| api_error("Error getting groupnet", CREATE_ERROR, &resource.id, e))?;

    let attrs = reconcile(&resource.attributes, &groupnet);
    info!("Done with Create groupnet resource");
    Ok(State::existing(resource.id.clone(), attrs).with_identifier(groupnet.id))
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Reading groupnet resource");
    let id = groupnet_id(prior)?;

    let groupnet = match api.get_groupnet(id).await {
        Err(e) if e.is_not_found() => return Ok(State::not_found(prior.id.clone())),
        Err(e) => return Err(api_error("Error reading groupnet", READ_ERROR, &prior.id, e)),
        Ok(groupnet) => groupnet,
    };

    let attrs = reconcile(&prior.attributes, &groupnet);
    info!("Done with Read groupnet resource");
    Ok(State::existing(prior.id.clone(), attrs).with_identifier(groupnet.id))
}

pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating groupnet resource");
    let id = groupnet_id(from)?;
    let params = params_from_attributes(&to.attributes);
    let new_id = params.name.clone().unwrap_or_else(|| id.to_string());

    api.update_groupnet(id, &params)
        .await
        .map_err(|e| api_error("Error updating groupnet", UPDATE_ERROR, &to.id, e))?;

    let groupnet = api
        .get_groupnet(&new_id)
        .await
        .map_err(|e| api_error("Error getting groupnet", UPDATE_ERROR, &to.id, e))?;

    let attrs = reconcile(&to.attributes, &groupnet);
    info!("Done with Update groupnet resource");
    Ok(State::existing(to.id.clone(), attrs).with_identifier(groupnet.id))
}

pub async fn delete(api: &dyn PowerScaleApi, state: &State) -> ProviderResult<()> {
    info!("Deleting groupnet resource");
    let id = groupnet_id(state)?;
    api.delete_groupnet(id)
        .await
        .map_err(|e| api_error("Error deleting groupnet", DELETE_ERROR, &state.id, e))?;
    info!("Done with Delete groupnet resource");
    Ok(())
}
