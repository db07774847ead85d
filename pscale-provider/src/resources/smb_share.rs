//! SMB share resource

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::{SmbPermission, SmbShare};
use pscale_core::provider::ProviderResult;
use pscale_core::resource::{AttributeMap, Resource, State, Value};

use crate::utils::{api_error, member_from_attr, member_to_value, set_if_some};

const CREATE_ERROR: &str = "Could not create SMB share";
const READ_ERROR: &str = "Could not read SMB share";
const UPDATE_ERROR: &str = "Could not update SMB share";
const DELETE_ERROR: &str = "Could not delete SMB share";

fn permissions_from_attr(attrs: &HashMap<String, Value>) -> Option<Vec<SmbPermission>> {
    let items = attrs.get_list("permissions")?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::Map(map) => Some(SmbPermission {
                    permission: map.get_str("permission").unwrap_or_default().to_string(),
                    permission_type: map
                        .get_str("permission_type")
                        .unwrap_or_default()
                        .to_string(),
                    trustee: member_from_attr(map, "trustee").unwrap_or_default(),
                }),
                _ => None,
            })
            .collect(),
    )
}

fn permission_to_value(permission: &SmbPermission) -> Value {
    let mut map = HashMap::new();
    map.insert(
        "permission".to_string(),
        Value::String(permission.permission.clone()),
    );
    map.insert(
        "permission_type".to_string(),
        Value::String(permission.permission_type.clone()),
    );
    map.insert("trustee".to_string(), member_to_value(&permission.trustee));
    Value::Map(map)
}

/// Request body for the configured share attributes
pub fn share_from_attributes(attrs: &HashMap<String, Value>) -> SmbShare {
    SmbShare {
        id: None,
        name: attrs.get_str("name").map(str::to_string),
        path: attrs.get_str("path").map(str::to_string),
        description: attrs.get_str("description").map(str::to_string),
        browsable: attrs.get_bool("browsable"),
        ca_timeout: attrs.get_int("ca_timeout"),
        file_filtering_enabled: attrs.get_bool("file_filtering_enabled"),
        hide_dot_files: attrs.get_bool("hide_dot_files"),
        access_based_enumeration: attrs.get_bool("access_based_enumeration"),
        permissions: permissions_from_attr(attrs),
        zid: None,
    }
}

/// Build share state from the configuration and the server's view
pub fn reconcile(plan: &HashMap<String, Value>, share: &SmbShare) -> HashMap<String, Value> {
    let mut attrs = plan.clone();
    set_if_some(&mut attrs, "id", share.id.clone().map(Value::String));
    set_if_some(&mut attrs, "name", share.name.clone().map(Value::String));
    set_if_some(&mut attrs, "path", share.path.clone().map(Value::String));
    set_if_some(&mut attrs, "zid", share.zid.map(Value::Int));
    set_if_some(
        &mut attrs,
        "description",
        share.description.clone().map(Value::String),
    );
    set_if_some(&mut attrs, "browsable", share.browsable.map(Value::Bool));
    set_if_some(&mut attrs, "ca_timeout", share.ca_timeout.map(Value::Int));
    set_if_some(
        &mut attrs,
        "file_filtering_enabled",
        share.file_filtering_enabled.map(Value::Bool),
    );
    set_if_some(
        &mut attrs,
        "hide_dot_files",
        share.hide_dot_files.map(Value::Bool),
    );
    set_if_some(
        &mut attrs,
        "access_based_enumeration",
        share.access_based_enumeration.map(Value::Bool),
    );
    set_if_some(
        &mut attrs,
        "permissions",
        share
            .permissions
            .as_ref()
            .map(|p| Value::List(p.iter().map(permission_to_value).collect())),
    );
    attrs
}

fn share_id(state: &State) -> ProviderResult<&str> {
    match state.identifier.as_deref() {
        Some(identifier) => Ok(identifier),
        None => state.require_str("id"),
    }
}

/// Keep `want` only when it differs from `have`
fn changed<T: PartialEq>(want: Option<T>, have: Option<T>) -> Option<T> {
    match want {
        Some(w) if have.as_ref() != Some(&w) => Some(w),
        _ => None,
    }
}

pub async fn create(api: &dyn PowerScaleApi, resource: &Resource) -> ProviderResult<State> {
    info!("Creating SMB share..");
    let zone = resource.attributes.get_str("zone");
    let body = share_from_attributes(&resource.attributes);

    let id = api
        .create_smb_share(&body, zone)
        .await
        .map_err(|e| api_error("Error creating smb share", CREATE_ERROR, &resource.id, e))?;
    debug!("Created SMB share {}", id);

    let share = api
        .get_smb_share(&id, zone)
        .await
        .map_err(|e| api_error("Error getting smb share", CREATE_ERROR, &resource.id, e))?;

    let attrs = reconcile(&resource.attributes, &share);
    info!("Done with Create SMB share resource");
    Ok(State::existing(resource.id.clone(), attrs).with_identifier(id))
}

pub async fn read(api: &dyn PowerScaleApi, prior: &State) -> ProviderResult<State> {
    info!("Reading SMB share resource");
    let id = share_id(prior)?;
    let zone = prior.attributes.get_str("zone");

    let share = match api.get_smb_share(id, zone).await {
        Err(e) if e.is_not_found() => return Ok(State::not_found(prior.id.clone())),
        Err(e) => return Err(api_error("Error reading smb share", READ_ERROR, &prior.id, e)),
        Ok(share) => share,
    };

    let attrs = reconcile(&prior.attributes, &share);
    info!("Done with Read SMB share resource");
    Ok(State::existing(prior.id.clone(), attrs).with_identifier(id))
}

pub async fn update(api: &dyn PowerScaleApi, from: &State, to: &Resource) -> ProviderResult<State> {
    info!("Updating SMB share resource");
    let id = share_id(from)?;
    let zone = to.attributes.get_str("zone");
    let desired = share_from_attributes(&to.attributes);
    let current = share_from_attributes(&from.attributes);

    let body = SmbShare {
        name: changed(desired.name.clone(), current.name),
        path: changed(desired.path, current.path),
        description: changed(desired.description, current.description),
        browsable: changed(desired.browsable, current.browsable),
        ca_timeout: changed(desired.ca_timeout, current.ca_timeout),
        file_filtering_enabled: changed(
            desired.file_filtering_enabled,
            current.file_filtering_enabled,
        ),
        hide_dot_files: changed(desired.hide_dot_files, current.hide_dot_files),
        access_based_enumeration: changed(
            desired.access_based_enumeration,
            current.access_based_enumeration,
        ),
        permissions: changed(desired.permissions, current.permissions),
        ..Default::default()
    };

    let new_id = body.name.clone().unwrap_or_else(|| id.to_string());
    if body != SmbShare::default() {
        debug!("Updating SMB share {}", id);
        api.update_smb_share(id, &body, zone)
            .await
            .map_err(|e| api_error("Error updating smb share", UPDATE_ERROR, &to.id, e))?;
    }

    let share = api
        .get_smb_share(&new_id, zone)
        .await
        .map_err(|e| api_error("Error getting smb share", UPDATE_ERROR, &to.id, e))?;

    let attrs = reconcile(&to.attributes, &share);
    info!("Done with Update SMB share resource");
    Ok(State::existing(to.id.clone(), attrs).with_identifier(new_id))
}

pub async fn delete(api: &dyn PowerScaleApi, state: &State) -> ProviderResult<()> {
    info!("Deleting SMB share resource");
    let id = share_id(state)?;
    api.delete_smb_share(id, state.attributes.get_str("zone"))
        .await
        .map_err(|e| api_error("Error deleting smb share", DELETE_ERROR, &state.id, e))?;
    info!("Done with Delete SMB share resource");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeApi;

    fn share() -> Resource {
        Resource::new("smb_share", "share1")
            .with_attribute("name", Value::String("share1".to_string()))
            .with_attribute("path", Value::String("/ifs/data/share1".to_string()))
            .with_attribute("zone", Value::String("System".to_string()))
    }

    #[tokio::test]
    async fn create_fills_server_defaults() {
        let api = FakeApi::new();
        let state = create(&api, &share()).await.unwrap();

        assert_eq!(state.identifier.as_deref(), Some("share1"));
        assert_eq!(state.attributes.get_str("id"), Some("share1"));
        assert_eq!(state.attributes.get_int("zid"), Some(1));
        assert_eq!(state.attributes.get_bool("browsable"), Some(true));
        assert_eq!(state.attributes.get_str("zone"), Some("System"));
    }

    #[tokio::test]
    async fn update_sends_only_changed_fields() {
        let api = FakeApi::new();
        let created = create(&api, &share()).await.unwrap();
        let desired = share().with_attribute("description", Value::String("docs".to_string()));

        let state = update(&api, &created, &desired).await.unwrap();

        assert_eq!(state.attributes.get_str("description"), Some("docs"));
        assert!(api.calls().contains(&"update_smb_share share1".to_string()));
    }

    #[tokio::test]
    async fn unchanged_update_skips_request() {
        let api = FakeApi::new();
        let created = create(&api, &share()).await.unwrap();

        update(&api, &created, &share()).await.unwrap();
        assert!(!api.calls().iter().any(|c| c.starts_with("update_smb_share")));
    }

    #[tokio::test]
    async fn rename_reads_new_id() {
        let api = FakeApi::new();
        let created = create(&api, &share()).await.unwrap();
        let desired = share().with_attribute("name", Value::String("share2".to_string()));

        let state = update(&api, &created, &desired).await.unwrap();
        assert_eq!(state.identifier.as_deref(), Some("share2"));
        assert_eq!(state.attributes.get_str("id"), Some("share2"));
    }

    #[tokio::test]
    async fn read_after_delete_is_not_found() {
        let api = FakeApi::new();
        let created = create(&api, &share()).await.unwrap();

        delete(&api, &created).await.unwrap();
        assert_eq!(api.share_count(), 0);

        let state = read(&api, &created).await.unwrap();
        assert!(!state.exists);
    }

    #[tokio::test]
    async fn duplicate_create_reports_api_message() {
        let api = FakeApi::new();
        create(&api, &share()).await.unwrap();

        let err = create(&api, &share()).await.unwrap_err();
        assert_eq!(err.summary, "Error creating smb share");
        assert!(err.detail.unwrap().ends_with("Share share1 already exists"));
    }

    #[test]
    fn permissions_round_trip_through_state() {
        let permission = SmbPermission {
            permission: "full".to_string(),
            permission_type: "allow".to_string(),
            trustee: pscale_client::models::MemberObject::new("SID:S-1-1-0", "Everyone", "wellknown"),
        };
        let server = SmbShare {
            id: Some("share1".to_string()),
            permissions: Some(vec![permission.clone()]),
            ..Default::default()
        };

        let attrs = reconcile(&share().attributes, &server);
        assert_eq!(permissions_from_attr(&attrs), Some(vec![permission]));
        assert_eq!(reconcile(&attrs, &server), attrs);
    }
}
