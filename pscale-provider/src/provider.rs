//! PowerScale Provider implementation
//!
//! Dispatches each operation to the handler module of its resource type.
//! The API client is handed over at construction, so handlers receive a
//! ready `PowerScaleApi` and never inspect an opaque handle.

use std::sync::Arc;

use log::debug;
use pscale_client::{ClientConfig, PowerScaleApi, PowerScaleClient};
use pscale_core::provider::{ProviderError, ProviderResult};
use pscale_core::resource::{Resource, ResourceId, State};
use pscale_core::schema::ResourceSchema;

use crate::resources::{
    filesystem, groupnet, groupnet_data_source, smb_share, snapshot, snapshot_restore,
    writable_snapshot,
};
use crate::schemas;
use crate::utils::error_detail;

fn unknown_type(id: &ResourceId) -> ProviderError {
    ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
        .for_resource(id.clone())
}

fn unknown_data_source(id: &ResourceId) -> ProviderError {
    ProviderError::new(format!("Unknown data source type: {}", id.resource_type))
        .for_resource(id.clone())
}

/// PowerScale Provider
pub struct PowerScaleProvider {
    api: Arc<dyn PowerScaleApi>,
}

impl PowerScaleProvider {
    /// Create a provider around an already constructed API client
    pub fn new(api: Arc<dyn PowerScaleApi>) -> Self {
        Self { api }
    }

    /// Create a provider talking HTTP to the cluster described by `config`
    pub fn from_config(config: &ClientConfig) -> ProviderResult<Self> {
        let client = PowerScaleClient::new(config).map_err(|e| {
            ProviderError::new("Unable to create powerscale client")
                .with_detail(error_detail(&e))
                .with_cause(e)
        })?;
        Ok(Self::new(Arc::new(client)))
    }

    fn api(&self) -> &dyn PowerScaleApi {
        self.api.as_ref()
    }

    /// Apply schema defaults and validate the configuration
    fn prepare(&self, resource: &Resource) -> ProviderResult<Resource> {
        let find = |schemas: Vec<ResourceSchema>| {
            schemas
                .into_iter()
                .find(|s| s.resource_type == resource.id.resource_type)
        };
        let schema = if resource.is_data_source() {
            find(schemas::data_source_schemas()).ok_or_else(|| unknown_data_source(&resource.id))?
        } else {
            find(schemas::resource_schemas()).ok_or_else(|| unknown_type(&resource.id))?
        };

        let mut prepared = resource.clone();
        schema.apply_defaults(&mut prepared.attributes);
        validate(&schema, &prepared)?;
        Ok(prepared)
    }

    /// Create a resource using its configuration
    pub async fn create_resource(&self, resource: Resource) -> ProviderResult<State> {
        let resource = self.prepare(&resource)?;
        debug!("create {}", resource.id);
        let api = self.api();

        match resource.id.resource_type.as_str() {
            "filesystem" => filesystem::create(api, &resource).await,
            "smb_share" => smb_share::create(api, &resource).await,
            "snapshot" => snapshot::create(api, &resource).await,
            "writable_snapshot" => writable_snapshot::create(api, &resource).await,
            "groupnet" => groupnet::create(api, &resource).await,
            "snapshot_restore" => snapshot_restore::create(api, &resource).await,
            _ => Err(unknown_type(&resource.id)),
        }
    }

    /// Refresh a resource from its prior state
    pub async fn read_resource(&self, prior: State) -> ProviderResult<State> {
        debug!("read {}", prior.id);
        let api = self.api();

        match prior.id.resource_type.as_str() {
            "filesystem" => filesystem::read(api, &prior).await,
            "smb_share" => smb_share::read(api, &prior).await,
            "snapshot" => snapshot::read(api, &prior).await,
            "writable_snapshot" => writable_snapshot::read(api, &prior).await,
            "groupnet" => groupnet::read(api, &prior).await,
            "snapshot_restore" => snapshot_restore::read(api, &prior).await,
            _ => Err(unknown_type(&prior.id)),
        }
    }

    /// Move a resource from its prior state to the desired configuration
    pub async fn update_resource(&self, from: State, to: Resource) -> ProviderResult<State> {
        let to = self.prepare(&to)?;
        debug!("update {}", to.id);
        let api = self.api();

        match to.id.resource_type.as_str() {
            "filesystem" => filesystem::update(api, &from, &to).await,
            "smb_share" => smb_share::update(api, &from, &to).await,
            "snapshot" => snapshot::update(api, &from, &to).await,
            "writable_snapshot" => writable_snapshot::update(api, &from, &to).await,
            "groupnet" => groupnet::update(api, &from, &to).await,
            "snapshot_restore" => snapshot_restore::update(api, &from, &to).await,
            _ => Err(unknown_type(&to.id)),
        }
    }

    /// Delete a resource
    pub async fn delete_resource(&self, state: State) -> ProviderResult<()> {
        debug!("delete {}", state.id);
        let api = self.api();

        match state.id.resource_type.as_str() {
            "filesystem" => filesystem::delete(api, &state).await,
            "smb_share" => smb_share::delete(api, &state).await,
            "snapshot" => snapshot::delete(api, &state).await,
            "writable_snapshot" => writable_snapshot::delete(api, &state).await,
            "groupnet" => groupnet::delete(api, &state).await,
            "snapshot_restore" => snapshot_restore::delete(api, &state).await,
            _ => Err(unknown_type(&state.id)),
        }
    }

    /// Read a data source
    pub async fn read_data_source_config(&self, config: Resource) -> ProviderResult<State> {
        let config = self.prepare(&config.with_read_only(true))?;
        debug!("read data source {}", config.id);

        match config.id.resource_type.as_str() {
            "groupnet" => groupnet_data_source::read(self.api(), &config).await,
            _ => Err(unknown_data_source(&config.id)),
        }
    }
}

fn validate(schema: &ResourceSchema, resource: &Resource) -> ProviderResult<()> {
    schema.validate(&resource.attributes).map_err(|errors| {
        let detail = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        ProviderError::new("Invalid configuration")
            .with_detail(detail)
            .for_resource(resource.id.clone())
    })
}
