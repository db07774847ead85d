//! PowerScale Provider
//!
//! Resources and data sources for Dell PowerScale clusters, built on the
//! helper layer in `pscale-client`.
//!
//! ## Module Structure
//!
//! - `provider` - PowerScaleProvider and the per-type dispatch
//! - `resources` - Handlers for each resource and data source
//! - `schemas` - Attribute schemas
//! - `utils` - Error wrapping and attribute helpers shared by handlers

pub mod provider;
pub mod resources;
pub mod schemas;
pub mod utils;

#[cfg(test)]
mod fake;

pub use provider::PowerScaleProvider;

use pscale_core::provider::{BoxFuture, Provider, ProviderResult, ResourceType};
use pscale_core::resource::{Resource, State};

impl Provider for PowerScaleProvider {
    fn name(&self) -> &'static str {
        "powerscale"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::resource_types()
    }

    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::data_source_types()
    }

    fn read(&self, prior: &State) -> BoxFuture<'_, ProviderResult<State>> {
        let prior = prior.clone();
        Box::pin(async move { self.read_resource(prior).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(resource).await })
    }

    fn update(&self, from: &State, to: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(from, to).await })
    }

    fn delete(&self, state: &State) -> BoxFuture<'_, ProviderResult<()>> {
        let state = state.clone();
        Box::pin(async move { self.delete_resource(state).await })
    }

    fn read_data_source(&self, config: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let config = config.clone();
        Box::pin(async move { self.read_data_source_config(config).await })
    }
}
