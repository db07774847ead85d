//! Provider - Trait abstracting resource operations
//!
//! A Provider exposes create/read/update/delete for its resource types and a
//! read operation for its data sources. It is constructed with its API client
//! already in hand, so no operation needs to discover its collaborators at
//! runtime.

use std::future::Future;
use std::pin::Pin;

use crate::resource::{Resource, ResourceId, State};
use crate::schema::ResourceSchema;

/// Error type for Provider operations
///
/// `summary` is the short, operation-specific headline and `detail` the
/// human-readable message extracted from the underlying failure.
#[derive(Debug)]
pub struct ProviderError {
    pub summary: String,
    pub detail: Option<String>,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] ", id.resource_type, id.name)?;
        }
        write!(f, "{}", self.summary)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: None,
            resource_id: None,
            cause: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Definition of resource or data source types that a Provider can handle
pub trait ResourceType: Send + Sync {
    /// Type name without the provider prefix (e.g., "filesystem")
    fn name(&self) -> &'static str;

    /// Attribute schema for this type
    fn schema(&self) -> ResourceSchema;
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "powerscale")
    fn name(&self) -> &'static str;

    /// Resource types this Provider can manage
    fn resource_types(&self) -> Vec<Box<dyn ResourceType>>;

    /// Data source types this Provider can read
    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        Vec::new()
    }

    /// Schema for a resource type, if known
    fn resource_schema(&self, resource_type: &str) -> Option<ResourceSchema> {
        self.resource_types()
            .into_iter()
            .find(|t| t.name() == resource_type)
            .map(|t| t.schema())
    }

    /// Schema for a data source type, if known
    fn data_source_schema(&self, data_source_type: &str) -> Option<ResourceSchema> {
        self.data_source_types()
            .into_iter()
            .find(|t| t.name() == data_source_type)
            .map(|t| t.schema())
    }

    /// Get the current state of a resource from its prior state
    ///
    /// Returns `State::not_found()` if the resource no longer exists.
    fn read(&self, prior: &State) -> BoxFuture<'_, ProviderResult<State>>;

    /// Create a resource
    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>>;

    /// Update a resource from its prior state to the desired configuration
    fn update(&self, from: &State, to: &Resource) -> BoxFuture<'_, ProviderResult<State>>;

    /// Delete a resource
    fn delete(&self, state: &State) -> BoxFuture<'_, ProviderResult<()>>;

    /// Read a data source
    fn read_data_source(&self, config: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let id = config.id.clone();
        Box::pin(async move {
            Err(ProviderError::new(format!(
                "Unknown data source type: {}",
                id.resource_type
            ))
            .for_resource(id))
        })
    }
}

/// Provider implementation for Box<dyn Provider>
/// This enables dynamic dispatch for Providers
impl Provider for Box<dyn Provider> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        (**self).resource_types()
    }

    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        (**self).data_source_types()
    }

    fn read(&self, prior: &State) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).read(prior)
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).create(resource)
    }

    fn update(&self, from: &State, to: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).update(from, to)
    }

    fn delete(&self, state: &State) -> BoxFuture<'_, ProviderResult<()>> {
        (**self).delete(state)
    }

    fn read_data_source(&self, config: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).read_data_source(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType};

    struct EchoType;

    impl ResourceType for EchoType {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new("echo")
                .attribute(AttributeSchema::new("name", AttributeType::String).required())
        }
    }

    // Mock Provider for testing
    struct MockProvider;

    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
            vec![Box::new(EchoType)]
        }

        fn read(&self, prior: &State) -> BoxFuture<'_, ProviderResult<State>> {
            let id = prior.id.clone();
            Box::pin(async move { Ok(State::not_found(id)) })
        }

        fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
            let id = resource.id.clone();
            let attrs = resource.attributes.clone();
            Box::pin(async move { Ok(State::existing(id, attrs).with_identifier("mock-id-123")) })
        }

        fn update(&self, from: &State, to: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
            let id = from.id.clone();
            let attrs = to.attributes.clone();
            Box::pin(async move { Ok(State::existing(id, attrs)) })
        }

        fn delete(&self, _state: &State) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn mock_provider_read_returns_not_found() {
        let provider = MockProvider;
        let prior = State::not_found(ResourceId::new("echo", "example"));
        let state = provider.read(&prior).await.unwrap();
        assert!(!state.exists);
    }

    #[tokio::test]
    async fn mock_provider_create_returns_existing() {
        let provider: Box<dyn Provider> = Box::new(MockProvider);
        let resource = Resource::new("echo", "example");
        let state = provider.create(&resource).await.unwrap();
        assert!(state.exists);
        assert_eq!(state.identifier, Some("mock-id-123".to_string()));
    }

    #[tokio::test]
    async fn unknown_data_source_is_an_error() {
        let provider = MockProvider;
        let config = Resource::new("nothing", "x").with_read_only(true);
        let err = provider.read_data_source(&config).await.unwrap_err();
        assert!(err.to_string().contains("Unknown data source type: nothing"));
    }

    #[test]
    fn schema_lookup_by_name() {
        let provider = MockProvider;
        assert!(provider.resource_schema("echo").is_some());
        assert!(provider.resource_schema("other").is_none());
        assert!(provider.data_source_schema("echo").is_none());
    }

    #[test]
    fn error_display_includes_detail() {
        let err = ProviderError::new("Error creating File System")
            .with_detail("could not create directory")
            .for_resource(ResourceId::new("filesystem", "home"));
        assert_eq!(
            err.to_string(),
            "[filesystem.home] Error creating File System: could not create directory"
        );
    }
}
