//! PowerScale resource and data source schema definitions

pub mod filesystem;
pub mod groupnet;
pub mod smb_share;
pub mod snapshot;
pub mod snapshot_restore;
pub mod writable_snapshot;

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns all resource schemas
pub fn resource_schemas() -> Vec<ResourceSchema> {
    vec![
        filesystem::schema(),
        smb_share::schema(),
        snapshot::schema(),
        writable_snapshot::schema(),
        groupnet::schema(),
        snapshot_restore::schema(),
    ]
}

/// Returns all data source schemas
pub fn data_source_schemas() -> Vec<ResourceSchema> {
    vec![groupnet::data_source_schema()]
}

/// A `{id, name, type}` user or group reference
pub(crate) fn member_type(what: &str) -> AttributeType {
    AttributeType::object([
        AttributeSchema::new("id", AttributeType::String)
            .required()
            .with_description(format!("{} identifier", what)),
        AttributeSchema::new("name", AttributeType::String)
            .required()
            .with_description(format!("{} name", what)),
        AttributeSchema::new("type", AttributeType::String)
            .required()
            .with_description(format!("{} type", what)),
    ])
}
