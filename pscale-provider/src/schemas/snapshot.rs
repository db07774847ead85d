//! Snapshot schema

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

pub fn schema() -> ResourceSchema {
    ResourceSchema::new("snapshot")
        .with_description("Snapshot resource")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("The system ID given to the snapshot."),
        )
        .attribute(
            AttributeSchema::new("path", types::non_empty_string())
                .required()
                .with_description("The /ifs path snapshotted."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .optional()
                .with_description("The user or system supplied snapshot name."),
        )
        .attribute(
            AttributeSchema::new("expires", types::non_negative_int())
                .with_description("The Unix Epoch time the snapshot will expire and be eligible for automatic deletion."),
        )
        .attribute(
            AttributeSchema::new("alias", AttributeType::String)
                .with_description("Alias name to create for this snapshot."),
        )
        .attribute(
            AttributeSchema::new("created", AttributeType::Int)
                .computed()
                .with_description("The Unix Epoch time the snapshot was created."),
        )
        .attribute(
            AttributeSchema::new("size", AttributeType::Int)
                .computed()
                .with_description("The amount of storage in bytes used to store this snapshot."),
        )
        .attribute(
            AttributeSchema::new("state", AttributeType::String)
                .computed()
                .with_description("Snapshot state."),
        )
        .attribute(
            AttributeSchema::new("target_name", AttributeType::String)
                .computed()
                .with_description("Name of the target snapshot of an alias."),
        )
}
