//! Writable snapshot schema

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

pub fn schema() -> ResourceSchema {
    ResourceSchema::new("writable_snapshot")
        .with_description("Writable snapshot resource")
        .attribute(
            AttributeSchema::new("id", AttributeType::Int)
                .computed()
                .with_description("The system ID given to the writable snapshot."),
        )
        .attribute(
            AttributeSchema::new("dst_path", types::non_empty_string())
                .required()
                .with_description("The /ifs path of the writable snapshot."),
        )
        .attribute(
            AttributeSchema::new("snap_id", types::non_empty_string())
                .required()
                .with_description("Source snapshot ID or name."),
        )
        .attribute(
            AttributeSchema::new("src_snap", AttributeType::String)
                .computed()
                .with_description("The name of the source snapshot."),
        )
        .attribute(
            AttributeSchema::new("src_id", AttributeType::Int)
                .computed()
                .with_description("The ID of the source snapshot."),
        )
        .attribute(
            AttributeSchema::new("src_path", AttributeType::String)
                .computed()
                .with_description("The /ifs path snapshotted by the source snapshot."),
        )
        .attribute(
            AttributeSchema::new("created", AttributeType::Int)
                .computed()
                .with_description("The Unix Epoch time the writable snapshot was created."),
        )
        .attribute(
            AttributeSchema::new("log_size", AttributeType::Int)
                .computed()
                .with_description("The logical size of the writable snapshot."),
        )
        .attribute(
            AttributeSchema::new("phys_size", AttributeType::Int)
                .computed()
                .with_description("The physical size of the writable snapshot."),
        )
        .attribute(
            AttributeSchema::new("state", AttributeType::String)
                .computed()
                .with_description("Writable snapshot state."),
        )
}
