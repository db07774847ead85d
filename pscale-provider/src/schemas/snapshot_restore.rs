//! Snapshot restore schema

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

pub fn schema() -> ResourceSchema {
    ResourceSchema::new("snapshot_restore")
        .with_description("Restores a directory to the content of a snapshot by starting a SnapRevert job.")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("Snapshot restore identifier"),
        )
        .attribute(
            AttributeSchema::new(
                "snaprevert_params",
                AttributeType::object([
                    AttributeSchema::new("snapshot_id", types::non_empty_string())
                        .with_description("Snapshot ID to revert to."),
                    AttributeSchema::new("snapshot_name", types::non_empty_string())
                        .with_description("Snapshot name to revert to."),
                    AttributeSchema::new("allow_dup", AttributeType::Bool)
                        .with_description("Whether or not to queue the job if one of the same type is already running or queued."),
                ]),
            )
            .required()
            .with_description("Parameters of the SnapRevert job."),
        )
        .attribute(
            AttributeSchema::new("job_id", AttributeType::Int)
                .computed()
                .with_description("ID of the SnapRevert job."),
        )
        .attribute(
            AttributeSchema::new("job_state", AttributeType::String)
                .computed()
                .with_description("State of the SnapRevert job when last read."),
        )
}
