//! Filesystem (namespace directory) schema

use pscale_core::resource::Value;
use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::member_type;

pub const DEFAULT_DIRECTORY_PATH: &str = "/ifs";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new("filesystem")
        .with_description("FileSystem resource")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("FileSystem identifier"),
        )
        .attribute(
            AttributeSchema::new("name", types::non_empty_string())
                .required()
                .with_description("FileSystem directory name"),
        )
        .attribute(
            AttributeSchema::new("directory_path", AttributeType::String)
                .with_default(Value::String(DEFAULT_DIRECTORY_PATH.to_string()))
                .with_description(
                    "FileSystem directory path. If no directory path is specified, [/ifs] would be taken by default.",
                ),
        )
        .attribute(
            AttributeSchema::new("full_path", AttributeType::String)
                .computed()
                .with_description("Full path of the directory"),
        )
        .attribute(
            AttributeSchema::new("type", AttributeType::String)
                .computed()
                .with_description("File System Resource type"),
        )
        .attribute(
            AttributeSchema::new("creation_time", AttributeType::String)
                .computed()
                .with_description("File System Resource Creation time"),
        )
        .attribute(
            AttributeSchema::new("owner", member_type("Owner"))
                .required()
                .with_description("The owner of the Filesystem."),
        )
        .attribute(
            AttributeSchema::new("group", member_type("Group"))
                .required()
                .with_description("The group of the Filesystem."),
        )
        .attribute(
            AttributeSchema::new("access_control", types::access_control()).with_description(
                "The ACL value for the directory. Either an access right such as 'private_read', \
                 'private', 'public_read', 'public_read_write', 'public' or a POSIX mode such as \
                 '0550' or '0770'. Modification is only supported from POSIX to POSIX mode.",
            ),
        )
        .attribute(
            AttributeSchema::new("authoritative", AttributeType::String)
                .computed()
                .with_description(
                    "If the directory has access rights set, then this field returns acl. Otherwise it returns mode.",
                ),
        )
        .attribute(
            AttributeSchema::new("mode", AttributeType::String)
                .computed()
                .with_description("Acl mode"),
        )
        .attribute(
            AttributeSchema::new("recursive", AttributeType::Bool)
                .with_default(Value::Bool(true))
                .with_description("Creates intermediate folders recursively when set to true."),
        )
        .attribute(
            AttributeSchema::new("overwrite", AttributeType::Bool)
                .with_default(Value::Bool(false))
                .with_description(
                    "Deletes and replaces the existing user attributes and ACLs of the directory with user-specified attributes if set to true.",
                ),
        )
}
