//! SMB share schema

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::member_type;

pub const PERMISSIONS: &[&str] = &["full", "change", "read"];
pub const PERMISSION_TYPES: &[&str] = &["allow", "deny"];

fn permission_type() -> AttributeType {
    AttributeType::object([
        AttributeSchema::new(
            "permission",
            AttributeType::Enum(PERMISSIONS.iter().map(|s| s.to_string()).collect()),
        )
        .required()
        .with_description("Specifies the file system rights that are allowed or denied."),
        AttributeSchema::new(
            "permission_type",
            AttributeType::Enum(PERMISSION_TYPES.iter().map(|s| s.to_string()).collect()),
        )
        .required()
        .with_description("Determines whether the permission is allowed or denied."),
        AttributeSchema::new("trustee", member_type("Trustee"))
            .required()
            .with_description("Specifies the persona of the file group."),
    ])
}

pub fn schema() -> ResourceSchema {
    ResourceSchema::new("smb_share")
        .with_description("SMB share resource")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("Share ID."),
        )
        .attribute(
            AttributeSchema::new("name", types::non_empty_string())
                .required()
                .with_description("Share name."),
        )
        .attribute(
            AttributeSchema::new("path", types::non_empty_string())
                .required()
                .with_description("Path of share within /ifs."),
        )
        .attribute(
            AttributeSchema::new("zone", AttributeType::String)
                .with_description("Specifies which access zone to use."),
        )
        .attribute(
            AttributeSchema::new("zid", AttributeType::Int)
                .computed()
                .with_description("Numeric ID of the access zone which contains this SMB share"),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .optional()
                .with_description("Description for this SMB share."),
        )
        .attribute(
            AttributeSchema::new("browsable", AttributeType::Bool)
                .computed()
                .optional()
                .with_description("Share is visible in net view and the browse list."),
        )
        .attribute(
            AttributeSchema::new("ca_timeout", types::non_negative_int())
                .computed()
                .optional()
                .with_description("Persistent open timeout for the share."),
        )
        .attribute(
            AttributeSchema::new("file_filtering_enabled", AttributeType::Bool)
                .computed()
                .optional()
                .with_description("Enables file filtering on this zone."),
        )
        .attribute(
            AttributeSchema::new("hide_dot_files", AttributeType::Bool)
                .computed()
                .optional()
                .with_description("Hide files and directories that begin with a period '.'."),
        )
        .attribute(
            AttributeSchema::new("access_based_enumeration", AttributeType::Bool)
                .computed()
                .optional()
                .with_description("Only enumerate files and folders the requesting user has access to."),
        )
        .attribute(
            AttributeSchema::new("permissions", AttributeType::List(Box::new(permission_type())))
                .computed()
                .optional()
                .with_description("Specifies an ordered list of permission modifications."),
        )
}
