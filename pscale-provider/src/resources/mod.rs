//! Resource and data source handlers
//!
//! Each module pairs a schema with its create/read/update/delete handlers
//! and the function copying server responses into state.

pub mod filesystem;
pub mod groupnet;
pub mod groupnet_data_source;
pub mod smb_share;
pub mod snapshot;
pub mod snapshot_restore;
pub mod writable_snapshot;

use pscale_core::provider::ResourceType;
use pscale_core::schema::ResourceSchema;

use crate::schemas;

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr, $schema:path) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
            fn schema(&self) -> ResourceSchema {
                $schema()
            }
        }
    };
}

define_resource_type!(FilesystemType, "filesystem", schemas::filesystem::schema);
define_resource_type!(SmbShareType, "smb_share", schemas::smb_share::schema);
define_resource_type!(SnapshotType, "snapshot", schemas::snapshot::schema);
define_resource_type!(
    WritableSnapshotType,
    "writable_snapshot",
    schemas::writable_snapshot::schema
);
define_resource_type!(GroupnetType, "groupnet", schemas::groupnet::schema);
define_resource_type!(
    SnapshotRestoreType,
    "snapshot_restore",
    schemas::snapshot_restore::schema
);
define_resource_type!(
    GroupnetDataSourceType,
    "groupnet",
    schemas::groupnet::data_source_schema
);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![
        Box::new(FilesystemType),
        Box::new(SmbShareType),
        Box::new(SnapshotType),
        Box::new(WritableSnapshotType),
        Box::new(GroupnetType),
        Box::new(SnapshotRestoreType),
    ]
}

/// Returns all data source types supported by this provider
pub fn data_source_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(GroupnetDataSourceType)]
}
