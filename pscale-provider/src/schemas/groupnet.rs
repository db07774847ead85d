//! Groupnet resource and data source schemas

use pscale_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Attributes shared by the resource and the data source entries
fn groupnet_attributes(computed: bool) -> Vec<AttributeSchema> {
    let settable = |a: AttributeSchema| if computed { a.computed() } else { a.computed().optional() };

    vec![
        settable(
            AttributeSchema::new("description", AttributeType::String)
                .with_description("A description of the groupnet."),
        ),
        settable(
            AttributeSchema::new("allow_wildcard_subdomains", AttributeType::Bool)
                .with_description("If enabled, SmartConnect treats subdomains of known dns zones as the known dns zone. This is required for S3 Virtual Host domains."),
        ),
        settable(
            AttributeSchema::new("dns_cache_enabled", AttributeType::Bool)
                .with_description("DNS caching is enabled or disabled."),
        ),
        settable(
            AttributeSchema::new("server_side_dns_search", AttributeType::Bool)
                .with_description("Enable or disable appending nodes DNS search list to client DNS inquiries directed at SmartConnect service IP."),
        ),
        settable(
            AttributeSchema::new("dns_resolver_rotate", AttributeType::Bool)
                .with_description("Enable or disable DNS resolver rotate."),
        ),
        settable(
            AttributeSchema::new("dns_search", types::string_list())
                .with_description("List of DNS search suffixes."),
        ),
        settable(
            AttributeSchema::new("dns_servers", types::string_list())
                .with_description("List of Domain Name Server IP addresses."),
        ),
        AttributeSchema::new("subnets", types::string_list())
            .computed()
            .with_description("Name of the subnets in the groupnet."),
    ]
}

pub fn schema() -> ResourceSchema {
    let schema = ResourceSchema::new("groupnet")
        .with_description("Groupnet resource. A groupnet sits above subnets and pools and allows separate Access Zones to contain distinct DNS settings.")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("Unique Interface ID."),
        )
        .attribute(
            AttributeSchema::new("name", types::non_empty_string())
                .required()
                .with_description("The name of the groupnet."),
        );

    groupnet_attributes(false)
        .into_iter()
        .fold(schema, |schema, attr| schema.attribute(attr))
}

fn filter_type() -> AttributeType {
    AttributeType::object([
        AttributeSchema::new("names", types::string_list())
            .with_description("Filter groupnets by name."),
        AttributeSchema::new("dns_cache_enabled", AttributeType::Bool)
            .with_description("Filter groupnets by DNS cache enabled (true) or disabled (false)."),
        AttributeSchema::new("allow_wildcard_subdomains", AttributeType::Bool)
            .with_description("Filter groupnets by allow wildcard subdomains (true) or disabled (false)."),
        AttributeSchema::new("dns_resolver_rotate", AttributeType::Bool)
            .with_description("Filter groupnets by DNS resolver rotate (true) or disabled (false)."),
        AttributeSchema::new("server_side_dns_search", AttributeType::Bool)
            .with_description("Filter groupnets by server side DNS search (true) or disabled (false)."),
        AttributeSchema::new("dns_search", types::string_list())
            .with_description("Filter groupnets by DNS search suffixes."),
        AttributeSchema::new("dns_servers", types::string_list())
            .with_description("Filter groupnets by Domain Name Server IP addresses."),
    ])
}

pub fn data_source_schema() -> ResourceSchema {
    let entry = AttributeType::object(
        [
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("Unique Interface ID."),
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .with_description("The name of the groupnet."),
        ]
        .into_iter()
        .chain(groupnet_attributes(true)),
    );

    ResourceSchema::new("groupnet")
        .with_description("This datasource is used to query the existing Groupnets from PowerScale array.")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .with_description("Unique identifier of the groupnet instance."),
        )
        .attribute(
            AttributeSchema::new("groupnets", AttributeType::List(Box::new(entry)))
                .computed()
                .with_description("List of groupnets."),
        )
        .attribute(AttributeSchema::new("filter", filter_type()))
}
