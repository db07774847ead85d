//! Groupnet data source
//!
//! Lists every groupnet and narrows the list with the optional `filter`
//! block. Predicates apply in a fixed order and the first one that leaves
//! nothing (or names an unknown groupnet) fails the read.

use std::collections::HashMap;

use log::{debug, info};
use pscale_client::PowerScaleApi;
use pscale_client::models::Groupnet;
use pscale_core::filter::{Filter, FilterError};
use pscale_core::provider::{ProviderError, ProviderResult};
use pscale_core::resource::{AttributeMap, Resource, ResourceId, State, Value};

use super::groupnet::groupnet_to_attributes;
use crate::utils::error_detail;

pub const DATA_SOURCE_ID: &str = "groupnet_datasource";

/// Optional predicates of the `filter` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupnetFilter {
    pub names: Option<Vec<String>>,
    pub dns_cache_enabled: Option<bool>,
    pub allow_wildcard_subdomains: Option<bool>,
    pub dns_resolver_rotate: Option<bool>,
    pub server_side_dns_search: Option<bool>,
    pub dns_search: Option<Vec<String>>,
    pub dns_servers: Option<Vec<String>>,
}

impl GroupnetFilter {
    pub fn from_attributes(attrs: &HashMap<String, Value>) -> Option<Self> {
        let filter = attrs.get_map("filter")?;
        Some(Self {
            names: filter.get_str_list("names"),
            dns_cache_enabled: filter.get_bool("dns_cache_enabled"),
            allow_wildcard_subdomains: filter.get_bool("allow_wildcard_subdomains"),
            dns_resolver_rotate: filter.get_bool("dns_resolver_rotate"),
            server_side_dns_search: filter.get_bool("server_side_dns_search"),
            dns_search: filter.get_str_list("dns_search"),
            dns_servers: filter.get_str_list("dns_servers"),
        })
    }

    /// Narrow `groupnets` to the entries matching every set predicate
    pub fn apply(&self, groupnets: Vec<Groupnet>) -> Result<Vec<Groupnet>, FilterError> {
        Ok(Filter::new("groupnet", groupnets)
            .names(self.names.as_deref(), |g| g.name.as_str())?
            .equals("dns_cache_enabled", self.dns_cache_enabled, |g| {
                g.dns_cache_enabled
            })?
            .equals(
                "allow_wildcard_subdomains",
                self.allow_wildcard_subdomains,
                |g| g.allow_wildcard_subdomains,
            )?
            .equals("dns_resolver_rotate", self.dns_resolver_rotate, |g| {
                g.dns_resolver_rotate
            })?
            .equals("server_side_dns_search", self.server_side_dns_search, |g| {
                g.server_side_dns_search
            })?
            .any_of("dns_search", self.dns_search.as_deref(), |g| {
                g.dns_search.as_slice()
            })?
            .any_of("dns_servers", self.dns_servers.as_deref(), |g| {
                g.dns_servers.as_slice()
            })?
            .into_inner())
    }
}

/// Turn a filter failure into the diagnostic shown to the operator
fn filter_error(id: &ResourceId, err: FilterError) -> ProviderError {
    let summary = match &err {
        FilterError::NamesNotFound { .. } => {
            "Error one or more of the filtered groupnet names is not a valid powerscale groupnet."
                .to_string()
        }
        FilterError::NoMatch { field, .. } if field == "dns_search" || field == "dns_servers" => {
            format!(
                "Error one or more of the filtered {} values is not a valid powerscale groupnet.",
                field
            )
        }
        FilterError::NoMatch { field, .. } => {
            format!("Error no groupnets found with the specified {} value.", field)
        }
    };
    let detail = match &err {
        FilterError::NamesNotFound {
            valid, requested, ..
        } => format!(
            "Valid groupnets: [{}], filtered list: [{}]",
            valid.join(" , "),
            requested.join(" ")
        ),
        FilterError::NoMatch { value, .. } => format!(
            "Valid groupnets: [], filtered list: [{}]",
            value.trim_start_matches('[').trim_end_matches(']')
        ),
    };

    ProviderError::new(summary)
        .with_detail(detail)
        .for_resource(id.clone())
        .with_cause(err)
}

pub async fn read(api: &dyn PowerScaleApi, config: &Resource) -> ProviderResult<State> {
    info!("Reading Groupnet data source ");

    let groupnets = api.list_groupnets().await.map_err(|e| {
        ProviderError::new("Error getting the list of PowerScale Groupnets.")
            .with_detail(error_detail(&e))
            .for_resource(config.id.clone())
            .with_cause(e)
    })?;
    debug!("Listed {} groupnets", groupnets.len());

    let groupnets = match GroupnetFilter::from_attributes(&config.attributes) {
        Some(filter) => filter
            .apply(groupnets)
            .map_err(|e| filter_error(&config.id, e))?,
        None => groupnets,
    };

    let mut attrs = HashMap::new();
    attrs.insert("id".to_string(), Value::String(DATA_SOURCE_ID.to_string()));
    attrs.insert(
        "groupnets".to_string(),
        Value::List(
            groupnets
                .iter()
                .map(|g| Value::Map(groupnet_to_attributes(g)))
                .collect(),
        ),
    );
    if let Some(filter) = config.attributes.get("filter") {
        attrs.insert("filter".to_string(), filter.clone());
    }

    info!("Done with Read Groupnet data source ");
    Ok(State::existing(config.id.clone(), attrs).with_identifier(DATA_SOURCE_ID))
}
