//! Filter - Narrow a listed collection by optional predicates
//!
//! Every predicate is independently optional. A predicate that is not set
//! leaves the collection untouched; a set predicate retains only matching
//! entities. Predicates combine with AND, list predicates match when the
//! entity shares at least one element with the requested list. The order of
//! the collection as returned by the server is kept.
//!
//! ```ignore
//! let groupnets = Filter::new("groupnet", groupnets)
//!     .names(filter.names.as_deref(), |g| g.name.as_str())?
//!     .equals("dns_cache_enabled", filter.dns_cache_enabled, |g| g.dns_cache_enabled)?
//!     .any_of("dns_servers", filter.dns_servers.as_deref(), |g| g.dns_servers.as_slice())?
//!     .into_inner();
//! ```

use std::collections::HashSet;
use std::fmt;

/// Filter failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// At least one requested name does not exist
    #[error(
        "{kind} names not found: [{}] (valid: [{}])",
        missing.join(", "),
        valid.join(", ")
    )]
    NamesNotFound {
        kind: String,
        /// Requested names with no matching entity
        missing: Vec<String>,
        /// Requested names that matched
        valid: Vec<String>,
        /// Every requested name, in request order
        requested: Vec<String>,
    },

    /// A predicate matched no entity
    #[error("no {kind} found with the specified {field} value: {value}")]
    NoMatch {
        kind: String,
        field: String,
        value: String,
    },
}

/// Predicate chain over an owned collection
#[derive(Debug, Clone)]
pub struct Filter<T> {
    kind: String,
    items: Vec<T>,
}

impl<T> Filter<T> {
    /// Start a chain. `kind` names the entity type in errors (e.g. "groupnet").
    pub fn new(kind: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            kind: kind.into(),
            items,
        }
    }

    /// Retain entities whose name is one of `requested`.
    ///
    /// Fails when the number of matches differs from the number of requested
    /// names, so a name listed twice is an error. `None` or an empty list
    /// leaves the chain unchanged.
    pub fn names<F>(self, requested: Option<&[String]>, name_of: F) -> Result<Self, FilterError>
    where
        F: Fn(&T) -> &str,
    {
        let requested = match requested {
            Some(names) if !names.is_empty() => names,
            _ => return Ok(self),
        };
        let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();

        let items: Vec<T> = self
            .items
            .into_iter()
            .filter(|item| wanted.contains(name_of(item)))
            .collect();

        if items.len() != requested.len() {
            let found: HashSet<&str> = items.iter().map(&name_of).collect();
            let (valid, missing): (Vec<String>, Vec<String>) = requested
                .iter()
                .cloned()
                .partition(|name| found.contains(name.as_str()));
            return Err(FilterError::NamesNotFound {
                kind: self.kind,
                missing,
                valid,
                requested: requested.to_vec(),
            });
        }

        Ok(Self {
            kind: self.kind,
            items,
        })
    }

    /// Retain entities whose field equals `wanted`. `None` leaves the chain unchanged.
    pub fn equals<V, F>(self, field: &str, wanted: Option<V>, get: F) -> Result<Self, FilterError>
    where
        V: PartialEq + fmt::Display,
        F: Fn(&T) -> V,
    {
        let Some(wanted) = wanted else {
            return Ok(self);
        };

        let items: Vec<T> = self
            .items
            .into_iter()
            .filter(|item| get(item) == wanted)
            .collect();

        if items.is_empty() {
            return Err(FilterError::NoMatch {
                kind: self.kind,
                field: field.to_string(),
                value: wanted.to_string(),
            });
        }

        Ok(Self {
            kind: self.kind,
            items,
        })
    }

    /// Retain entities whose list field shares at least one element with `wanted`.
    /// `None` or an empty list leaves the chain unchanged.
    pub fn any_of<F>(
        self,
        field: &str,
        wanted: Option<&[String]>,
        get: F,
    ) -> Result<Self, FilterError>
    where
        F: Fn(&T) -> &[String],
    {
        let wanted = match wanted {
            Some(values) if !values.is_empty() => values,
            _ => return Ok(self),
        };

        let items: Vec<T> = self
            .items
            .into_iter()
            .filter(|item| contains_any(get(item), wanted))
            .collect();

        if items.is_empty() {
            return Err(FilterError::NoMatch {
                kind: self.kind,
                field: field.to_string(),
                value: format!("[{}]", wanted.join(", ")),
            });
        }

        Ok(Self {
            kind: self.kind,
            items,
        })
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

/// True if `list` contains at least one element of `wanted`
pub fn contains_any(list: &[String], wanted: &[String]) -> bool {
    wanted.iter().any(|w| list.contains(w))
}
