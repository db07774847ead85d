//! Diagnostics - User-facing errors and warnings attached to one operation

use std::fmt;

use crate::provider::ProviderError;
use crate::resource::ResourceId;
use crate::schema::TypeError;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub resource: Option<ResourceId>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(ref id) = self.resource {
            write!(f, "\n  with {}", id)?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n\n{}", self.detail)?;
        }
        Ok(())
    }
}

/// Diagnostics collected during one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    fn push(
        &mut self,
        severity: Severity,
        summary: String,
        detail: String,
        resource: Option<ResourceId>,
    ) {
        self.items.push(Diagnostic {
            severity,
            summary,
            detail,
            resource,
        });
    }

    /// Record a provider failure as an error diagnostic
    pub fn add_provider_error(&mut self, err: &ProviderError) {
        self.push(
            Severity::Error,
            err.summary.clone(),
            err.detail.clone().unwrap_or_default(),
            err.resource_id.clone(),
        );
    }

    /// Record schema validation failures for a resource
    pub fn add_validation_errors(&mut self, id: &ResourceId, errors: &[TypeError]) {
        for e in errors {
            self.push(
                Severity::Error,
                "Invalid configuration".to_string(),
                e.to_string(),
                Some(id.clone()),
            );
        }
    }

    pub fn append(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn has_error(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(err: ProviderError) -> Self {
        let mut diags = Diagnostics::new();
        diags.add_provider_error(&err);
        diags
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
