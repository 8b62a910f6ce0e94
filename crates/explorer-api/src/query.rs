//! Classifies request parameters and renders the query string.

use crate::error::{ExplorerError, Result};
use crate::filters::FilterSet;
use crate::params::{FilterValue, QueryParams};
use std::fmt;

/// Builds the query string for one request.
///
/// Pagination, ordering and auth parameters become structural items; every
/// other parameter is a filter and feeds the signing message.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    items: Vec<String>,
    filters: FilterSet,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every parameter in `params`, in order.
    pub fn from_params(params: &QueryParams) -> Result<Self> {
        let mut builder = Self::new();
        for (name, value) in params.iter() {
            builder.add_param(name, value.clone())?;
        }
        Ok(builder)
    }

    /// Add one parameter.
    ///
    /// # Errors
    /// Returns `ExplorerError::EmptyParameterName` for an empty name.
    pub fn add_param(&mut self, name: &str, value: impl Into<FilterValue>) -> Result<&mut Self> {
        let value = value.into();

        match name {
            "" => return Err(ExplorerError::EmptyParameterName),
            "page_size" => self.items.push(format!("page[size]={}", value)),
            "page_number" => self.items.push(format!("page[number]={}", value)),
            "order" => self.items.push(format!("filter[order]={}", value)),
            "key" | "digest" => self.items.push(format!("{}={}", name, value)),
            _ => self.filters.push(name, value),
        }

        Ok(self)
    }

    /// Add the public key and digest. Call after all filters are in.
    pub fn add_auth(&mut self, api_key: &str, digest: &str) -> &mut Self {
        self.items.push(format!("key={}", api_key));
        self.items.push(format!("digest={}", digest));
        self
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Structural items first, then filters. Not URL-encoded.
    pub fn render(&self) -> String {
        let mut result = Vec::new();

        if !self.items.is_empty() {
            result.push(self.items.join("&"));
        }

        if !self.filters.is_empty() {
            result.push(self.filters.query_string());
        }

        result.join("&")
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
