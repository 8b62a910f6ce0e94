//! Re-signing URLs produced under other credentials.

use crate::client::ExplorerClient;
use crate::error::{ExplorerError, Result};
use crate::params::{FilterValue, QueryParams, Scalar};
use url::Url;

impl ExplorerClient {
    /// Re-sign `url` with this client's key and secret.
    ///
    /// `url` may be absolute or a path relative to the endpoint, such as
    /// `research_outputs/mentions?filter[timeframe]=at`. The result always
    /// points at this client's endpoint.
    ///
    /// # Errors
    /// Returns `ExplorerError::InvalidUrl` if `url` cannot be parsed and
    /// `ExplorerError::UnexpectedQueryParameter` for any query parameter a
    /// signed URL cannot contain.
    pub fn recode_url(&self, url: &str) -> Result<String> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .endpoint_base()?
                .join(url)
                .map_err(|e| ExplorerError::InvalidUrl(format!("{}: {}", url, e)))?,
            Err(e) => return Err(ExplorerError::InvalidUrl(format!("{}: {}", url, e))),
        };

        self.recode_parsed_url(&parsed)
    }

    /// Re-sign an already parsed URL. See [`recode_url`](Self::recode_url).
    pub fn recode_parsed_url(&self, url: &Url) -> Result<String> {
        let params = decode_query(url)?;
        let path = self.resource_path(url)?;

        tracing::debug!(path = %path, params = params.len(), "Recoding URL");

        self.build_url(&path, &params)
    }

    /// Endpoint with a trailing slash, so relative paths join beneath it.
    fn endpoint_base(&self) -> Result<Url> {
        Url::parse(&format!("{}/", self.endpoint()))
            .map_err(|e| ExplorerError::InvalidUrl(format!("{}: {}", self.endpoint(), e)))
    }

    /// Path of `url` below the endpoint's own path.
    fn resource_path(&self, url: &Url) -> Result<String> {
        let base = self.endpoint_base()?;
        let prefix = base.path().trim_end_matches('/');

        let path = url.path();
        let path = match path.strip_prefix(prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };

        Ok(path.trim_matches('/').to_string())
    }
}

/// Classify the query parameters of a signed URL back into request params.
///
/// `key` and `digest` are dropped. Filters with one value come back as
/// scalars; several values stay an ordered list. Numeric values come back as
/// numbers.
pub fn decode_query(url: &Url) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    let mut filters: Vec<(String, Vec<Scalar>)> = Vec::new();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page[size]" => params.insert("page_size", Scalar::parse(&value)),
            "page[number]" => params.insert("page_number", Scalar::parse(&value)),
            "filter[order]" => params.insert("order", Scalar::parse(&value)),
            "key" | "digest" => {}
            other => {
                let name = filter_name(other).ok_or_else(|| ExplorerError::UnexpectedQueryParameter {
                    key: other.to_string(),
                    value: value.to_string(),
                })?;

                let scalar = Scalar::parse(&value);
                match filters.iter_mut().find(|(n, _)| n == name) {
                    Some((_, values)) => values.push(scalar),
                    None => filters.push((name.to_string(), vec![scalar])),
                }
            }
        }
    }

    for (name, mut values) in filters {
        let value = if values.len() == 1 {
            FilterValue::Scalar(values.remove(0))
        } else {
            FilterValue::List(values)
        };
        params.insert(name, value);
    }

    Ok(params)
}

/// Parameter names that never travel as filters.
const RESERVED_NAMES: [&str; 5] = ["page_size", "page_number", "order", "key", "digest"];

/// Name inside `filter[name]` or `filter[name][]`.
///
/// Reserved names are refused: `filter[order][]` or `filter[page_size]`
/// would otherwise decode into structural parameters.
fn filter_name(key: &str) -> Option<&str> {
    let inner = key.strip_prefix("filter[")?;
    let name = inner
        .strip_suffix("][]")
        .or_else(|| inner.strip_suffix(']'))?;

    if name.is_empty() || name.contains(['[', ']']) || RESERVED_NAMES.contains(&name) {
        return None;
    }
    Some(name)
}
