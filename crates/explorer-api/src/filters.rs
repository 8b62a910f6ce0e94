//! Filters and their two canonical renderings.

use crate::params::FilterValue;
use std::fmt;

/// A named filter and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: String,
    value: FilterValue,
}

impl Filter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// Filters in the order they were added.
///
/// The query string keeps that order. The signing message sorts by name
/// because the server rebuilds it the same way before checking the digest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    items: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn add(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(name, value);
        self
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        debug_assert!(!name.is_empty(), "filter names must not be empty");
        self.items.push(Filter {
            name,
            value: value.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.items.iter()
    }

    /// `filter[name]=v` per scalar and `filter[name][]=v` per list element,
    /// joined with `&`. Values are not URL-encoded.
    pub fn query_string(&self) -> String {
        let mut parts = Vec::new();

        for filter in &self.items {
            match &filter.value {
                FilterValue::List(values) => {
                    for value in values {
                        parts.push(format!("filter[{}][]={}", filter.name, value));
                    }
                }
                FilterValue::Scalar(value) => {
                    parts.push(format!("filter[{}]={}", filter.name, value));
                }
            }
        }

        parts.join("&")
    }

    /// The message the request digest is computed over.
    ///
    /// Filters are stably sorted by name, then each contributes its name
    /// followed by each of its values. All tokens are joined with `|`.
    pub fn signing_message(&self) -> String {
        let mut sorted: Vec<&Filter> = self.items.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut tokens = Vec::new();
        for filter in sorted {
            tokens.push(filter.name.clone());
            tokens.extend(filter.value.values().iter().map(|v| v.to_string()));
        }

        tokens.join("|")
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert_eq!(filters.query_string(), "");
        assert_eq!(filters.signing_message(), "");
    }

    #[test]
    fn test_scalar_and_list_query_string() {
        let filters = FilterSet::new()
            .add("timeframe", "at")
            .add("mention_source_countries", ["JP", "CN"]);

        assert_eq!(
            filters.query_string(),
            "filter[timeframe]=at&filter[mention_source_countries][]=JP&filter[mention_source_countries][]=CN"
        );
    }

    #[test]
    fn test_signing_message_sorted_by_name() {
        let filters = FilterSet::new()
            .add("timeframe", "at")
            .add("mention_sources_types", vec!["type:policy", "type:blog"]);

        assert_eq!(
            filters.signing_message(),
            "mention_sources_types|type:policy|type:blog|timeframe|at"
        );
    }

    #[test]
    fn test_signing_message_ignores_insertion_order() {
        let pairs: Vec<(&str, FilterValue)> = vec![
            ("scope", "all".into()),
            ("mention_sources_countries", vec!["JP"].into()),
            ("timeframe", "at".into()),
            ("type", vec!["book", "chapter"].into()),
        ];

        let forward = pairs
            .iter()
            .cloned()
            .fold(FilterSet::new(), |set, (n, v)| set.add(n, v));
        let backward = pairs
            .iter()
            .rev()
            .cloned()
            .fold(FilterSet::new(), |set, (n, v)| set.add(n, v));
        let rotated = pairs
            .iter()
            .cycle()
            .skip(2)
            .take(pairs.len())
            .cloned()
            .fold(FilterSet::new(), |set, (n, v)| set.add(n, v));

        assert_eq!(forward.signing_message(), backward.signing_message());
        assert_eq!(forward.signing_message(), rotated.signing_message());
        assert_eq!(
            forward.signing_message(),
            "mention_sources_countries|JP|scope|all|timeframe|at|type|book|chapter"
        );
    }

    #[test]
    fn test_equal_names_keep_insertion_order() {
        let filters = FilterSet::new().add("type", "book").add("type", "chapter");
        assert_eq!(filters.signing_message(), "type|book|type|chapter");
    }

    #[test]
    fn test_single_element_list_is_not_unwrapped() {
        let filters = FilterSet::new().add("mention_sources_countries", vec!["JP"]);

        assert_eq!(
            filters.query_string(),
            "filter[mention_sources_countries][]=JP"
        );
        assert_eq!(filters.signing_message(), "mention_sources_countries|JP");
    }

    #[test]
    fn test_numbers_render_plainly() {
        let filters = FilterSet::new().add("limit", 5).add("ratio", 0.5);
        assert_eq!(filters.to_string(), "filter[limit]=5&filter[ratio]=0.5");
        assert_eq!(filters.signing_message(), "limit|5|ratio|0.5");
    }
}
