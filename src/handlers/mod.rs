//! HTTP handlers per entity, plus the auth flows.

pub mod auth;
pub mod execs;
pub mod students;
pub mod teachers;

use crate::sql::{parse_sort, PageRequest, SortKey};

/// List parameters split out of the raw query string. Reserved keys control
/// search/sort/pagination; everything else is a filter candidate, validated
/// against the entity whitelist when the query is composed.
pub(crate) struct ListParams {
    pub filters: Vec<(String, String)>,
    pub search: Option<String>,
    pub sort: Vec<SortKey>,
    pub page: PageRequest,
}

impl ListParams {
    pub fn from_query(params: Vec<(String, String)>) -> Self {
        let mut filters = Vec::new();
        let mut search = None;
        let mut sort_tokens = Vec::new();
        let mut page = None;
        let mut limit = None;

        for (key, value) in params {
            match key.as_str() {
                "search" => search = Some(value),
                "sort_by" => sort_tokens.push(value),
                "page" => page = value.parse().ok(),
                "limit" => limit = value.parse().ok(),
                _ => filters.push((key, value)),
            }
        }

        ListParams {
            filters,
            search,
            sort: parse_sort(&sort_tokens),
            page: PageRequest::new(page, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn splits_reserved_keys_from_filters() {
        let params = ListParams::from_query(query(&[
            ("first_name", "Ada"),
            ("search", "love"),
            ("sort_by", "last_name:asc"),
            ("sort_by", "email:desc"),
            ("page", "2"),
            ("limit", "25"),
        ]));
        assert_eq!(params.filters, vec![("first_name".to_string(), "Ada".to_string())]);
        assert_eq!(params.search.as_deref(), Some("love"));
        assert_eq!(params.sort.len(), 2);
        assert_eq!(params.page.page, 2);
        assert_eq!(params.page.limit, 25);
    }

    #[test]
    fn bad_page_values_fall_back_to_defaults() {
        let params = ListParams::from_query(query(&[("page", "zero"), ("limit", "-5")]));
        assert_eq!(params.page.page, 1);
        assert_eq!(params.page.limit, PageRequest::DEFAULT_LIMIT);
    }
}
