//! Query parameters for the public missing-persons listing

use knmp_common::db::SearchFilter;
use knmp_common::html::encode_query_value;
use knmp_common::pagination::parse_page;
use serde::Deserialize;

/// Persons per listing page
pub const PAGE_SIZE: i64 = 12;

/// Raw `?page=&q=&gender=&age_min=&age_max=` values
///
/// Everything is taken as text so malformed values are ignored rather than
/// rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    pub page: Option<String>,
    pub q: Option<String>,
    pub gender: Option<String>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_bound(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
}

impl BrowseParams {
    pub fn page(&self) -> i64 {
        parse_page(self.page.as_deref())
    }

    pub fn to_filter(&self) -> SearchFilter {
        SearchFilter {
            query: non_blank(&self.q),
            gender: non_blank(&self.gender),
            age_min: parse_bound(&self.age_min),
            age_max: parse_bound(&self.age_max),
        }
    }

    /// Query string for a page link that keeps the active filters
    pub fn page_query(&self, page: i64) -> String {
        let mut parts = vec![format!("page={}", page)];
        let filters = [
            ("q", &self.q),
            ("gender", &self.gender),
            ("age_min", &self.age_min),
            ("age_max", &self.age_max),
        ];
        for (name, value) in filters {
            if let Some(value) = non_blank(value) {
                parts.push(format!("{}={}", name, encode_query_value(&value)));
            }
        }
        parts.join("&")
    }
}
