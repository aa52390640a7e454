//! Query-string encoding shared by every list filter.
//!
//! # Design
//! - Each filter emits its pairs in a fixed key order so cache keys and URLs
//!   are stable for equal filter values.
//! - Unset keys are omitted entirely; an empty search counts as unset.
//! - Encoding follows `application/x-www-form-urlencoded` (space becomes `+`).

use url::form_urlencoded;

/// Enumerated sort key accepted by a list endpoint.
pub trait SortKey: Copy + Eq + std::fmt::Debug + 'static {
    /// Every supported ordering, in the order the UI offers them.
    const ALL: &'static [Self];

    /// Wire value (e.g. `-release_date`).
    fn as_str(self) -> &'static str;

    /// Human-readable label for sort controls.
    fn label(self) -> &'static str;

    /// Parse a wire value, returning `None` for unknown keys.
    #[must_use]
    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|ordering| ordering.as_str() == value)
    }
}

/// Filter set for a paginated list endpoint.
///
/// The paging accessors let list-page state drive any resource uniformly.
pub trait ListFilters: Clone + PartialEq + Default + std::fmt::Debug {
    /// Sort key type for this resource.
    type Sort: SortKey;

    /// Ordered key/value pairs for the set keys.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Rebuild a filter set from decoded query pairs, ignoring unknown keys.
    fn from_query_pairs(pairs: &[(String, String)]) -> Self;

    /// Current search term.
    fn search(&self) -> Option<&str>;
    /// Replace the search term (empty strings are stored as `None`).
    fn set_search(&mut self, search: Option<String>);
    /// Current ordering.
    fn ordering(&self) -> Option<Self::Sort>;
    /// Replace the ordering.
    fn set_ordering(&mut self, ordering: Option<Self::Sort>);
    /// Current 1-based page.
    fn page(&self) -> Option<u32>;
    /// Replace the page.
    fn set_page(&mut self, page: Option<u32>);
    /// Current page size.
    fn page_size(&self) -> Option<u32>;
    /// Replace the page size.
    fn set_page_size(&mut self, page_size: Option<u32>);

    /// Render as `?k=v&...`, or an empty string when no key is set.
    #[must_use]
    fn to_query_string(&self) -> String {
        encode_query(&self.query_pairs())
    }

    /// Parse a query string (with or without the leading `?`).
    #[must_use]
    fn from_query_string(query: &str) -> Self {
        Self::from_query_pairs(&decode_query(query))
    }
}

/// Encode ordered pairs as a query string with a leading `?`.
///
/// Returns an empty string when `pairs` is empty.
#[must_use]
pub fn encode_query(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("?{}", serializer.finish())
}

/// Decode a query string into owned pairs, preserving order.
#[must_use]
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    let raw = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Implements the search/ordering/paging accessors of [`ListFilters`] for a
/// struct with `search`, `ordering`, `page` and `page_size` fields.
macro_rules! paging_accessors {
    ($sort:ty) => {
        type Sort = $sort;

        fn search(&self) -> Option<&str> {
            self.search.as_deref()
        }

        fn set_search(&mut self, search: Option<String>) {
            self.search = crate::query::non_empty(search);
        }

        fn ordering(&self) -> Option<$sort> {
            self.ordering
        }

        fn set_ordering(&mut self, ordering: Option<$sort>) {
            self.ordering = ordering;
        }

        fn page(&self) -> Option<u32> {
            self.page
        }

        fn set_page(&mut self, page: Option<u32>) {
            self.page = page;
        }

        fn page_size(&self) -> Option<u32> {
            self.page_size
        }

        fn set_page_size(&mut self, page_size: Option<u32>) {
            self.page_size = page_size;
        }
    };
}

pub(crate) use paging_accessors;

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

pub(crate) fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|number| *number > 0)
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
