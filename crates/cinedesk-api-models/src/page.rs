//! Pagination envelope and generic delete acknowledgement.

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// `results` order, `count`, `next` and `previous` are taken verbatim from the
/// server; the client never re-sorts or recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total number of records matching the filter across all pages.
    pub count: u64,
    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page, in server order.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the server reports a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether the server reports a preceding page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Number of pages for the given page size (at least zero, rounded up).
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(u64::from(page_size))
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Body returned by single-record delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    /// Server confirmation message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_decodes_null_links() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"count": 21, "next": "http://api/movies/?page=2", "previous": null, "results": [3, 1, 2]}"#,
        )
        .expect("page decodes");
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.results, vec![3, 1, 2]);
        assert_eq!(page.total_pages(10), 3);
        assert_eq!(page.total_pages(0), 0);
    }
}
