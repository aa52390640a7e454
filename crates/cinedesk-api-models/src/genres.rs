//! Genre DTOs and list filters.

use serde::{Deserialize, Serialize};

use crate::query::{ListFilters, SortKey, non_empty, paging_accessors, parse_positive};

/// Compact genre reference embedded in movies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    /// Server identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Full genre record returned by the genre endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreDetail {
    /// Server identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of movies tagged with this genre (server computed).
    #[serde(default)]
    pub movies_count: u64,
    /// Creation timestamp as emitted by the server.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp as emitted by the server.
    #[serde(default)]
    pub updated_at: String,
}

impl From<GenreDetail> for Genre {
    fn from(value: GenreDetail) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Sort keys accepted by `GET /movies/genres/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GenreOrdering {
    /// `name`
    #[serde(rename = "name")]
    NameAsc,
    /// `-name`
    #[serde(rename = "-name")]
    NameDesc,
    /// `-movies_count`
    #[serde(rename = "-movies_count")]
    MostMovies,
    /// `movies_count`
    #[serde(rename = "movies_count")]
    LeastMovies,
    /// `-created_at`
    #[serde(rename = "-created_at")]
    Newest,
    /// `created_at`
    #[serde(rename = "created_at")]
    Oldest,
}

impl SortKey for GenreOrdering {
    const ALL: &'static [Self] = &[
        Self::NameAsc,
        Self::NameDesc,
        Self::MostMovies,
        Self::LeastMovies,
        Self::Newest,
        Self::Oldest,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name",
            Self::NameDesc => "-name",
            Self::MostMovies => "-movies_count",
            Self::LeastMovies => "movies_count",
            Self::Newest => "-created_at",
            Self::Oldest => "created_at",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
            Self::MostMovies => "Most Movies",
            Self::LeastMovies => "Least Movies",
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
        }
    }
}

/// Filters for the genre list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilters {
    /// Free-text search on name.
    pub search: Option<String>,
    /// Sort key.
    pub ordering: Option<GenreOrdering>,
    /// 1-based page.
    pub page: Option<u32>,
    /// Records per page.
    pub page_size: Option<u32>,
}

impl ListFilters for GenreFilters {
    paging_accessors!(GenreOrdering);

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        pairs
    }

    fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut filters = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "search" => filters.search = non_empty(Some(value.clone())),
                "ordering" => filters.ordering = GenreOrdering::parse(value),
                "page" => filters.page = parse_positive(value),
                "page_size" => filters.page_size = parse_positive(value),
                _ => {}
            }
        }
        filters
    }
}

/// Body for `POST /movies/genres/create/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateGenreRequest {
    /// Genre name.
    pub name: String,
}

/// Body for `PATCH /movies/genres/{id}/update/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateGenreRequest {
    /// New genre name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UpdateGenreRequest {
    /// Whether the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Drop the name when it equals `current`.
    #[must_use]
    pub fn without_unchanged(mut self, current: &str) -> Self {
        if self.name.as_deref() == Some(current) {
            self.name = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_query_string_matches_backend_order() {
        let filters = GenreFilters {
            search: Some("dra".to_string()),
            ordering: Some(GenreOrdering::MostMovies),
            page: Some(2),
            page_size: Some(20),
        };
        assert_eq!(
            filters.to_query_string(),
            "?search=dra&ordering=-movies_count&page=2&page_size=20"
        );
    }

    #[test]
    fn unset_keys_are_omitted() {
        let filters = GenreFilters {
            search: Some(String::new()),
            page: Some(3),
            ..GenreFilters::default()
        };
        assert_eq!(filters.to_query_string(), "?page=3");
        assert_eq!(GenreFilters::default().to_query_string(), "");
    }

    #[test]
    fn query_string_round_trips_through_parser() {
        let parsed = GenreFilters::from_query_string("?search=sci+fi&ordering=-name&page=4&bogus=1");
        assert_eq!(parsed.search.as_deref(), Some("sci fi"));
        assert_eq!(parsed.ordering, Some(GenreOrdering::NameDesc));
        assert_eq!(parsed.page, Some(4));
        assert_eq!(parsed.page_size, None);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateGenreRequest::default().is_empty());
        let body = serde_json::to_string(&UpdateGenreRequest::default()).expect("serialize");
        assert_eq!(body, "{}");
    }
}
