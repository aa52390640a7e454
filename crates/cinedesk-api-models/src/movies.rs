//! Movie DTOs, list filters and batch-delete payloads.

use serde::{Deserialize, Serialize};

use crate::genres::Genre;
use crate::patch::{drop_unchanged, drop_unchanged_text};
use crate::query::{ListFilters, SortKey, non_empty, paging_accessors, parse_bool, parse_positive};

/// Movie record as returned by the catalogue endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// Server identifier (UUID string).
    pub id: String,
    /// Title.
    pub title: String,
    /// Synopsis.
    #[serde(default)]
    pub description: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Server-formatted running time (e.g. `2h 16m`).
    #[serde(default)]
    pub duration_formatted: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: String,
    /// Rating rendered by the server as a decimal string (e.g. `"8.70"`).
    #[serde(default)]
    pub rating: String,
    /// Poster URL, possibly empty.
    #[serde(default)]
    pub poster_image: String,
    /// Trailer URL.
    #[serde(default)]
    pub trailer_url: Option<String>,
    /// Tagged genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Whether the movie is bookable.
    pub is_active: bool,
}

impl Movie {
    /// Sorted ids of the tagged genres.
    #[must_use]
    pub fn genre_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.genres.iter().map(|genre| genre.id.clone()).collect();
        ids.sort();
        ids
    }

    /// Release date as `YYYY-MM-DD`, with any time-of-day suffix removed.
    #[must_use]
    pub fn release_day(&self) -> &str {
        self.release_date
            .split_once('T')
            .map_or(self.release_date.as_str(), |(day, _)| day)
    }
}

/// Sort keys accepted by `GET /movies/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovieOrdering {
    /// `-release_date`
    #[serde(rename = "-release_date")]
    Newest,
    /// `release_date`
    #[serde(rename = "release_date")]
    Oldest,
    /// `-rating`
    #[serde(rename = "-rating")]
    HighestRated,
    /// `rating`
    #[serde(rename = "rating")]
    LowestRated,
    /// `title`
    #[serde(rename = "title")]
    TitleAsc,
    /// `-title`
    #[serde(rename = "-title")]
    TitleDesc,
}

impl SortKey for MovieOrdering {
    const ALL: &'static [Self] = &[
        Self::Newest,
        Self::Oldest,
        Self::HighestRated,
        Self::LowestRated,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "-release_date",
            Self::Oldest => "release_date",
            Self::HighestRated => "-rating",
            Self::LowestRated => "rating",
            Self::TitleAsc => "title",
            Self::TitleDesc => "-title",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::HighestRated => "Highest Rated",
            Self::LowestRated => "Lowest Rated",
            Self::TitleAsc => "Title A-Z",
            Self::TitleDesc => "Title Z-A",
        }
    }
}

/// Filters for the movie list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilters {
    /// Genre ids; each is emitted as its own `genres=` pair.
    pub genres: Vec<String>,
    /// Exact release date.
    pub release_date: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Active flag.
    pub is_active: Option<bool>,
    /// Sort key.
    pub ordering: Option<MovieOrdering>,
    /// 1-based page.
    pub page: Option<u32>,
    /// Records per page.
    pub page_size: Option<u32>,
}

impl ListFilters for MovieFilters {
    paging_accessors!(MovieOrdering);

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .genres
            .iter()
            .map(|genre| ("genres", genre.clone()))
            .collect();
        if let Some(date) = self.release_date.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("release_date", date.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
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
                "genres" if !value.is_empty() => filters.genres.push(value.clone()),
                "release_date" => filters.release_date = non_empty(Some(value.clone())),
                "search" => filters.search = non_empty(Some(value.clone())),
                "is_active" => filters.is_active = parse_bool(value),
                "ordering" => filters.ordering = MovieOrdering::parse(value),
                "page" => filters.page = parse_positive(value),
                "page_size" => filters.page_size = parse_positive(value),
                _ => {}
            }
        }
        filters
    }
}

/// Body for `POST /movies/create/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMovieRequest {
    /// Title.
    pub title: String,
    /// Synopsis.
    pub description: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: String,
    /// Rating between 0 and 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Poster URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
    /// Trailer URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    /// Genres to tag the movie with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<String>,
    /// Whether the movie is bookable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for `PATCH /movies/{id}/update/`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateMovieRequest {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Synopsis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Running time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Release date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Rating between 0 and 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Poster URL; an empty string clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
    /// Trailer URL; an empty string clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    /// Replacement genre set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<String>>,
    /// Whether the movie is bookable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateMovieRequest {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop every field that already matches `movie`.
    ///
    /// Genre ids compare as sets and the rating compares numerically against
    /// the server's decimal string.
    #[must_use]
    pub fn without_unchanged(mut self, movie: &Movie) -> Self {
        drop_unchanged_text(&mut self.title, &movie.title);
        drop_unchanged_text(&mut self.description, &movie.description);
        drop_unchanged(&mut self.duration, &movie.duration);
        drop_unchanged_text(&mut self.release_date, movie.release_day());
        if let Some(rating) = self.rating
            && movie
                .rating
                .trim()
                .parse::<f64>()
                .is_ok_and(|current| (current - rating).abs() < 0.005)
        {
            self.rating = None;
        }
        drop_unchanged_text(&mut self.poster_image, &movie.poster_image);
        drop_unchanged_text(
            &mut self.trailer_url,
            movie.trailer_url.as_deref().unwrap_or_default(),
        );
        if let Some(ids) = &self.genre_ids {
            let mut wanted = ids.clone();
            wanted.sort();
            wanted.dedup();
            if wanted == movie.genre_ids() {
                self.genre_ids = None;
            }
        }
        drop_unchanged(&mut self.is_active, &movie.is_active);
        self
    }
}

/// Body for `POST /movies/batch-delete/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchDeleteMoviesRequest {
    /// Ids to delete.
    pub movie_ids: Vec<String>,
}

/// Response of `POST /movies/batch-delete/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchDeleteMoviesResponse {
    /// Server confirmation message.
    pub message: String,
    /// Number of deleted records.
    pub deleted_count: u64,
    /// Ids actually deleted.
    #[serde(default)]
    pub deleted_movies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_are_repeated_and_come_first() {
        let filters = MovieFilters {
            genres: vec!["g1".into(), "g2".into()],
            search: Some("star wars".into()),
            is_active: Some(true),
            ordering: Some(MovieOrdering::Newest),
            page: Some(1),
            page_size: Some(10),
            ..MovieFilters::default()
        };
        assert_eq!(
            filters.to_query_string(),
            "?genres=g1&genres=g2&search=star+wars&is_active=true&ordering=-release_date&page=1&page_size=10"
        );
    }

    #[test]
    fn parser_collects_repeated_genres() {
        let filters = MovieFilters::from_query_string(
            "genres=a&genres=b&release_date=2024-01-01&is_active=false&ordering=title",
        );
        assert_eq!(filters.genres, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(filters.release_date.as_deref(), Some("2024-01-01"));
        assert_eq!(filters.is_active, Some(false));
        assert_eq!(filters.ordering, Some(MovieOrdering::TitleAsc));
    }

    #[test]
    fn movie_decodes_server_shape() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": "m-1", "title": "Dune", "description": "Spice",
                "duration": 155, "duration_formatted": "2h 35m",
                "release_date": "2021-10-22", "rating": "8.00",
                "poster_image": "", "trailer_url": null,
                "genres": [{"id": "b", "name": "Sci-Fi"}, {"id": "a", "name": "Drama"}],
                "is_active": true
            }"#,
        )
        .expect("movie decodes");
        assert_eq!(movie.genre_ids(), vec!["a".to_string(), "b".to_string()]);
        assert!(movie.trailer_url.is_none());
    }

    #[test]
    fn update_omits_unset_fields() {
        let patch = UpdateMovieRequest {
            title: Some("Dune: Part Two".into()),
            ..UpdateMovieRequest::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_string(&patch).expect("serialize"),
            r#"{"title":"Dune: Part Two"}"#
        );
    }

    #[test]
    fn unchanged_fields_are_dropped_from_patch() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": "m-1", "title": "Dune", "description": "Spice", "duration": 155,
                "release_date": "2021-10-22", "rating": "8.00", "poster_image": "",
                "genres": [{"id": "b", "name": "Sci-Fi"}, {"id": "a", "name": "Drama"}],
                "is_active": true}"#,
        )
        .expect("movie decodes");
        let patch = UpdateMovieRequest {
            title: Some("Dune".into()),
            duration: Some(166),
            rating: Some(8.0),
            poster_image: Some(String::new()),
            trailer_url: Some(String::new()),
            genre_ids: Some(vec!["b".into(), "a".into(), "a".into()]),
            is_active: Some(true),
            ..UpdateMovieRequest::default()
        }
        .without_unchanged(&movie);
        assert_eq!(
            patch,
            UpdateMovieRequest {
                duration: Some(166),
                ..UpdateMovieRequest::default()
            }
        );
        assert!(
            UpdateMovieRequest {
                rating: Some(7.5),
                ..UpdateMovieRequest::default()
            }
            .without_unchanged(&movie)
            .rating
            .is_some()
        );
    }

    #[test]
    fn datetime_release_date_matches_its_day() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": "m-1", "title": "Dune", "duration": 155,
                "release_date": "2021-10-22T00:00:00Z", "is_active": true}"#,
        )
        .expect("movie decodes");
        assert_eq!(movie.release_day(), "2021-10-22");
        let unchanged = UpdateMovieRequest {
            release_date: Some("2021-10-22".into()),
            ..UpdateMovieRequest::default()
        }
        .without_unchanged(&movie);
        assert!(unchanged.is_empty());
    }
}
