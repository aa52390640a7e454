//! Movie table cells and filter mapping.

use cinedesk_api_models::{Movie, MovieFilters};

/// Genre badges shown per row before collapsing into `+N`.
pub const VISIBLE_GENRES: usize = 2;

/// Running time; prefers the server's formatting.
#[must_use]
pub fn duration_label(movie: &Movie) -> String {
    if !movie.duration_formatted.trim().is_empty() {
        return movie.duration_formatted.clone();
    }
    let hours = movie.duration / 60;
    let minutes = movie.duration % 60;
    match (hours, minutes) {
        (0, minutes) => format!("{minutes}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

/// Rating cell text, `None` when the movie is unrated.
#[must_use]
pub fn rating_label(movie: &Movie) -> Option<String> {
    let rating = movie.rating.trim();
    (!rating.is_empty()).then(|| rating.to_string())
}

/// First genre names plus how many more are hidden.
#[must_use]
pub fn genre_badges(movie: &Movie) -> (Vec<&str>, usize) {
    let names = movie
        .genres
        .iter()
        .take(VISIBLE_GENRES)
        .map(|genre| genre.name.as_str())
        .collect();
    (names, movie.genres.len().saturating_sub(VISIBLE_GENRES))
}

/// Select value for the genre filter; the UI filters by one genre at a time.
#[must_use]
pub fn genre_filter_value(filters: &MovieFilters) -> &str {
    filters.genres.first().map_or("", String::as_str)
}

/// Apply the genre filter select; an empty value clears it.
pub fn set_genre_filter(filters: &mut MovieFilters, value: &str) {
    filters.genres = if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    };
}

/// Ids of the rows on screen, in server order.
#[must_use]
pub fn row_ids(rows: &[Movie]) -> Vec<String> {
    rows.iter().map(|movie| movie.id.clone()).collect()
}

/// Display name of a selected movie for toasts, falling back to the id.
#[must_use]
pub fn title_of(rows: &[Movie], id: &str) -> String {
    rows.iter()
        .find(|movie| movie.id == id)
        .map_or_else(|| id.to_string(), |movie| movie.title.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_api_models::Genre;

    fn movie(duration: u32, formatted: &str, genres: usize) -> Movie {
        Movie {
            id: "m1".into(),
            title: "Heat".into(),
            description: String::new(),
            duration,
            duration_formatted: formatted.into(),
            release_date: "1995-12-15".into(),
            rating: " 8.30 ".into(),
            poster_image: String::new(),
            trailer_url: None,
            genres: (0..genres)
                .map(|index| Genre {
                    id: format!("g{index}"),
                    name: format!("Genre {index}"),
                })
                .collect(),
            is_active: true,
        }
    }

    #[test]
    fn duration_falls_back_to_minutes() {
        assert_eq!(duration_label(&movie(170, "2h 50m", 0)), "2h 50m");
        assert_eq!(duration_label(&movie(170, "", 0)), "2h 50m");
        assert_eq!(duration_label(&movie(120, "", 0)), "2h");
        assert_eq!(duration_label(&movie(45, "", 0)), "45m");
    }

    #[test]
    fn genres_collapse_after_two() {
        let badge_movie = movie(1, "", 4);
        let (names, hidden) = genre_badges(&badge_movie);
        assert_eq!(names, vec!["Genre 0", "Genre 1"]);
        assert_eq!(hidden, 2);
        assert_eq!(genre_badges(&movie(1, "", 1)).1, 0);
    }

    #[test]
    fn rating_is_trimmed_and_optional() {
        assert_eq!(rating_label(&movie(1, "", 0)).as_deref(), Some("8.30"));
        let unrated = Movie {
            rating: String::new(),
            ..movie(1, "", 0)
        };
        assert_eq!(rating_label(&unrated), None);
    }

    #[test]
    fn genre_filter_round_trips_through_select() {
        let mut filters = MovieFilters::default();
        set_genre_filter(&mut filters, "g7");
        assert_eq!(genre_filter_value(&filters), "g7");
        set_genre_filter(&mut filters, "");
        assert!(filters.genres.is_empty());
        assert_eq!(genre_filter_value(&filters), "");
    }

    #[test]
    fn title_lookup_falls_back_to_id() {
        let rows = vec![movie(1, "", 0)];
        assert_eq!(title_of(&rows, "m1"), "Heat");
        assert_eq!(title_of(&rows, "m9"), "m9");
        assert_eq!(row_ids(&rows), vec!["m1".to_string()]);
    }
}
