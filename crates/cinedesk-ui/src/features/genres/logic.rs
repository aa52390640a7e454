//! Genre table cells.

use cinedesk_api_models::GenreDetail;

use crate::core::format::display_date;

/// Placeholder for a missing timestamp.
pub const NO_DATE: &str = "-";

/// Created column text.
#[must_use]
pub fn created_label(genre: &GenreDetail) -> String {
    display_date(&genre.created_at).unwrap_or_else(|| NO_DATE.to_string())
}

/// Updated column text.
#[must_use]
pub fn updated_label(genre: &GenreDetail) -> String {
    display_date(&genre.updated_at).unwrap_or_else(|| NO_DATE.to_string())
}

/// Extra line in the delete confirmation when movies still use the genre.
#[must_use]
pub fn delete_warning(genre: &GenreDetail) -> Option<String> {
    match genre.movies_count {
        0 => None,
        1 => Some("1 movie is tagged with this genre.".to_string()),
        count => Some(format!("{count} movies are tagged with this genre.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(movies_count: u64, created_at: &str) -> GenreDetail {
        GenreDetail {
            id: "g1".into(),
            name: "Drama".into(),
            movies_count,
            created_at: created_at.into(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn missing_dates_show_placeholder() {
        let genre = genre(0, "2024-05-02T10:00:00Z");
        assert_eq!(created_label(&genre), "May 2, 2024");
        assert_eq!(updated_label(&genre), NO_DATE);
    }

    #[test]
    fn warning_counts_tagged_movies() {
        assert_eq!(delete_warning(&genre(0, "")), None);
        assert_eq!(
            delete_warning(&genre(1, "")).as_deref(),
            Some("1 movie is tagged with this genre.")
        );
        assert_eq!(
            delete_warning(&genre(12, "")).as_deref(),
            Some("12 movies are tagged with this genre.")
        );
    }
}
