use cinedesk_api_models::{CreateMovieRequest, FieldErrors, Movie, UpdateMovieRequest, validation};

/// Add/edit movie dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieForm {
    /// Title input.
    pub title: String,
    /// Description textarea.
    pub description: String,
    /// Duration in minutes, as typed.
    pub duration: String,
    /// Release date (`YYYY-MM-DD`).
    pub release_date: String,
    /// Rating, as typed; blank for none.
    pub rating: String,
    /// Poster URL; blank for none.
    pub poster_image: String,
    /// Trailer URL; blank for none.
    pub trailer_url: String,
    /// Checked genre ids.
    pub genre_ids: Vec<String>,
    /// Active switch.
    pub is_active: bool,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: String::new(),
            release_date: String::new(),
            rating: String::new(),
            poster_image: String::new(),
            trailer_url: String::new(),
            genre_ids: Vec::new(),
            is_active: true,
        }
    }
}

impl MovieForm {
    /// Prefill from the movie being edited.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        let rating = movie
            .rating
            .trim()
            .parse::<f64>()
            .map(|rating| rating.to_string())
            .unwrap_or_default();
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            duration: movie.duration.to_string(),
            release_date: movie.release_day().to_string(),
            rating,
            poster_image: movie.poster_image.clone(),
            trailer_url: movie.trailer_url.clone().unwrap_or_default(),
            genre_ids: movie.genre_ids(),
            is_active: movie.is_active,
        }
    }

    /// Check or uncheck a genre.
    pub fn toggle_genre(&mut self, id: &str) {
        if let Some(index) = self.genre_ids.iter().position(|existing| existing == id) {
            self.genre_ids.remove(index);
        } else {
            self.genre_ids.push(id.to_string());
        }
    }

    /// Validate for creation.
    pub fn validate(&self) -> Result<CreateMovieRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.check("title", validation::title(&self.title));
        let description = errors.check("description", validation::description(&self.description));
        let duration = errors.check("duration", validation::duration(&self.duration));
        let release_date =
            errors.check("release_date", validation::release_date(&self.release_date));
        let rating = errors.check("rating", validation::rating(&self.rating));
        let poster_image = errors.check(
            "poster_image",
            validation::optional_url(&self.poster_image),
        );
        let trailer_url = errors.check("trailer_url", validation::optional_url(&self.trailer_url));

        errors.finish(|| {
            Some(CreateMovieRequest {
                title: title?,
                description: description?,
                duration: duration?,
                release_date: release_date?,
                rating: rating?,
                poster_image: poster_image.filter(|url| !url.is_empty()),
                trailer_url: trailer_url.filter(|url| !url.is_empty()),
                genre_ids: self.genre_ids.clone(),
                is_active: Some(self.is_active),
            })
        })
    }

    /// Patch against `movie`; `None` when nothing changed.
    ///
    /// Blank URLs are sent as empty strings so an existing link is cleared.
    pub fn diff(&self, movie: &Movie) -> Result<Option<UpdateMovieRequest>, FieldErrors> {
        let request = self.validate()?;
        let patch = UpdateMovieRequest {
            title: Some(request.title),
            description: Some(request.description),
            duration: Some(request.duration),
            release_date: Some(request.release_date),
            rating: request.rating,
            poster_image: Some(request.poster_image.unwrap_or_default()),
            trailer_url: Some(request.trailer_url.unwrap_or_default()),
            genre_ids: Some(request.genre_ids),
            is_active: request.is_active,
        }
        .without_unchanged(movie);
        Ok((!patch.is_empty()).then_some(patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        serde_json::from_str(
            r#"{"id": "m1", "title": "Heat", "description": "LA heist", "duration": 170,
                "release_date": "1995-12-15", "rating": "8.30",
                "poster_image": "https://img.test/heat.jpg", "trailer_url": null,
                "genres": [{"id": "g2", "name": "Thriller"}, {"id": "g1", "name": "Crime"}],
                "is_active": true}"#,
        )
        .expect("movie decodes")
    }

    #[test]
    fn every_failing_field_is_reported() {
        let form = MovieForm {
            title: "x".repeat(201),
            duration: "0".into(),
            release_date: "15/12/1995".into(),
            rating: "11".into(),
            trailer_url: "youtube".into(),
            ..MovieForm::default()
        };
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors.len(), 6);
        assert_eq!(
            errors.get("title"),
            Some("Title must be less than 200 characters")
        );
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("rating"), Some("Rating must be between 0 and 10"));
        assert_eq!(errors.get("trailer_url"), Some("Must be a valid URL"));
    }

    #[test]
    fn untouched_edit_form_has_no_changes() {
        let movie = movie();
        let form = MovieForm::from_movie(&movie);
        assert_eq!(form.rating, "8.3");
        assert_eq!(form.genre_ids, vec!["g1".to_string(), "g2".to_string()]);
        assert_eq!(form.diff(&movie).expect("valid"), None);
    }

    #[test]
    fn genre_order_does_not_count_as_a_change() {
        let movie = movie();
        let mut form = MovieForm::from_movie(&movie);
        form.toggle_genre("g1");
        form.toggle_genre("g1");
        assert_eq!(form.genre_ids, vec!["g2".to_string(), "g1".to_string()]);
        assert_eq!(form.diff(&movie).expect("valid"), None);
    }

    #[test]
    fn only_changed_fields_are_patched() {
        let movie = movie();
        let mut form = MovieForm::from_movie(&movie);
        form.poster_image.clear();
        form.is_active = false;
        let patch = form.diff(&movie).expect("valid").expect("changes");
        assert_eq!(
            patch,
            UpdateMovieRequest {
                poster_image: Some(String::new()),
                is_active: Some(false),
                ..UpdateMovieRequest::default()
            }
        );
    }

    #[test]
    fn datetime_release_date_is_untouched_on_edit() {
        let mut movie = movie();
        movie.release_date = "1995-12-15T00:00:00Z".into();
        let form = MovieForm::from_movie(&movie);
        assert_eq!(form.release_date, "1995-12-15");
        assert_eq!(form.diff(&movie).expect("valid"), None);
    }

    #[test]
    fn cleared_rating_keeps_the_stored_one() {
        let movie = movie();
        let mut form = MovieForm::from_movie(&movie);
        form.rating.clear();
        assert_eq!(form.diff(&movie).expect("valid"), None);
    }
}
