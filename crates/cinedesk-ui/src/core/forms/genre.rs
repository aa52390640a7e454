use cinedesk_api_models::{CreateGenreRequest, FieldErrors, UpdateGenreRequest, validation};

/// Add/edit genre dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenreForm {
    /// Name input.
    pub name: String,
}

impl GenreForm {
    /// Prefill from an existing name.
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Validate for creation.
    pub fn validate(&self) -> Result<CreateGenreRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validation::genre_name(&self.name));
        errors.finish(|| Some(CreateGenreRequest { name: name? }))
    }

    /// Patch against the current name; `None` when unchanged.
    pub fn diff(&self, current: &str) -> Result<Option<UpdateGenreRequest>, FieldErrors> {
        let CreateGenreRequest { name } = self.validate()?;
        let patch = UpdateGenreRequest { name: Some(name) }.without_unchanged(current);
        Ok((!patch.is_empty()).then_some(patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let errors = GenreForm::with_name("   ").validate().expect_err("blank");
        assert_eq!(errors.get("name"), Some("Genre name is required"));
    }

    #[test]
    fn unchanged_name_yields_no_patch() {
        let form = GenreForm::with_name(" Drama ");
        assert_eq!(form.diff("Drama").expect("valid"), None);
        assert_eq!(
            form.diff("Dramas").expect("valid"),
            Some(UpdateGenreRequest {
                name: Some("Drama".to_string())
            })
        );
    }
}
