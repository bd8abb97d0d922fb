use super::ValidationError;

const MAX_TITLE_LENGTH: usize = 200;

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::TitleEmpty);
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }

    Ok(())
}
