use crate::error::AppError;

const MAX_COMMENT_LENGTH: usize = 2000;

pub fn validate_comment_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::validation("Comment content is required"));
    }

    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::validation("Comment content is too long (max 2000 characters)"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_content_validation() {
        assert!(validate_comment_content("Looks good to me").is_ok());
        assert!(validate_comment_content("").is_err());
        assert!(validate_comment_content("   ").is_err());
        assert!(validate_comment_content(&"a".repeat(2000)).is_ok());
        assert!(validate_comment_content(&"a".repeat(2001)).is_err());
    }
}
