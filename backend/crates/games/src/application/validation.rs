//! Game Field Validation

use crate::error::{GameError, GameResult};

/// Maximum length of a game title
pub const MAX_TITLE_LENGTH: usize = 128;

/// Inclusive rating bounds
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

/// Validate a game title: non-empty, bounded length
pub fn validate_title(title: &str) -> GameResult<()> {
    if title.is_empty() {
        return Err(GameError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(GameError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a description: non-empty
pub fn validate_description(description: &str) -> GameResult<()> {
    if description.is_empty() {
        return Err(GameError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a price in cents: zero or positive
pub fn validate_price(price: i32) -> GameResult<()> {
    if price < 0 {
        return Err(GameError::Validation("price must not be negative".to_string()));
    }
    Ok(())
}

/// Validate a review rating: whole number between 1 and 10
pub fn validate_rating(rating: i32) -> GameResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(GameError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("Outer Wilds").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(5999).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(10).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(11).is_err());
    }
}
