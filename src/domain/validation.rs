//! Field checks applied before a write reaches storage.
//!
//! The schema repeats every limit as a `CHECK` constraint; these give the
//! caller a message naming the field instead of a raw driver error.

use super::DomainError;

pub const AUTHOR_NAME_MAX: usize = 100;
pub const GENRE_NAME_MAX: usize = 200;
pub const BOOK_TITLE_MAX: usize = 200;
pub const BOOK_SUMMARY_MAX: usize = 1000;
pub const ISBN_MAX: usize = 13;
pub const IMPRINT_MAX: usize = 200;

/// Reject blank values and values longer than `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    max_length(field, value, max)
}

pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, max, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_rejected() {
        assert!(matches!(
            required("title", "   ", BOOK_TITLE_MAX),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(AUTHOR_NAME_MAX);
        assert!(required("first_name", &name, AUTHOR_NAME_MAX).is_ok());
        let too_long = "é".repeat(AUTHOR_NAME_MAX + 1);
        assert!(required("first_name", &too_long, AUTHOR_NAME_MAX).is_err());
    }

    #[test]
    fn isbn_limit() {
        assert!(required("isbn", "9780747532699", ISBN_MAX).is_ok());
        assert!(required("isbn", "97807475326990", ISBN_MAX).is_err());
    }
}
