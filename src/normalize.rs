//! Input cleaning and blank detection.

use crate::models::{NormalizedQuery, QueryInput};

/// Clean a raw location input into a query.
///
/// A query is blank when nothing but whitespace remains, or when the input
/// was a wrapping object with no fields at all.
pub fn normalize(input: &QueryInput) -> NormalizedQuery {
    let (raw, empty_wrapper) = match input {
        QueryInput::Text(text) => (text.as_str(), false),
        QueryInput::Wrapped {
            user_location,
            field_count,
        } => (user_location.as_str(), *field_count == 0),
        QueryInput::Absent => ("", false),
    };

    let trimmed = raw.trim().to_string();
    let upper = trimmed.to_uppercase();

    NormalizedQuery {
        raw: raw.to_string(),
        is_blank: trimmed.is_empty() || empty_wrapper,
        trimmed,
        upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed_and_uppercased() {
        let query = normalize(&QueryInput::from("  Lon&don \n"));
        assert_eq!(query.raw, "  Lon&don \n");
        assert_eq!(query.trimmed, "Lon&don");
        assert_eq!(query.upper, "LON&DON");
        assert!(!query.is_blank);
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        assert!(normalize(&QueryInput::from("   \t")).is_blank);
        assert!(normalize(&QueryInput::from("")).is_blank);
    }

    #[test]
    fn test_absent_is_blank() {
        let query = normalize(&QueryInput::Absent);
        assert!(query.is_blank);
        assert_eq!(query.upper, "");
    }

    #[test]
    fn test_wrapped_form() {
        let query = normalize(&QueryInput::Wrapped {
            user_location: " Bath ".into(),
            field_count: 1,
        });
        assert_eq!(query.trimmed, "Bath");
        assert!(!query.is_blank);
    }

    #[test]
    fn test_wrapped_postcode_is_trimmed() {
        let query = normalize(&QueryInput::Wrapped {
            user_location: " w1 ".into(),
            field_count: 1,
        });
        assert_eq!(query.trimmed, "w1");
        assert_eq!(query.upper, "W1");
    }

    #[test]
    fn test_empty_wrapper_is_blank() {
        let query = normalize(&QueryInput::Wrapped {
            user_location: String::new(),
            field_count: 0,
        });
        assert!(query.is_blank);
    }
}
