use crate::error::{TmError, TmResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> TmResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(TmError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Truncates to at most `max` characters without splitting a UTF-8 sequence.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_accepts_valid_string() {
        assert_eq!(non_blank("Lisbon trip", "name").unwrap(), "Lisbon trip");
    }

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  Rome  ", "name").unwrap(), "Rome");
    }

    #[test]
    fn non_blank_rejects_empty() {
        assert!(non_blank("", "name").is_err());
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
    }

    #[test]
    fn trim_optional_trims() {
        assert_eq!(trim_optional(Some("  hi  ")), Some("hi".to_string()));
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
    }

    #[test]
    fn trim_optional_returns_none_for_none() {
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn truncate_chars_keeps_short_strings() {
        assert_eq!(truncate_chars("déjà", 10), "déjà");
    }

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        assert_eq!(truncate_chars("déjà membre", 4), "déjà");
    }
}
