//! Page validation, id parsing and id allocation.
//!
//! Lives in `core` so both the stores and the HTTP layer apply the same rules.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Longest accepted page title, in bytes.
pub const MAX_TITLE_LEN: usize = 200;

/// Label shown when a page's author cannot be resolved.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a page title (non-empty after trimming, <= 200 bytes).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate page content (non-empty after trimming). Length is not limited.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// Validate a create/replace body: both fields must be present and non-empty.
pub fn validate_page_fields(title: Option<&str>, content: Option<&str>) -> Result<(), CoreError> {
    match (title, content) {
        (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
            validate_title(title)?;
            validate_content(content)
        }
        _ => Err(CoreError::Validation(
            "Title and content are required".into(),
        )),
    }
}

/// Parse a page id taken from a URL path segment.
///
/// Only plain positive decimal integers are accepted.
pub fn parse_page_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.parse::<DbId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(CoreError::Validation("Invalid page ID".into())),
    }
}

// ---------------------------------------------------------------------------
// Ids and timestamps
// ---------------------------------------------------------------------------

/// Next id for a collection: one past the largest existing id, or 1 when empty.
///
/// Ids freed by deletion are only reused if they were the largest.
pub fn next_page_id<I>(ids: I) -> DbId
where
    I: IntoIterator<Item = DbId>,
{
    ids.into_iter().max().unwrap_or(0).max(0) + 1
}

/// Timestamp for an update that is strictly later than `previous`.
///
/// Two writes inside the clock's resolution would otherwise produce equal
/// timestamps.
pub fn bump_timestamp(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

/// Case-insensitive substring match over title or content.
pub fn matches_query(title: &str, content: &str, query: &str) -> bool {
    let needle = query.to_lowercase();
    title.to_lowercase().contains(&needle) || content.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // -- validate_title ------------------------------------------------------

    #[test]
    fn title_valid() {
        assert!(validate_title("My Page").is_ok());
    }

    #[test]
    fn title_empty_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_too_long_rejected() {
        assert!(validate_title(&"a".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LEN)).is_ok());
    }

    // -- validate_content ----------------------------------------------------

    #[test]
    fn content_blank_rejected() {
        assert!(validate_content("").is_err());
        assert!(validate_content(" \n\t").is_err());
    }

    #[test]
    fn large_content_accepted() {
        assert!(validate_content(&"a".repeat(600_000)).is_ok());
    }

    // -- validate_page_fields ------------------------------------------------

    #[test]
    fn missing_fields_rejected() {
        assert!(validate_page_fields(None, Some("body")).is_err());
        assert!(validate_page_fields(Some("title"), None).is_err());
        assert!(validate_page_fields(Some(""), Some("body")).is_err());
        assert!(validate_page_fields(Some("A"), Some("B")).is_ok());
    }

    #[test]
    fn missing_fields_message() {
        let err = validate_page_fields(None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Title and content are required"
        );
    }

    // -- parse_page_id -------------------------------------------------------

    #[test]
    fn page_id_parses_positive_integers() {
        assert_eq!(parse_page_id("42").unwrap(), 42);
    }

    #[test]
    fn page_id_rejects_garbage() {
        assert!(parse_page_id("abc").is_err());
        assert!(parse_page_id("12abc").is_err());
        assert!(parse_page_id("0").is_err());
        assert!(parse_page_id("-3").is_err());
        assert!(parse_page_id("").is_err());
    }

    // -- next_page_id --------------------------------------------------------

    #[test]
    fn next_id_for_empty_collection_is_one() {
        assert_eq!(next_page_id(Vec::new()), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_page_id(vec![3, 1, 7]), 8);
    }

    // -- bump_timestamp ------------------------------------------------------

    #[test]
    fn bump_uses_now_when_later() {
        let prev = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(bump_timestamp(prev, now), now);
    }

    #[test]
    fn bump_is_strictly_increasing_on_clock_tie() {
        let prev = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(bump_timestamp(prev, prev) > prev);
    }

    // -- matches_query -------------------------------------------------------

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_query("Markdown Guide", "", "markdown"));
        assert!(matches_query("Title", "Some BODY text", "body"));
        assert!(!matches_query("Title", "content", "missing"));
    }
}
