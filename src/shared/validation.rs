use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::core::error::AppError;

lazy_static! {
    /// Regex for product scrape ids. The id is interpolated into object
    /// storage keys, so separators and dots are rejected.
    /// - Valid: "B07XJ8C8F5", "123456", "sku_42-a"
    /// - Invalid: "../etc", "a/b", "id.png", "a b"
    pub static ref SCRAPE_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Accepts a JSON string or integer and yields it as a string.
///
/// Scrape ids arrive either way depending on the client that produced them.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    }))
}

/// Trim a string field and treat blank as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the 400 for a request body with absent fields.
///
/// `fields` pairs each field name with whether it was present; the error
/// lists the absent ones in declaration order.
pub fn missing_fields(fields: &[(&str, bool)]) -> AppError {
    AppError::MissingFields(
        fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<String>,
    }

    #[test]
    fn test_scrape_id_regex_valid() {
        assert!(SCRAPE_ID_REGEX.is_match("B07XJ8C8F5"));
        assert!(SCRAPE_ID_REGEX.is_match("123456"));
        assert!(SCRAPE_ID_REGEX.is_match("sku_42-a"));
    }

    #[test]
    fn test_scrape_id_regex_invalid() {
        assert!(!SCRAPE_ID_REGEX.is_match("../etc")); // traversal
        assert!(!SCRAPE_ID_REGEX.is_match("a/b")); // separator
        assert!(!SCRAPE_ID_REGEX.is_match("id.png")); // dot
        assert!(!SCRAPE_ID_REGEX.is_match("a b")); // space
        assert!(!SCRAPE_ID_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_deserialize_id_accepts_string_and_number() {
        let probe: Probe = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(probe.id.as_deref(), Some("abc"));

        let probe: Probe = serde_json::from_value(json!({"id": 1042})).unwrap();
        assert_eq!(probe.id.as_deref(), Some("1042"));

        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.id, None);

        let probe: Probe = serde_json::from_value(json!({"id": null})).unwrap();
        assert_eq!(probe.id, None);
    }

    #[test]
    fn test_deserialize_id_rejects_other_types() {
        let result: Result<Probe, _> = serde_json::from_value(json!({"id": [1, 2]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_lists_absent_in_order() {
        let err = missing_fields(&[
            ("scrape_id", false),
            ("review_score", true),
            ("reviewer_email", false),
        ]);
        match err {
            AppError::MissingFields(fields) => {
                assert_eq!(fields, vec!["scrape_id", "reviewer_email"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  a@x.com ".into())).as_deref(), Some("a@x.com"));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
