//! Query parameter parsing.
//!
//! Values are decoded as `application/x-www-form-urlencoded`. Only the first
//! occurrence of a key counts, and an empty value is the same as no value.
//! A pair that cannot be decoded (a bad `%XX` escape or a `;` separator) is
//! dropped as if it had not been sent.

use url::form_urlencoded;

use crate::error::GatewayError;

pub const INVALID_PAGE_MESSAGE: &str = "Query parameter 'page' must be a valid integer";
pub const MISSING_TAG_MESSAGE: &str = "Query parameter 'tag' is required";

/// Page used when the caller does not send one.
pub const DEFAULT_PAGE: i64 = 1;

/// Decoded query string of one request.
#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .unwrap_or_default()
            .split('&')
            .filter(|segment| is_decodable(segment))
            .flat_map(|segment| form_urlencoded::parse(segment.as_bytes()).into_owned())
            .collect();
        Self { pairs }
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// The requested page, [`DEFAULT_PAGE`] when absent.
    ///
    /// Any base-10 integer is accepted, zero and negatives included.
    pub fn page(&self) -> Result<i64, GatewayError> {
        match self.first("page") {
            None => Ok(DEFAULT_PAGE),
            Some(raw) => raw
                .parse()
                .map_err(|_| GatewayError::BadRequest(INVALID_PAGE_MESSAGE)),
        }
    }

    /// The required, non-empty tag.
    pub fn tag(&self) -> Result<&str, GatewayError> {
        self.first("tag")
            .ok_or(GatewayError::BadRequest(MISSING_TAG_MESSAGE))
    }
}

/// Whether a raw `key=value` segment decodes cleanly.
fn is_decodable(segment: &str) -> bool {
    if segment.contains(';') {
        return false;
    }
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(query: Option<&str>) -> Result<i64, GatewayError> {
        QueryParams::parse(query).page()
    }

    #[test]
    fn test_page_defaults_to_one() {
        assert_eq!(page_of(None).unwrap(), 1);
        assert_eq!(page_of(Some("")).unwrap(), 1);
        assert_eq!(page_of(Some("page=")).unwrap(), 1);
        assert_eq!(page_of(Some("other=5")).unwrap(), 1);
    }

    #[test]
    fn test_page_accepts_any_integer() {
        assert_eq!(page_of(Some("page=2")).unwrap(), 2);
        assert_eq!(page_of(Some("page=0")).unwrap(), 0);
        assert_eq!(page_of(Some("page=-3")).unwrap(), -3);
        assert_eq!(page_of(Some("page=%2B7")).unwrap(), 7);
    }

    #[test]
    fn test_page_rejects_non_integers() {
        for raw in ["page=abc", "page=1.5", "page=+", "page=%202", "page=99999999999999999999"] {
            match page_of(Some(raw)) {
                Err(GatewayError::BadRequest(msg)) => assert_eq!(msg, INVALID_PAGE_MESSAGE),
                other => panic!("{raw}: expected bad request, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(page_of(Some("page=4&page=abc")).unwrap(), 4);
        assert!(page_of(Some("page=abc&page=4")).is_err());
    }

    #[test]
    fn test_bad_escape_drops_the_pair() {
        assert_eq!(page_of(Some("page=%zz")).unwrap(), 1);
        assert_eq!(page_of(Some("page=%4")).unwrap(), 1);
        assert_eq!(page_of(Some("page=%zz&page=6")).unwrap(), 6);
        assert_eq!(page_of(Some("pa%g=1&page=3")).unwrap(), 3);

        match QueryParams::parse(Some("tag=%zz&page=2")).tag() {
            Err(GatewayError::BadRequest(msg)) => assert_eq!(msg, MISSING_TAG_MESSAGE),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_semicolon_segment_is_dropped() {
        assert_eq!(page_of(Some("page=2;x=1")).unwrap(), 1);
        assert_eq!(page_of(Some("x=1;y=2&page=5")).unwrap(), 5);
    }

    #[test]
    fn test_tag_is_decoded() {
        let params = QueryParams::parse(Some("tag=%E9%85%B7%E5%AE%89+news&page=2"));
        assert_eq!(params.tag().unwrap(), "酷安 news");
    }

    #[test]
    fn test_missing_or_empty_tag() {
        for raw in [None, Some("page=1"), Some("tag=&page=1")] {
            match QueryParams::parse(raw).tag() {
                Err(GatewayError::BadRequest(msg)) => assert_eq!(msg, MISSING_TAG_MESSAGE),
                other => panic!("{raw:?}: expected bad request, got {other:?}"),
            }
        }
    }
}
