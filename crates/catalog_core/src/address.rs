//! Round-trips the inquiry through the navigable address. The whole inquiry
//! travels as JSON in the single query parameter `input`, so a copied link
//! reproduces the same result set.

use shared::inquiry::SearchInquiry;
use tracing::warn;
use url::form_urlencoded;

use crate::error::CatalogError;

pub const INPUT_PARAM: &str = "input";

/// What the controller hands to the navigation layer on every commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Form-encoded query string without the leading `?`.
    pub query: String,
    /// Commits never scroll the page back to the top.
    pub scroll: bool,
}

impl Location {
    pub fn for_inquiry(inquiry: &SearchInquiry) -> Result<Self, CatalogError> {
        Ok(Self {
            query: encode_query(inquiry)?,
            scroll: false,
        })
    }

    /// The raw JSON carried by `input`, if any.
    pub fn input(&self) -> Option<String> {
        input_param(&self.query)
    }
}

pub fn encode_query(inquiry: &SearchInquiry) -> Result<String, CatalogError> {
    let json = inquiry.to_json()?;
    Ok(form_urlencoded::Serializer::new(String::new())
        .append_pair(INPUT_PARAM, &json)
        .finish())
}

/// Accepts a bare query string or a whole link; everything up to the first
/// `?` and any `#fragment` are ignored.
pub fn input_param(query: &str) -> Option<String> {
    let query = query.split_once('?').map_or(query, |(_, rest)| rest);
    let query = query.split_once('#').map_or(query, |(rest, _)| rest);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == INPUT_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Strict read of the address. `Ok(None)` when `input` is absent.
pub fn parse_query(query: &str) -> Result<Option<SearchInquiry>, CatalogError> {
    let Some(raw) = input_param(query) else {
        return Ok(None);
    };

    let inquiry =
        SearchInquiry::from_json(&raw).map_err(|err| CatalogError::MalformedAddressState {
            param: raw.clone(),
            reason: err.to_string(),
        })?;

    if inquiry.page == 0 || inquiry.limit == 0 {
        return Err(CatalogError::MalformedAddressState {
            param: raw,
            reason: "page and limit must be positive".to_string(),
        });
    }

    Ok(Some(inquiry.normalized()))
}

/// Picks the inquiry a page view starts from: the one in the address when it
/// parses, otherwise a copy of the page default.
pub fn initialize(default_inquiry: &SearchInquiry, query: Option<&str>) -> SearchInquiry {
    let Some(query) = query else {
        return default_inquiry.clone();
    };

    match parse_query(query) {
        Ok(Some(inquiry)) => inquiry,
        Ok(None) => default_inquiry.clone(),
        Err(err) => {
            warn!(error = %err, "address state unreadable; falling back to page default");
            default_inquiry.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::CourseCategory, inquiry::defaults};

    #[test]
    fn encoded_query_decodes_to_exact_json() {
        let mut inquiry = defaults::course_list();
        inquiry.search.text = Some("rust & go?".to_string());
        let location = Location::for_inquiry(&inquiry).expect("location");

        assert!(!location.scroll);
        assert!(location.query.starts_with("input="));
        assert_eq!(
            location.input(),
            Some(inquiry.to_json().expect("json"))
        );
    }

    #[test]
    fn initialize_prefers_address_over_default() {
        let mut shared_link = defaults::course_list();
        shared_link.page = 3;
        shared_link.search.category_list = Some(vec![CourseCategory::Design]);
        let query = encode_query(&shared_link).expect("query");

        let restored = initialize(&defaults::course_list(), Some(&format!("?{query}")));
        assert_eq!(restored, shared_link);
    }

    #[test]
    fn full_link_restores_the_linked_inquiry() {
        let mut shared_link = defaults::course_list();
        shared_link.page = 2;
        shared_link.search.category_list = Some(vec![CourseCategory::Design]);
        shared_link.search.text = Some("what? #1".to_string());
        let query = encode_query(&shared_link).expect("query");

        let link = format!("https://courses.example.test/courses?{query}#top");
        assert_eq!(initialize(&defaults::course_list(), Some(&link)), shared_link);
    }

    #[test]
    fn initialize_without_input_copies_default() {
        let default_inquiry = defaults::popular_courses();
        assert_eq!(initialize(&default_inquiry, None), default_inquiry);
        assert_eq!(
            initialize(&default_inquiry, Some("lang=en")),
            default_inquiry
        );
    }

    #[test]
    fn malformed_input_falls_back_to_default() {
        let default_inquiry = defaults::course_list();
        assert_eq!(
            initialize(&default_inquiry, Some("input=%7Bnot-json")),
            default_inquiry
        );
    }

    #[test]
    fn strict_parse_reports_malformed_state() {
        let err = parse_query("input=%7Bnot-json").expect_err("must fail");
        assert!(matches!(err, CatalogError::MalformedAddressState { .. }));

        let err = parse_query(r#"input={"page":0,"limit":8}"#).expect_err("zero page");
        assert!(matches!(err, CatalogError::MalformedAddressState { .. }));
    }

    #[test]
    fn address_with_empty_lists_is_normalized_on_load() {
        let query = encode_query(&{
            let mut inquiry = defaults::course_list();
            inquiry.search.type_list = Some(Vec::new());
            inquiry
        })
        .expect("query");
        let restored = parse_query(&query).expect("parse").expect("inquiry");
        assert_eq!(restored.search.type_list, None);
    }
}
