use carbon_core::{validate_target_url, ValidationError};
use pretty_assertions::assert_eq;

#[test]
fn missing_or_blank_url_is_reported_as_missing() {
    assert_eq!(validate_target_url(None), Err(ValidationError::MissingUrl));
    assert_eq!(validate_target_url(Some("   ")), Err(ValidationError::MissingUrl));
    assert_eq!(
        ValidationError::MissingUrl.to_string(),
        "Missing URL parameter."
    );
}

#[test]
fn relative_and_non_http_urls_are_invalid() {
    for raw in ["example.com/page", "ftp://example.com/file", "not a url"] {
        let err = validate_target_url(Some(raw)).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidUrl { .. }),
            "{raw} should be invalid"
        );
        assert!(err.details().is_some());
    }
}

#[test]
fn absolute_http_url_is_accepted_and_trimmed() {
    let url = validate_target_url(Some("  https://example.com/a?b=c ")).unwrap();
    assert_eq!(url.as_str(), "https://example.com/a?b=c");
}
