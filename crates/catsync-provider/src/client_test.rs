use super::*;

fn marketplace() -> MarketplaceConfig {
    MarketplaceConfig {
        domain: "amazon.de".to_owned(),
        language: "de_DE".to_owned(),
        currency: "eur".to_owned(),
        customer_zipcode: "10115".to_owned(),
    }
}

fn test_client(base_url: &str) -> ProviderClient {
    ProviderClient::with_base_url("test-key", marketplace(), 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_puts_api_key_first() {
    let client = test_client("https://api.rainforestapi.com");
    let url = client.build_url("collections", &[("page", "2")]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.rainforestapi.com/collections?api_key=test-key&page=2"
    );
}

#[test]
fn build_url_keeps_nested_path() {
    let client = test_client("https://api.rainforestapi.com/");
    let url = client.build_url("collections/ABC/requests/3", &[]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.rainforestapi.com/collections/ABC/requests/3?api_key=test-key"
    );
}

#[test]
fn build_url_encodes_search_term() {
    let client = test_client("https://api.rainforestapi.com");
    let url = client
        .build_url("request", &[("search_term", "hose & reel")])
        .unwrap();
    assert!(
        url.as_str().contains("hose+%26+reel") || url.as_str().contains("hose%20%26%20reel"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn with_base_url_rejects_invalid_url() {
    let result = ProviderClient::with_base_url("k", marketplace(), 30, "::not a url::");
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}

#[test]
fn request_info_message_reads_nested_message() {
    let body = r#"{"request_info":{"success":false,"message":"Collection has no Requests"}}"#;
    assert_eq!(
        request_info_message(body),
        (Some(false), Some("Collection has no Requests".to_owned()))
    );
}

#[test]
fn request_info_message_tolerates_non_json() {
    assert_eq!(request_info_message("<html>502</html>"), (None, None));
}

#[test]
fn ensure_success_rejects_flagged_failure_on_200() {
    let raw = RawResponse {
        status: StatusCode::OK,
        body: r#"{"request_info":{"success":false,"message":"quota"}}"#.to_owned(),
    };
    let err = ProviderClient::ensure_success(&raw, "collections").unwrap_err();
    assert!(
        matches!(err, ProviderError::Api { status: 200, ref message, .. } if message.as_deref() == Some("quota")),
        "expected Api error, got: {err:?}"
    );
}

#[test]
fn ensure_success_accepts_plain_2xx() {
    let raw = RawResponse {
        status: StatusCode::OK,
        body: r#"{"collections":[]}"#.to_owned(),
    };
    assert!(ProviderClient::ensure_success(&raw, "collections").is_ok());
}
