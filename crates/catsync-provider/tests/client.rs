//! Integration tests for `ProviderClient` using wiremock HTTP mocks.

use catsync_core::MarketplaceConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catsync_provider::{
    CollectionSettings, MembershipPage, ProviderClient, ProviderError, EMPTY_COLLECTION_MESSAGE,
};

fn marketplace() -> MarketplaceConfig {
    MarketplaceConfig {
        domain: "amazon.de".to_owned(),
        language: "de_DE".to_owned(),
        currency: "eur".to_owned(),
        customer_zipcode: "10115".to_owned(),
    }
}

fn test_client(base_url: &str) -> ProviderClient {
    ProviderClient::with_base_url("test-key", marketplace(), 5, base_url)
        .expect("client construction should not fail")
}

// ---------------------------------------------------------------------------
// collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_collections_page_parses_collections_and_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true },
            "collections": [
                { "id": "A1", "name": "garden hose", "enabled": true, "requests_count": 12 },
                { "id": "A2", "name": "Shoes " }
            ],
            "total_pages": 4
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .list_collections_page(2)
        .await
        .expect("should parse page");

    assert_eq!(page.total_pages, 4);
    assert_eq!(page.collections.len(), 2);
    assert_eq!(page.collections[0].id, "A1");
    assert_eq!(page.collections[1].name, "Shoes ");
}

#[tokio::test]
async fn list_collections_page_defaults_total_pages_to_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "collections": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_collections_page(1).await.unwrap();
    assert_eq!(page.total_pages, 1);
    assert!(page.collections.is_empty());
}

#[tokio::test]
async fn create_collection_returns_assigned_id() {
    let server = MockServer::start().await;
    let body = CollectionSettings::default().new_collection("garden hose");

    Mock::given(method("POST"))
        .and(path("/collections"))
        .and(query_param("api_key", "test-key"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true },
            "collection": { "id": "NEW1", "name": "garden hose" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client
        .create_collection(&body)
        .await
        .expect("create should succeed");
    assert_eq!(id, "NEW1");
}

#[tokio::test]
async fn create_collection_without_id_is_missing_collection_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true },
            "collection": {}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = CollectionSettings::default().new_collection("garden hose");
    let result = client.create_collection(&body).await;
    assert!(
        matches!(result, Err(ProviderError::MissingCollectionId { ref name }) if name == "garden hose"),
        "expected MissingCollectionId, got: {result:?}"
    );
}

#[tokio::test]
async fn get_collection_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "request_info": { "success": false, "message": "Collection not found" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_collection("GONE").await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn get_collection_returns_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": { "id": "A1", "name": "garden hose" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let collection = client.get_collection("A1").await.unwrap();
    assert_eq!(collection.name, "garden hose");
}

// ---------------------------------------------------------------------------
// membership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_collection_signal_is_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "request_info": { "success": false, "message": EMPTY_COLLECTION_MESSAGE }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_membership_page("A1", 1).await.unwrap();
    assert!(matches!(page, MembershipPage::NoRequests));

    let ids = client.list_all_member_ids("A1").await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn other_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "request_info": { "success": false, "message": "Internal error" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_membership_page("A1", 1).await;
    assert!(
        matches!(result, Err(ProviderError::Api { status: 500, ref message, .. }) if message.as_deref() == Some("Internal error")),
        "expected Api 500, got: {result:?}"
    );
}

#[tokio::test]
async fn empty_collection_message_on_client_error_is_not_special() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "request_info": { "success": false, "message": EMPTY_COLLECTION_MESSAGE }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_membership_page("A1", 1).await;
    assert!(matches!(result, Err(ProviderError::Api { status: 400, .. })));
}

#[tokio::test]
async fn list_all_member_ids_collects_products_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [
                { "type": "product", "asin": "B001" },
                { "type": "search", "search_term": "ignored" },
                { "type": "product", "asin": "B002" }
            ],
            "requests_page_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{ "type": "product", "asin": "B003" }],
            "requests_page_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client.list_all_member_ids("A1").await.unwrap();
    assert_eq!(ids, vec!["B001", "B002", "B003"]);
}

#[tokio::test]
async fn list_all_member_ids_discards_partial_results_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{ "type": "product", "asin": "B001" }],
            "requests_page_count": 3
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/A1/requests/2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "request_info": { "success": false, "message": "forbidden" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_all_member_ids("A1").await;
    assert!(matches!(result, Err(ProviderError::Api { status: 403, .. })));
}

#[tokio::test]
async fn append_members_sends_marketplace_settings_per_item() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/collections/A1"))
        .and(query_param("api_key", "test-key"))
        .and(body_json(json!({
            "requests": [
                {
                    "type": "product",
                    "amazon_domain": "amazon.de",
                    "asin": "B001",
                    "include_summarization_attributes": "true",
                    "include_a_plus_body": "true",
                    "language": "de_DE",
                    "currency": "eur",
                    "customer_zipcode": "10115",
                    "include_html": "false"
                },
                {
                    "type": "product",
                    "amazon_domain": "amazon.de",
                    "asin": "B002",
                    "include_summarization_attributes": "true",
                    "include_a_plus_body": "true",
                    "language": "de_DE",
                    "currency": "eur",
                    "customer_zipcode": "10115",
                    "include_html": "false"
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .append_members("A1", &["B001".to_owned(), "B002".to_owned()])
        .await
        .expect("append should succeed");
}

#[tokio::test]
async fn append_members_reports_api_failure() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/collections/A1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "request_info": { "success": false, "message": "too many requests in collection" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.append_members("A1", &["B001".to_owned()]).await;
    assert!(matches!(result, Err(ProviderError::Api { status: 400, .. })));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_fixed_query_and_returns_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/request"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("type", "search"))
        .and(query_param("amazon_domain", "amazon.de"))
        .and(query_param("search_term", "garden hose"))
        .and(query_param("exclude_sponsored", "true"))
        .and(query_param("language", "de_DE"))
        .and(query_param("currency", "eur"))
        .and(query_param("customer_zipcode", "10115"))
        .and(query_param("output", "json"))
        .and(query_param("page", "1"))
        .and(query_param("sort_by", "featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true },
            "search_results": [
                { "position": 1, "asin": "B001", "title": "Hose 20m" },
                { "position": 2, "asin": "B002", "title": "Hose 30m" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search("garden hose")
        .await
        .unwrap()
        .expect("results present");
    let asins: Vec<&str> = results.iter().filter_map(|r| r.asin.as_deref()).collect();
    assert_eq!(asins, vec!["B001", "B002"]);
}

#[tokio::test]
async fn search_without_results_array_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": true }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.search("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    // Port 1 on localhost refuses connections.
    let client = test_client("http://127.0.0.1:1");
    let err = client.search("garden hose").await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert!(
        !err.to_string().contains("test-key"),
        "api key must not leak into error text: {err}"
    );
}
