use copper_async::test_support::fast_backoff;
use copper_async::types::{Company, ListRequest, SearchRequest};
use copper_async::{Client, CopperConfig};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<CopperConfig> {
    let config = CopperConfig::new()
        .with_api_base(server.uri())
        .with_api_version("v1")
        .with_api_key("test-api-key")
        .with_user_email("dev@example.com");
    Client::with_config(config).with_backoff(fast_backoff(2))
}

fn company_json() -> serde_json::Value {
    serde_json::json!({
        "id": 67890,
        "name": "Example Corp",
        "email_domain": "example.com",
        "phone_numbers": [{"number": "+1234567890", "category": "work"}],
        "websites": [{"url": "https://example.com", "category": "work"}],
        "address": {"street": "456 Business Ave", "city": "Commerce City", "state": "NY"},
        "interaction_count": 12,
        "date_created": 1_700_000_000
    })
}

#[tokio::test]
async fn company_crud_round() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/companies"))
        .and(body_json(serde_json::json!({"name": "Example Corp", "email_domain": "example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(company_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/companies/67890"))
        .respond_with(ResponseTemplate::new(200).set_body_json(company_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/companies/67890"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let created = client
        .companies()
        .create(&Company::new("Example Corp").with_email_domain("example.com"))
        .await
        .unwrap();
    assert_eq!(created.meta.id, Some(67890));

    let fetched = client.companies().get(67890).await.unwrap();
    assert_eq!(fetched.interaction_count, Some(12));
    assert_eq!(
        fetched.address.as_ref().unwrap().state.as_deref(),
        Some("NY")
    );

    let deleted = client.companies().delete(67890).await.unwrap();
    assert!(deleted.is_deleted);
}

#[tokio::test]
async fn list_and_search_companies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/companies"))
        .and(query_param("page_size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([company_json()])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/companies/search"))
        .and(body_json(serde_json::json!({
            "page_size": 20,
            "page_number": 1,
            "query": "example",
            "email_domain": "example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([company_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let listed = client
        .companies()
        .list(&ListRequest::default().with_page_size(50))
        .await
        .unwrap();
    assert_eq!(listed[0].name, "Example Corp");

    let found = client
        .companies()
        .search(&SearchRequest::new("example").with_field("email_domain", "example.com"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn negative_interaction_count_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut company = Company::new("Example Corp");
    company.interaction_count = Some(-5);

    let err = client.companies().update(1, &company).await.unwrap_err();
    assert!(err.to_string().contains("interaction_count"));
}
