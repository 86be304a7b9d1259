use copper_async::types::ResetAt;
use copper_async::{Client, CopperConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn rate_limits_are_reshaped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rate_limits"))
        .and(header("x-pw-useremail", "dev@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "per_second": 10,
            "per_hour": 600,
            "remaining_this_second": 9,
            "remaining_this_hour": 580,
            "reset_at": "2024-01-01T01:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = CopperConfig::new()
        .with_api_base(server.uri())
        .with_api_version("v1")
        .with_api_key("test-api-key")
        .with_user_email("dev@example.com");
    let client = Client::with_config(config);

    let limits = client.rate_limits().get().await.unwrap();
    assert_eq!(limits.requests_per_second, 10);
    assert_eq!(limits.requests_per_hour, 600);
    assert_eq!(limits.remaining.requests_this_second, 9);
    assert_eq!(limits.remaining.requests_this_hour, 580);
    assert_eq!(
        limits.reset_at,
        Some(ResetAt::Text("2024-01-01T01:00:00Z".into()))
    );
    assert!(!limits.is_exhausted());
}
