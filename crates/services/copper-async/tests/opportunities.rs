use copper_async::test_support::fast_backoff;
use copper_async::types::{
    ListRequest, Opportunity, OpportunityFilters, OpportunityStatus, SearchRequest,
};
use copper_async::{Client, CopperConfig, CopperError};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<CopperConfig> {
    let config = CopperConfig::new()
        .with_api_base(server.uri())
        .with_api_version("v1")
        .with_api_key("test-api-key")
        .with_user_email("dev@example.com");
    Client::with_config(config).with_backoff(fast_backoff(2))
}

fn opportunity_json() -> serde_json::Value {
    serde_json::json!({
        "id": 11111,
        "name": "Big Deal",
        "company_id": 67890,
        "monetary_value": 50000,
        "pipeline_id": 1,
        "pipeline_stage_id": 2,
        "status": "Open",
        "win_probability": 60
    })
}

#[tokio::test]
async fn list_sends_pipeline_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/opportunities"))
        .and(query_param("pipeline_id", "1"))
        .and(query_param_is_missing("pipeline_stage_id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([opportunity_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = ListRequest::default().with_filters(OpportunityFilters {
        pipeline_id: Some(1),
        pipeline_stage_id: None,
    });
    let opps = client.opportunities().list(&req).await.unwrap();

    assert_eq!(opps.len(), 1);
    assert_eq!(opps[0].status, OpportunityStatus::Open);
    assert!((opps[0].monetary_value.unwrap() - 50000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn search_flattens_filters_into_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/opportunities/search"))
        .and(body_json(serde_json::json!({
            "page_size": 20,
            "page_number": 1,
            "query": "deal",
            "pipeline_stage_id": 2
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([opportunity_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new("deal").with_filters(OpportunityFilters {
        pipeline_id: None,
        pipeline_stage_id: Some(2),
    });
    let opps = client.opportunities().search(&req).await.unwrap();
    assert_eq!(opps[0].pipeline_stage_id, Some(2));
}

#[tokio::test]
async fn create_rejects_out_of_range_probability() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut opp = Opportunity::new("Big Deal");
    opp.win_probability = Some(101);

    let err = client.opportunities().create(&opp).await.unwrap_err();
    assert!(matches!(err, CopperError::Validation(_)));
}

#[tokio::test]
async fn update_sends_status_and_value() {
    let server = MockServer::start().await;

    let mut won = opportunity_json();
    won["status"] = "Won".into();

    Mock::given(method("PUT"))
        .and(path("/api/v1/opportunities/11111"))
        .and(body_json(serde_json::json!({
            "name": "Big Deal",
            "monetary_value": 50000.0,
            "status": "Won"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(won))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut opp = Opportunity::new("Big Deal").with_monetary_value(50000.0);
    opp.status = OpportunityStatus::Won;

    let resp = client.opportunities().update(11111, &opp).await.unwrap();
    assert_eq!(resp.status, OpportunityStatus::Won);
}
