use copper_async::test_support::fast_backoff;
use copper_async::types::{ListRequest, SearchRequest, Task, TaskFilters, TaskStatus};
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

fn task_json() -> serde_json::Value {
    serde_json::json!({
        "id": 22222,
        "name": "Follow up",
        "assignee_id": 5,
        "due_date": 1_700_000_000,
        "priority": "High",
        "status": "Open",
        "related_resource": {"id": 12345, "type": "person"}
    })
}

#[tokio::test]
async fn list_sends_task_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(query_param("assignee_id", "5"))
        .and(query_param("status", "Open"))
        .and(query_param("related_resource_type", "person"))
        .and(query_param("related_resource_id", "12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([task_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = ListRequest::default().with_filters(TaskFilters {
        assignee_id: Some(5),
        status: Some(TaskStatus::Open),
        related_resource_type: Some("person".into()),
        related_resource_id: Some(12345),
    });
    let tasks = client.tasks().list(&req).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].related_resource.as_ref().unwrap().id, 12345);
}

#[tokio::test]
async fn create_and_search_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks"))
        .and(body_json(serde_json::json!({
            "name": "Follow up",
            "status": "Open",
            "related_resource": {"id": 12345, "type": "person"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/search"))
        .and(body_json(serde_json::json!({
            "page_size": 20,
            "page_number": 1,
            "status": "Completed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let created = client
        .tasks()
        .create(&Task::new("Follow up").related_to("person", 12345))
        .await
        .unwrap();
    assert_eq!(created.meta.id, Some(22222));
    assert_eq!(created.due_date.unwrap().timestamp(), 1_700_000_000);

    let req = SearchRequest::default().with_filters(TaskFilters {
        status: Some(TaskStatus::Completed),
        ..TaskFilters::default()
    });
    let found = client.tasks().search(&req).await.unwrap();
    assert!(found.is_empty());
}
