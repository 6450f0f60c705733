//! Endpoint behaviour for the task API.

use axum::{
    Router,
    http::{Method, StatusCode, header},
};
use rstest::rstest;
use serde_json::{Value, json};
use taskhub::task::adapters::http::ErrorBody;

use crate::http::helpers::{app, read_json, read_text, send};

fn error_body(message: &str) -> ErrorBody {
    ErrorBody {
        error: message.to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_responsive(app: Router) -> eyre::Result<()> {
    let response = send(&app, Method::GET, "/health", None).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await?, "The API is responsive!");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_starts_empty(app: Router) -> eyre::Result<()> {
    let response = send(&app, Method::GET, "/tasks", None).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json::<Value>(response).await?, json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_created_task_with_location(app: Router) -> eyre::Result<()> {
    let response = send(
        &app,
        Method::POST,
        "/tasks",
        Some(r#"{"title":"Write docs","status":"TODO"}"#),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str())
            .transpose()?,
        Some("/tasks/1")
    );
    assert_eq!(
        read_json::<Value>(response).await?,
        json!({"id": 1, "title": "Write docs", "status": "TODO"})
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_status_and_ignores_unknown_fields(app: Router) -> eyre::Result<()> {
    let response = send(
        &app,
        Method::POST,
        "/tasks",
        Some(r#"{"title":"  Triage  ","priority":"high"}"#),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        read_json::<Value>(response).await?,
        json!({"id": 1, "title": "Triage", "status": "BACKLOG"})
    );
    Ok(())
}

#[rstest]
#[case::blank(r#"{"title":"   "}"#, "Title cannot be empty")]
#[case::empty(r#"{"title":""}"#, "Title cannot be empty")]
#[case::missing_title(r#"{"status":"TODO"}"#, "Invalid JSON body")]
#[case::unknown_status(r#"{"title":"A","status":"LOST"}"#, "Invalid JSON body")]
#[case::lowercase_status(r#"{"title":"A","status":"todo"}"#, "Invalid JSON body")]
#[case::malformed("{not json", "Invalid JSON body")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_is_rejected_without_storing(
    app: Router,
    #[case] body: &str,
    #[case] message: &str,
) -> eyre::Result<()> {
    let response = send(&app, Method::POST, "/tasks", Some(body)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json::<ErrorBody>(response).await?, error_body(message));

    let listed = send(&app, Method::GET, "/tasks", None).await?;
    assert_eq!(read_json::<Value>(listed).await?, json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_title_is_rejected(app: Router) -> eyre::Result<()> {
    let body = json!({ "title": "x".repeat(256) }).to_string();

    let response = send(&app, Method::POST, "/tasks", Some(&body)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Title is too long")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nul_in_title_is_rejected_on_create_and_update(app: Router) -> eyre::Result<()> {
    let created = send(&app, Method::POST, "/tasks", Some(r#"{"title":"a\u0000b"}"#)).await?;
    assert_eq!(created.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json::<ErrorBody>(created).await?,
        error_body("Title contains invalid characters")
    );

    send(&app, Method::POST, "/tasks", Some(r#"{"title":"A"}"#)).await?;
    let updated = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(r#"{"title":"A\u0000","status":"DONE"}"#),
    )
    .await?;
    assert_eq!(updated.status(), StatusCode::BAD_REQUEST);

    let listed = send(&app, Method::GET, "/tasks", None).await?;
    assert_eq!(
        read_json::<Value>(listed).await?,
        json!([{"id": 1, "title": "A", "status": "BACKLOG"}])
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_json_content_type_is_rejected(app: Router) -> eyre::Result<()> {
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .body(axum::body::Body::from(r#"{"title":"A"}"#))?;

    let response = tower::ServiceExt::oneshot(app, request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Invalid JSON body")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_is_not_found(app: Router) -> eyre::Result<()> {
    let response = send(&app, Method::GET, "/tasks/9999", None).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Task not found")
    );
    Ok(())
}

#[rstest]
#[case::get(Method::GET, None)]
#[case::put(Method::PUT, Some(r#"{"title":"A","status":"DONE"}"#))]
#[case::delete(Method::DELETE, None)]
#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_ids_are_rejected(
    app: Router,
    #[case] method: Method,
    #[case] body: Option<&str>,
    #[values("abc", "-1", "1.5", "18446744073709551616")] id: &str,
) -> eyre::Result<()> {
    let response = send(&app, method, &format!("/tasks/{id}"), body).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json::<ErrorBody>(response).await?, error_body("Invalid id"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_title_and_status(app: Router) -> eyre::Result<()> {
    send(&app, Method::POST, "/tasks", Some(r#"{"title":"A"}"#)).await?;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(r#"{"title":"A2","status":"DONE"}"#),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json::<Value>(response).await?,
        json!({"id": 1, "title": "A2", "status": "DONE"})
    );

    let fetched = send(&app, Method::GET, "/tasks/1", None).await?;
    assert_eq!(
        read_json::<Value>(fetched).await?,
        json!({"id": 1, "title": "A2", "status": "DONE"})
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_requires_status(app: Router) -> eyre::Result<()> {
    send(&app, Method::POST, "/tasks", Some(r#"{"title":"A"}"#)).await?;

    let response = send(&app, Method::PUT, "/tasks/1", Some(r#"{"title":"A2"}"#)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Invalid JSON body")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_blank_title_keeps_the_task(app: Router) -> eyre::Result<()> {
    send(&app, Method::POST, "/tasks", Some(r#"{"title":"A"}"#)).await?;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(r#"{"title":" ","status":"DONE"}"#),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Title cannot be empty")
    );
    let fetched = send(&app, Method::GET, "/tasks/1", None).await?;
    assert_eq!(
        read_json::<Value>(fetched).await?,
        json!({"id": 1, "title": "A", "status": "BACKLOG"})
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_task_is_not_found(app: Router) -> eyre::Result<()> {
    let response = send(
        &app,
        Method::PUT,
        "/tasks/42",
        Some(r#"{"title":"A","status":"DONE"}"#),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json::<ErrorBody>(response).await?,
        error_body("Task not found")
    );
    let listed = send(&app, Method::GET, "/tasks", None).await?;
    assert_eq!(read_json::<Value>(listed).await?, json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_once(app: Router) -> eyre::Result<()> {
    send(&app, Method::POST, "/tasks", Some(r#"{"title":"A"}"#)).await?;

    let first = send(&app, Method::DELETE, "/tasks/1", None).await?;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(read_text(first).await?.is_empty());

    let second = send(&app, Method::DELETE, "/tasks/1", None).await?;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json::<ErrorBody>(second).await?,
        error_body("Task not found")
    );

    let fetched = send(&app, Method::GET, "/tasks/1", None).await?;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_reflects_creation_order(app: Router) -> eyre::Result<()> {
    for title in ["one", "two", "three"] {
        let body = json!({ "title": title }).to_string();
        send(&app, Method::POST, "/tasks", Some(&body)).await?;
    }
    send(&app, Method::DELETE, "/tasks/2", None).await?;

    let response = send(&app, Method::GET, "/tasks", None).await?;

    assert_eq!(
        read_json::<Value>(response).await?,
        json!([
            {"id": 1, "title": "one", "status": "BACKLOG"},
            {"id": 3, "title": "three", "status": "BACKLOG"},
        ])
    );
    Ok(())
}
