use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, CompletedTask, Items, Project, Results, Section, SectionListing, Task};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "secret";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: Option<&str>) -> Request<String> {
    let builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{uri}"))
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap(),
        None => builder.body(String::new()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn inbox(app: &Router) -> Project {
    let resp = send(app, request("GET", "/projects", None)).await;
    let page: Results<Project> = body_json(resp).await;
    page.results.into_iter().find(|p| p.inbox_project).unwrap()
}

async fn create_task(app: &Router, body: &str) -> Task {
    let resp = send(app, request("POST", "/tasks", Some(body))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(Request::builder().uri("/api/v1/projects").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["http_code"], 401);
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/tasks")
                .header(http::header::AUTHORIZATION, "Bearer nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- projects ---

#[tokio::test]
async fn projects_list_excludes_archived() {
    let app = app(TOKEN);
    let resp = send(&app, request("GET", "/projects", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Results<Project> = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Inbox");

    let resp = send(&app, request("GET", "/projects/archived", None)).await;
    let page: Results<Project> = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert!(page.results[0].is_archived);
}

#[tokio::test]
async fn create_then_update_project() {
    let app = app(TOKEN);
    let resp = send(
        &app,
        request("POST", "/projects", Some(r#"{"name":"Work","color":"blue","is_favorite":true}"#)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let project: Project = body_json(resp).await;
    assert_eq!(project.color, "blue");
    assert!(project.is_favorite);

    let resp = send(
        &app,
        request("POST", &format!("/projects/{}", project.id), Some(r#"{"name":"Office"}"#)),
    )
    .await;
    let updated: Project = body_json(resp).await;
    assert_eq!(updated.id, project.id);
    assert_eq!(updated.name, "Office");
    assert_eq!(updated.color, "blue");
}

#[tokio::test]
async fn unknown_project_is_404_with_error_body() {
    let app = app(TOKEN);
    let resp = send(&app, request("GET", "/projects/nope", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Project not found");
    assert_eq!(body["http_code"], 404);
}

#[tokio::test]
async fn collaborators_and_permissions() {
    let app = app(TOKEN);
    let project = inbox(&app).await;
    let resp = send(&app, request("GET", &format!("/projects/{}/collaborators", project.id), None)).await;
    let body: Value = body_json(resp).await;
    assert_eq!(body["results"][0]["email"], "mock@example.com");

    let resp = send(&app, request("GET", "/projects/permissions", None)).await;
    let body: Value = body_json(resp).await;
    assert_eq!(body["project_collaborator_actions"][0]["name"], "CREATOR");
    assert_eq!(body["workspace_collaborator_actions"][1]["actions"][0]["name"], "item_add");
}

// --- sections ---

#[tokio::test]
async fn section_lifecycle() {
    let app = app(TOKEN);
    let project = inbox(&app).await;

    let body = format!(r#"{{"name":"Backlog","project_id":"{}"}}"#, project.id);
    let resp = send(&app, request("POST", "/sections", Some(&body))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let section: Section = body_json(resp).await;
    assert_eq!(section.section_order, 1);

    let resp = send(&app, request("GET", &format!("/sections?projectId={}", project.id), None)).await;
    let page: Results<SectionListing> = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].order, 1);

    let resp = send(
        &app,
        request("POST", &format!("/sections/{}", section.id), Some(r#"{"name":"Later"}"#)),
    )
    .await;
    let renamed: Section = body_json(resp).await;
    assert_eq!(renamed.name, "Later");

    let resp = send(&app, request("DELETE", &format!("/sections/{}", section.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app, request("GET", &format!("/sections/{}", section.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- tasks ---

#[tokio::test]
async fn task_list_is_a_bare_array() {
    let app = app(TOKEN);
    create_task(&app, r#"{"content":"Buy milk","labels":["errand"]}"#).await;
    create_task(&app, r#"{"content":"Write report"}"#).await;

    let resp = send(&app, request("GET", "/tasks?label=errand", None)).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].content, "Buy milk");

    let resp = send(&app, request("GET", "/tasks?limit=1", None)).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn task_without_content_is_rejected() {
    let app = app(TOKEN);
    let resp = send(&app, request("POST", "/tasks", Some(r#"{"description":"x"}"#))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["http_code"], 400);
}

#[tokio::test]
async fn task_due_and_duration_appear_only_when_set() {
    let app = app(TOKEN);
    let plain = create_task(&app, r#"{"content":"Plain"}"#).await;
    assert!(plain.due.is_none());

    let resp = send(&app, request("GET", &format!("/tasks/{}", plain.id), None)).await;
    let raw: Value = body_json(resp).await;
    assert!(raw.get("due").is_none());
    assert!(raw.get("duration").is_none());

    let dated = create_task(
        &app,
        r#"{"content":"Dated","due_date":"2025-01-15","duration":45,"duration_unit":"minute"}"#,
    )
    .await;
    assert_eq!(dated.due.unwrap().date, "2025-01-15");
    assert_eq!(dated.duration.unwrap().amount, 45);
}

#[tokio::test]
async fn close_reopen_and_completed_listing() {
    let app = app(TOKEN);
    let task = create_task(&app, r#"{"content":"Finish","due_date":"2025-03-01"}"#).await;

    let resp = send(&app, request("POST", &format!("/tasks/{}/close", task.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, request("GET", "/tasks", None)).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());

    let resp = send(&app, request("GET", "/tasks/completed/by_completion_date?limit=5", None)).await;
    let page: Items<CompletedTask> = body_json(resp).await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].task_id, task.id);

    let resp = send(
        &app,
        request(
            "GET",
            "/tasks/completed/by_due_date?since=2025-02-01&until=2025-04-01",
            None,
        ),
    )
    .await;
    let page: Items<CompletedTask> = body_json(resp).await;
    assert_eq!(page.items.len(), 1);

    let resp = send(&app, request("POST", &format!("/tasks/{}/reopen", task.id), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let reopened: Task = body_json(resp).await;
    assert!(!reopened.is_completed);
}

#[tokio::test]
async fn move_task_into_section() {
    let app = app(TOKEN);
    let project = inbox(&app).await;
    let body = format!(r#"{{"name":"Next","project_id":"{}"}}"#, project.id);
    let section: Section = body_json(send(&app, request("POST", "/sections", Some(&body))).await).await;
    let task = create_task(&app, r#"{"content":"Move me"}"#).await;

    let body = format!(r#"{{"section_id":"{}"}}"#, section.id);
    let resp = send(&app, request("POST", &format!("/tasks/{}/move", task.id), Some(&body))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, request("GET", &format!("/tasks?sectionId={}", section.id), None)).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);
}

#[tokio::test]
async fn filter_by_label_and_unsupported_filter() {
    let app = app(TOKEN);
    create_task(&app, r#"{"content":"Call mom","labels":["phone"]}"#).await;

    let resp = send(&app, request("GET", "/tasks/filter?filter=%40phone", None)).await;
    let page: Results<Task> = body_json(resp).await;
    assert_eq!(page.results.len(), 1);

    let resp = send(&app, request("GET", "/tasks/filter?filter=today", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Invalid filter");
}

#[tokio::test]
async fn quick_add_extracts_labels() {
    let app = app(TOKEN);
    let resp = send(
        &app,
        request("POST", "/tasks/quick", Some(r#"{"text":"Buy eggs @errand @home"}"#)),
    )
    .await;
    let task: Task = body_json(resp).await;
    assert_eq!(task.content, "Buy eggs");
    assert_eq!(task.labels, vec!["errand".to_string(), "home".to_string()]);
    assert_eq!(task.project_id, inbox(&app).await.id);
}

#[tokio::test]
async fn delete_task_then_get_is_404() {
    let app = app(TOKEN);
    let task = create_task(&app, r#"{"content":"Temp"}"#).await;
    let resp = send(&app, request("DELETE", &format!("/tasks/{}", task.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, request("GET", &format!("/tasks/{}", task.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Task not found");
}
