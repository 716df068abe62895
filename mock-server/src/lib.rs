//! In-memory emulation of the Todoist REST API (v1).
//!
//! Serves the same paths, envelopes and error conventions as the vendor so
//! the client can be exercised over real HTTP: `{"results": [...]}` and
//! `{"items": [...]}` list envelopes, a bare array for the task list, 204 for
//! close/move/delete, and `{"error", "http_code"}` bodies for failures.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, warn};

pub use store::{Collaborator, CompletedTask, Due, Duration, Project, Section, SectionListing, Store, Task};

use store::{new_id, now, MOCK_USER_ID};

pub const API_PREFIX: &str = "/api/v1";

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Arc<str>,
}

/// Failure body in the vendor's format.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found"),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "http_code": self.status.as_u16(),
        }));
        (self.status, body).into_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct Results<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

fn page<T>(mut results: Vec<T>, limit: Option<usize>) -> Results<T> {
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    Results {
        results,
        next_cursor: None,
    }
}

/// Build the router, accepting only `Bearer {token}`.
pub fn app(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::seeded())),
        token: Arc::from(token),
    };

    let api = Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/archived", get(list_archived_projects))
        .route("/projects/permissions", get(project_permissions))
        .route("/projects/{id}", get(get_project).post(update_project))
        .route("/projects/{id}/collaborators", get(list_collaborators))
        .route("/sections", get(list_sections).post(create_section))
        .route(
            "/sections/{id}",
            get(get_section).post(update_section).delete(delete_section),
        )
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/filter", get(filter_tasks))
        .route("/tasks/quick", post(quick_add_task))
        .route("/tasks/completed/by_completion_date", get(completed_by_completion_date))
        .route("/tasks/completed/by_due_date", get(completed_by_due_date))
        .route(
            "/tasks/{id}",
            get(get_task).post(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/close", post(close_task))
        .route("/tasks/{id}/reopen", post(reopen_task))
        .route("/tasks/{id}/move", post(move_task))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new().nest(API_PREFIX, api).with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if supplied != Some(expected.as_str()) {
        warn!(uri = %request.uri(), "rejecting request without a valid token");
        return ApiError::unauthorized().into_response();
    }
    debug!(method = %request.method(), uri = %request.uri(), "handling request");
    next.run(request).await
}

// --- projects ---

#[derive(Deserialize)]
struct Limit {
    limit: Option<usize>,
}

async fn list_projects(State(state): State<AppState>, Query(q): Query<Limit>) -> Json<Results<Project>> {
    let store = state.db.read().await;
    let mut projects: Vec<Project> = store
        .projects
        .values()
        .filter(|project| !project.is_archived)
        .cloned()
        .collect();
    projects.sort_by_key(|project| project.child_order);
    Json(page(projects, q.limit))
}

async fn list_archived_projects(
    State(state): State<AppState>,
    Query(q): Query<Limit>,
) -> Json<Results<Project>> {
    let store = state.db.read().await;
    let projects = store
        .projects
        .values()
        .filter(|project| project.is_archived)
        .cloned()
        .collect();
    Json(page(projects, q.limit))
}

async fn project_permissions() -> Json<serde_json::Value> {
    let everything = json!([
        {"name": "item_add"}, {"name": "item_update"}, {"name": "item_delete"},
        {"name": "project_update"}, {"name": "project_delete"}
    ]);
    Json(json!({
        "project_collaborator_actions": [
            {"name": "CREATOR", "actions": everything.clone()},
            {"name": "READ_WRITE", "actions": [{"name": "item_add"}, {"name": "item_update"}]},
            {"name": "READ_ONLY", "actions": []}
        ],
        "workspace_collaborator_actions": [
            {"name": "ADMIN", "actions": everything},
            {"name": "MEMBER", "actions": [{"name": "item_add"}]}
        ]
    }))
}

async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Project>, ApiError> {
    let store = state.db.read().await;
    store
        .projects
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project"))
}

#[derive(Deserialize)]
struct CreateProject {
    name: Option<String>,
    description: Option<String>,
    parent_id: Option<String>,
    color: Option<String>,
    is_favorite: Option<bool>,
    view_style: Option<String>,
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> Result<Json<Project>, ApiError> {
    let name = input
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Required argument is missing: name"))?;

    let mut store = state.db.write().await;
    if let Some(parent_id) = &input.parent_id {
        if !store.projects.contains_key(parent_id) {
            return Err(ApiError::not_found("Parent project"));
        }
    }
    let mut project = Project::new(name);
    project.child_order = i32::try_from(store.projects.len()).unwrap_or(i32::MAX);
    project.description = input.description.unwrap_or_default();
    project.parent_id = input.parent_id;
    if let Some(color) = input.color {
        project.color = color;
    }
    project.is_favorite = input.is_favorite.unwrap_or(false);
    if let Some(view_style) = input.view_style {
        project.view_style = view_style;
    }
    store.projects.insert(project.id.clone(), project.clone());
    Ok(Json(project))
}

#[derive(Deserialize)]
struct UpdateProject {
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
    is_favorite: Option<bool>,
    view_style: Option<String>,
    is_collapsed: Option<bool>,
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<Project>, ApiError> {
    let mut store = state.db.write().await;
    let project = store
        .projects
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Project"))?;
    if let Some(name) = input.name {
        project.name = name;
    }
    if let Some(description) = input.description {
        project.description = description;
    }
    if let Some(color) = input.color {
        project.color = color;
    }
    if let Some(is_favorite) = input.is_favorite {
        project.is_favorite = is_favorite;
    }
    if let Some(view_style) = input.view_style {
        project.view_style = view_style;
    }
    if let Some(is_collapsed) = input.is_collapsed {
        project.is_collapsed = is_collapsed;
    }
    project.updated_at = now();
    Ok(Json(project.clone()))
}

async fn list_collaborators(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<Limit>,
) -> Result<Json<Results<Collaborator>>, ApiError> {
    let store = state.db.read().await;
    if !store.projects.contains_key(&id) {
        return Err(ApiError::not_found("Project"));
    }
    Ok(Json(page(store.collaborators(), q.limit)))
}

// --- sections ---

#[derive(Deserialize)]
struct SectionFilter {
    #[serde(rename = "projectId")]
    project_id: Option<String>,
    limit: Option<usize>,
}

async fn list_sections(
    State(state): State<AppState>,
    Query(q): Query<SectionFilter>,
) -> Json<Results<SectionListing>> {
    let store = state.db.read().await;
    let mut sections: Vec<&Section> = store
        .sections
        .values()
        .filter(|section| q.project_id.as_ref().map_or(true, |id| &section.project_id == id))
        .collect();
    sections.sort_by_key(|section| section.section_order);
    let listed = sections.into_iter().map(SectionListing::from).collect();
    Json(page(listed, q.limit))
}

#[derive(Deserialize)]
struct CreateSection {
    name: String,
    project_id: String,
    order: Option<i32>,
}

async fn create_section(
    State(state): State<AppState>,
    Json(input): Json<CreateSection>,
) -> Result<Json<Section>, ApiError> {
    let mut store = state.db.write().await;
    if !store.projects.contains_key(&input.project_id) {
        return Err(ApiError::not_found("Project"));
    }
    let timestamp = now();
    let section = Section {
        id: new_id(),
        name: input.name,
        user_id: MOCK_USER_ID.to_string(),
        section_order: input
            .order
            .unwrap_or_else(|| store.next_section_order(&input.project_id)),
        project_id: input.project_id,
        is_collapsed: false,
        added_at: timestamp.clone(),
        updated_at: timestamp,
        archived_at: None,
        is_archived: false,
        is_deleted: false,
    };
    store.sections.insert(section.id.clone(), section.clone());
    Ok(Json(section))
}

async fn get_section(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Section>, ApiError> {
    let store = state.db.read().await;
    store
        .sections
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Section"))
}

#[derive(Deserialize)]
struct UpdateSection {
    name: String,
}

async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateSection>,
) -> Result<Json<Section>, ApiError> {
    let mut store = state.db.write().await;
    let section = store
        .sections
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Section"))?;
    section.name = input.name;
    section.updated_at = now();
    Ok(Json(section.clone()))
}

async fn delete_section(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    store
        .sections
        .remove(&id)
        .ok_or_else(|| ApiError::not_found("Section"))?;
    store
        .tasks
        .retain(|_, task| task.section_id.as_deref() != Some(id.as_str()));
    Ok(StatusCode::NO_CONTENT)
}

// --- tasks ---

#[derive(Deserialize)]
struct TaskFilter {
    #[serde(rename = "projectId")]
    project_id: Option<String>,
    #[serde(rename = "sectionId")]
    section_id: Option<String>,
    #[serde(rename = "parentId")]
    parent_id: Option<String>,
    label: Option<String>,
    ids: Option<String>,
    limit: Option<usize>,
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        let ids_match = self
            .ids
            .as_ref()
            .map_or(true, |ids| ids.split(',').any(|id| id == task.id));
        ids_match
            && self.project_id.as_ref().map_or(true, |id| &task.project_id == id)
            && self
                .section_id
                .as_ref()
                .map_or(true, |id| task.section_id.as_ref() == Some(id))
            && self
                .parent_id
                .as_ref()
                .map_or(true, |id| task.parent_id.as_ref() == Some(id))
            && self.label.as_ref().map_or(true, |label| task.labels.contains(label))
    }
}

fn active_sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut tasks: Vec<Task> = tasks.filter(|task| !task.is_completed).cloned().collect();
    tasks.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.created_at.cmp(&b.created_at)));
    tasks
}

async fn list_tasks(State(state): State<AppState>, Query(q): Query<TaskFilter>) -> Json<Vec<Task>> {
    let store = state.db.read().await;
    let mut tasks = active_sorted(store.tasks.values().filter(|task| q.matches(task)));
    if let Some(limit) = q.limit {
        tasks.truncate(limit);
    }
    Json(tasks)
}

/// Fields shared by task creation and update.
#[derive(Deserialize)]
struct TaskFields {
    content: Option<String>,
    description: Option<String>,
    labels: Option<Vec<String>>,
    priority: Option<u8>,
    due_string: Option<String>,
    due_date: Option<String>,
    due_datetime: Option<String>,
    assignee_id: Option<String>,
    duration: Option<u32>,
    duration_unit: Option<String>,
}

impl TaskFields {
    fn apply(self, task: &mut Task) -> Result<(), ApiError> {
        if let Some(content) = self.content {
            task.content = content;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(labels) = self.labels {
            task.labels = labels;
        }
        if let Some(priority) = self.priority {
            if !(1..=4).contains(&priority) {
                return Err(ApiError::bad_request("Invalid argument value: priority"));
            }
            task.priority = priority;
        }
        if let Some(datetime) = self.due_datetime {
            let date = datetime.split('T').next().unwrap_or_default().to_string();
            task.due = Some(Due {
                string: Some(self.due_string.unwrap_or_else(|| date.clone())),
                date,
                is_recurring: false,
                datetime: Some(datetime),
                timezone: None,
            });
        } else if let Some(date) = self.due_date {
            task.due = Some(Due {
                string: Some(self.due_string.unwrap_or_else(|| date.clone())),
                date,
                is_recurring: false,
                datetime: None,
                timezone: None,
            });
        } else if let Some(string) = self.due_string {
            task.due = Some(Due {
                date: now().split('T').next().unwrap_or_default().to_string(),
                is_recurring: string.starts_with("every"),
                datetime: None,
                string: Some(string),
                timezone: None,
            });
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assigner_id = Some(MOCK_USER_ID.to_string());
            task.assignee_id = Some(assignee_id);
        }
        if let Some(amount) = self.duration {
            task.duration = Some(Duration {
                amount,
                unit: self.duration_unit.unwrap_or_else(|| "minute".to_string()),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CreateTask {
    project_id: Option<String>,
    section_id: Option<String>,
    parent_id: Option<String>,
    order: Option<i32>,
    #[serde(flatten)]
    fields: TaskFields,
}

async fn create_task(State(state): State<AppState>, Json(input): Json<CreateTask>) -> Result<Json<Task>, ApiError> {
    let content = input
        .fields
        .content
        .clone()
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::bad_request("Required argument is missing: content"))?;

    let mut store = state.db.write().await;
    let section_project = match &input.section_id {
        Some(section_id) => Some(
            store
                .sections
                .get(section_id)
                .map(|section| section.project_id.clone())
                .ok_or_else(|| ApiError::not_found("Section"))?,
        ),
        None => None,
    };
    let project_id = match input.project_id.or(section_project) {
        Some(project_id) if store.projects.contains_key(&project_id) => project_id,
        Some(_) => return Err(ApiError::not_found("Project")),
        None => store
            .inbox_id()
            .ok_or_else(|| ApiError::not_found("Project"))?,
    };

    let order = input
        .order
        .unwrap_or_else(|| store.next_task_order(&project_id));
    let mut task = Task::new(content, project_id, order);
    task.section_id = input.section_id;
    task.parent_id = input.parent_id;
    input.fields.apply(&mut task)?;
    store.tasks.insert(task.id.clone(), task.clone());
    Ok(Json(task))
}

async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let store = state.db.read().await;
    store
        .tasks
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Task"))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TaskFields>,
) -> Result<Json<Task>, ApiError> {
    let mut store = state.db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    input.apply(task)?;
    Ok(Json(task.clone()))
}

async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    store
        .tasks
        .remove(&id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    store
        .tasks
        .retain(|_, task| task.parent_id.as_deref() != Some(id.as_str()));
    store.completed.retain(|completed| completed.task_id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn close_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    if task.is_completed {
        return Ok(StatusCode::NO_CONTENT);
    }
    task.is_completed = true;
    let completed = CompletedTask {
        id: new_id(),
        task_id: task.id.clone(),
        content: task.content.clone(),
        project_id: task.project_id.clone(),
        section_id: task.section_id.clone(),
        completed_at: now(),
        user_id: MOCK_USER_ID.to_string(),
        note: None,
    };
    store.completed.push(completed);
    Ok(StatusCode::NO_CONTENT)
}

async fn reopen_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let mut store = state.db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    task.is_completed = false;
    let reopened = task.clone();
    store.completed.retain(|completed| completed.task_id != id);
    Ok(Json(reopened))
}

#[derive(Deserialize)]
struct MoveTask {
    project_id: Option<String>,
    section_id: Option<String>,
    parent_id: Option<String>,
}

async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<MoveTask>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    let destination = if let Some(section_id) = &input.section_id {
        let section = store
            .sections
            .get(section_id)
            .ok_or_else(|| ApiError::not_found("Section"))?;
        (section.project_id.clone(), Some(section_id.clone()), None)
    } else if let Some(parent_id) = &input.parent_id {
        let parent = store
            .tasks
            .get(parent_id)
            .ok_or_else(|| ApiError::not_found("Parent task"))?;
        (parent.project_id.clone(), parent.section_id.clone(), Some(parent_id.clone()))
    } else if let Some(project_id) = &input.project_id {
        if !store.projects.contains_key(project_id) {
            return Err(ApiError::not_found("Project"));
        }
        (project_id.clone(), None, None)
    } else {
        return Err(ApiError::bad_request(
            "One of project_id, section_id or parent_id is required",
        ));
    };

    let task = store
        .tasks
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    (task.project_id, task.section_id, task.parent_id) = destination;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct FilterQuery {
    filter: String,
    limit: Option<usize>,
}

/// Supports `@label` and `#Project name` filters. Anything else answers 200
/// with an `error` field, the way the vendor reports some failures.
async fn filter_tasks(State(state): State<AppState>, Query(q): Query<FilterQuery>) -> Response {
    let store = state.db.read().await;
    let filter = q.filter.trim();
    let selected: Vec<&Task> = if let Some(label) = filter.strip_prefix('@') {
        store
            .tasks
            .values()
            .filter(|task| task.labels.iter().any(|l| l == label))
            .collect()
    } else if let Some(name) = filter.strip_prefix('#') {
        store
            .tasks
            .values()
            .filter(|task| {
                store
                    .projects
                    .get(&task.project_id)
                    .is_some_and(|project| project.name == name)
            })
            .collect()
    } else {
        warn!(filter, "unsupported filter");
        return Json(json!({"error": "Invalid filter", "error_code": 42})).into_response();
    };

    let tasks = active_sorted(selected.into_iter());
    Json(page(tasks, q.limit)).into_response()
}

#[derive(Deserialize)]
struct QuickAdd {
    text: String,
    note: Option<String>,
}

/// Parses `@label` tokens out of the text; the rest becomes the content.
async fn quick_add_task(State(state): State<AppState>, Json(input): Json<QuickAdd>) -> Result<Json<Task>, ApiError> {
    let (labels, words): (Vec<&str>, Vec<&str>) = input
        .text
        .split_whitespace()
        .partition(|word| word.starts_with('@') && word.len() > 1);
    let content = words.join(" ");
    if content.is_empty() {
        return Err(ApiError::bad_request("Required argument is missing: text"));
    }

    let mut store = state.db.write().await;
    let project_id = store
        .inbox_id()
        .ok_or_else(|| ApiError::not_found("Project"))?;
    let order = store.next_task_order(&project_id);
    let mut task = Task::new(content, project_id, order);
    task.labels = labels.iter().map(|label| label[1..].to_string()).collect();
    if input.note.is_some() {
        task.comment_count = 1;
    }
    store.tasks.insert(task.id.clone(), task.clone());
    Ok(Json(task))
}

#[derive(Deserialize)]
struct CompletedQuery {
    project_id: Option<String>,
    section_id: Option<String>,
    limit: Option<usize>,
    since: Option<String>,
    until: Option<String>,
}

impl CompletedQuery {
    fn in_range(&self, date: &str) -> bool {
        self.since.as_deref().map_or(true, |since| date >= since)
            && self.until.as_deref().map_or(true, |until| date <= until)
    }

    fn matches(&self, completed: &CompletedTask) -> bool {
        self.project_id
            .as_ref()
            .map_or(true, |id| &completed.project_id == id)
            && self
                .section_id
                .as_ref()
                .map_or(true, |id| completed.section_id.as_ref() == Some(id))
    }

    fn respond(&self, mut items: Vec<CompletedTask>) -> Json<Items<CompletedTask>> {
        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        Json(Items {
            items,
            next_cursor: None,
        })
    }
}

async fn completed_by_completion_date(
    State(state): State<AppState>,
    Query(q): Query<CompletedQuery>,
) -> Json<Items<CompletedTask>> {
    let store = state.db.read().await;
    let mut items: Vec<CompletedTask> = store
        .completed
        .iter()
        .filter(|completed| q.matches(completed) && q.in_range(&completed.completed_at))
        .cloned()
        .collect();
    items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    q.respond(items)
}

async fn completed_by_due_date(
    State(state): State<AppState>,
    Query(q): Query<CompletedQuery>,
) -> Json<Items<CompletedTask>> {
    let store = state.db.read().await;
    let due_date = |completed: &CompletedTask| {
        store
            .tasks
            .get(&completed.task_id)
            .and_then(|task| task.due.as_ref())
            .map(|due| due.date.clone())
    };
    let mut items: Vec<(String, CompletedTask)> = store
        .completed
        .iter()
        .filter(|completed| q.matches(completed))
        .filter_map(|completed| due_date(completed).map(|date| (date, completed.clone())))
        .filter(|(date, _)| q.in_range(date))
        .collect();
    items.sort_by(|a, b| a.0.cmp(&b.0));
    q.respond(items.into_iter().map(|(_, completed)| completed).collect())
}
