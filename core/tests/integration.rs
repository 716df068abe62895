//! End-to-end test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through the default `UreqTransport`. This checks
//! request building, the vendor's envelope shapes and error conventions, and
//! response reshaping together.

use std::net::SocketAddr;

use todoist_core::{
    CompletedSortBy, Config, CreateProjectRequest, CreateSectionRequest, CreateTaskRequest,
    DurationUnit, ErrorKind, GetArchivedProjectsRequest, GetCollaboratorsRequest,
    GetCompletedTasksRequest, GetProjectsRequest, GetSectionsRequest, GetTasksByFilterRequest,
    GetTasksRequest, MoveTaskRequest, QuickAddTaskRequest, Todoist, UpdateProjectRequest,
    UpdateSectionRequest, UpdateTaskRequest,
};

const TOKEN: &str = "integration-token";

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
    });

    addr
}

fn client(addr: SocketAddr, token: &str) -> Todoist {
    Todoist::new(Config::new(token).with_base_url(format!("http://{addr}/api/v1"))).unwrap()
}

#[test]
fn full_lifecycle() {
    let addr = start_server();
    let todoist = client(addr, TOKEN);

    // Projects: the seeded inbox, plus one we create and rename.
    let projects = todoist.projects().get_projects(&GetProjectsRequest::default()).unwrap();
    let inbox = projects.iter().find(|p| p.inbox_project).unwrap().clone();

    let work = todoist
        .projects()
        .create_project(&CreateProjectRequest {
            name: "Work".to_string(),
            color: Some("blue".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(work.name, "Work");
    assert_eq!(work.color, "blue");
    assert_eq!(work.parent_id, None);

    let renamed = todoist
        .projects()
        .update_project(&UpdateProjectRequest {
            project_id: work.id.clone(),
            name: Some("Office".to_string()),
            is_favorite: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(renamed.name, "Office");
    assert!(renamed.is_favorite);

    let fetched = todoist.projects().get_project_by_id(&work.id).unwrap();
    assert_eq!(fetched, renamed);

    let archived = todoist
        .projects()
        .get_archived_projects(&GetArchivedProjectsRequest::default())
        .unwrap();
    assert_eq!(archived.len(), 1);
    assert!(archived[0].is_archived);

    let collaborators = todoist
        .projects()
        .get_project_collaborators(&GetCollaboratorsRequest {
            project_id: work.id.clone(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(collaborators[0].email, "mock@example.com");

    let permissions = todoist.projects().get_project_permissions().unwrap();
    assert_eq!(permissions.project_collaborator_actions[0].name, "CREATOR");
    assert!(permissions.project_collaborator_actions[0]
        .actions
        .contains(&"item_add".to_string()));

    // Sections.
    let section = todoist
        .sections()
        .create_section(&CreateSectionRequest {
            name: "Backlog".to_string(),
            project_id: work.id.clone(),
            order: None,
        })
        .unwrap();
    assert_eq!(section.project_id, work.id);

    let listed = todoist
        .sections()
        .get_sections(&GetSectionsRequest {
            project_id: Some(work.id.clone()),
            limit: None,
        })
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, section.id);
    assert_eq!(listed[0].order, section.section_order);

    let section = todoist
        .sections()
        .update_section(&UpdateSectionRequest {
            section_id: section.id.clone(),
            name: "Later".to_string(),
        })
        .unwrap();
    assert_eq!(todoist.sections().get_section_by_id(&section.id).unwrap().name, "Later");

    // Tasks.
    let task = todoist
        .tasks()
        .create_task(&CreateTaskRequest {
            content: "Write report".to_string(),
            project_id: Some(work.id.clone()),
            labels: Some(vec!["deep".to_string()]),
            priority: Some(3),
            due_date: Some("2025-03-01".to_string()),
            duration: Some(90),
            duration_unit: Some(DurationUnit::Minute),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(task.priority, 3);
    assert_eq!(task.due.as_ref().unwrap().date, "2025-03-01");
    assert_eq!(task.duration.as_ref().unwrap().amount, 90);

    let listed = todoist
        .tasks()
        .get_tasks(&GetTasksRequest {
            project_id: Some(work.id.clone()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], task.id.as_str());
    assert_eq!(listed[0]["project_id"], work.id.as_str());

    let updated = todoist
        .tasks()
        .update_task(&UpdateTaskRequest {
            task_id: task.id.clone(),
            content: Some("Write final report".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.content, "Write final report");
    assert_eq!(updated.labels, vec!["deep".to_string()]);

    todoist
        .tasks()
        .move_task(&MoveTaskRequest {
            task_id: task.id.clone(),
            section_id: Some(section.id.clone()),
            ..Default::default()
        })
        .unwrap();
    let moved = todoist.tasks().get_task_by_id(&task.id).unwrap();
    assert_eq!(moved.section_id.as_deref(), Some(section.id.as_str()));

    let filtered = todoist
        .tasks()
        .get_tasks_by_filter(&GetTasksByFilterRequest {
            filter: "@deep".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, task.id);

    let quick = todoist
        .tasks()
        .quick_add_task(&QuickAddTaskRequest {
            text: "Buy milk @errand".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(quick.content, "Buy milk");
    assert_eq!(quick.project_id, inbox.id);
    assert_eq!(quick.labels, vec!["errand".to_string()]);

    // Completion.
    todoist.tasks().close_task(&task.id).unwrap();
    let completed = todoist
        .tasks()
        .get_completed_tasks(&GetCompletedTasksRequest {
            project_id: Some(work.id.clone()),
            ..GetCompletedTasksRequest::new(CompletedSortBy::CompletionDate)
        })
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].task_id, task.id);
    assert_eq!(completed[0].note, None);

    let by_due = todoist
        .tasks()
        .get_completed_tasks(&GetCompletedTasksRequest {
            since: Some("2025-02-01".to_string()),
            until: Some("2025-04-01".to_string()),
            ..GetCompletedTasksRequest::new(CompletedSortBy::DueDate)
        })
        .unwrap();
    assert_eq!(by_due.len(), 1);

    let reopened = todoist.tasks().reopen_task(&task.id).unwrap();
    assert!(!reopened.is_completed);

    // Deletion.
    todoist.tasks().delete_task(&task.id).unwrap();
    let err = todoist.tasks().get_task_by_id(&task.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "Task not found");
    assert_eq!(err.status(), Some(404));

    todoist.sections().delete_section(&section.id).unwrap();
    let err = todoist.sections().get_section_by_id(&section.id).unwrap_err();
    assert_eq!(err.to_string(), "Section not found");
}

#[test]
fn wrong_token_is_rejected_with_vendor_message() {
    let addr = start_server();
    let todoist = client(addr, "not-the-token");

    let err = todoist
        .projects()
        .get_projects(&GetProjectsRequest::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "Unauthorized");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.payload().unwrap()["http_code"], 401);
}

#[test]
fn embedded_error_on_success_status_is_rejected() {
    let addr = start_server();
    let todoist = client(addr, TOKEN);

    let err = todoist
        .tasks()
        .get_tasks_by_filter(&GetTasksByFilterRequest {
            filter: "today & p1".to_string(),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "Invalid filter");
    assert_eq!(err.status(), Some(200));
}

#[test]
fn validation_failures_never_reach_the_server() {
    // Nothing listens on this address; a request would fail as a call error.
    let todoist = Todoist::new(Config::new(TOKEN).with_base_url("http://127.0.0.1:9/api/v1")).unwrap();

    let err = todoist.tasks().get_tasks(&GetTasksRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = todoist.projects().get_project_by_id("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = todoist.tasks().close_task("any").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "Error calling API");
}
