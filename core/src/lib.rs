//! Typed client for the Todoist REST API (v1).
//!
//! # Overview
//! `Todoist` authenticates with a bearer token and exposes three groups of
//! operations: `projects()`, `sections()` and `tasks()`. Each operation checks
//! its required inputs, sends exactly one request, and reshapes the snake_case
//! JSON the API returns into the camelCase domain values in `types`.
//!
//! # Design
//! - The client is immutable after construction: token, base URL, transport.
//! - Requests and responses are plain data (`http`); the actual round trip is
//!   delegated to a `Transport`, `UreqTransport` by default.
//! - Wire shapes (`wire`) are private and converted into domain shapes with
//!   `From` impls, so the mapping rules live in one place.
//! - Every failure is a `TodoistError`; see its `kind()` for the three
//!   categories callers need to distinguish.
//! - There is no retry, caching or pagination; a `limit` or `cursor` passed in
//!   a request is forwarded as-is.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod projects;
pub mod requests;
pub mod sections;
pub mod tasks;
pub mod types;

mod wire;

#[cfg(test)]
mod testing;

pub use client::Todoist;
pub use config::Config;
pub use error::{ApiCause, ErrorKind, Result, TodoistError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use requests::{
    CompletedSortBy, CreateProjectRequest, CreateSectionRequest, CreateTaskRequest, DurationUnit,
    GetArchivedProjectsRequest, GetCollaboratorsRequest, GetCompletedTasksRequest,
    GetProjectsRequest, GetSectionsRequest, GetTasksByFilterRequest, GetTasksRequest,
    MoveTaskRequest, QuickAddTaskRequest, UpdateProjectRequest, UpdateSectionRequest,
    UpdateTaskRequest,
};
pub use types::{
    Collaborator, CollaboratorActions, CompletedTask, Due, Duration, Project, ProjectPermissions,
    Section, SectionSummary, Task,
};
