//! Response shapes exactly as the Todoist API sends them (snake_case).
//!
//! These never leave the crate; each converts into its domain counterpart in
//! `types`.
//!
//! One rule decides which fields may be missing:
//! - `id`, the entity's name or content, its owning ids and the stamp of its
//!   creation (`created_at`, `added_at`, `completed_at`) are required.
//! - Every other timestamp and every nullable reference is an `Option`.
//! - All remaining scalars (text, flags, counters) fall back to their default,
//!   whether the key is missing or `null`.

use serde::{Deserialize, Deserializer};

/// Reads `null` as the type's default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `{"results": [...]}` list envelope.
#[derive(Debug, Deserialize)]
pub struct Results<T> {
    pub results: Vec<T>,
}

/// `{"items": [...]}` list envelope used by the completed-task endpoints.
#[derive(Debug, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub can_assign_tasks: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub child_order: i32,
    #[serde(default, deserialize_with = "or_default")]
    pub color: String,
    #[serde(default, deserialize_with = "or_default")]
    pub creator_uid: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_frozen: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub view_style: String,
    #[serde(default, deserialize_with = "or_default")]
    pub default_order: i32,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub public_key: String,
    #[serde(default, deserialize_with = "or_default")]
    pub inbox_project: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_collapsed: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_shared: bool,
}

#[derive(Debug, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectPermissions {
    #[serde(default, deserialize_with = "or_default")]
    pub project_collaborator_actions: Vec<CollaboratorActions>,
    #[serde(default, deserialize_with = "or_default")]
    pub workspace_collaborator_actions: Vec<CollaboratorActions>,
}

#[derive(Debug, Deserialize)]
pub struct CollaboratorActions {
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
pub struct Action {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub project_id: String,
    pub added_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub archived_at: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub section_order: i32,
    #[serde(default, deserialize_with = "or_default")]
    pub is_collapsed: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_deleted: bool,
}

/// Narrower section shape returned by the section list endpoint. Neither of
/// its timestamps is guaranteed by the API.
#[derive(Debug, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub order: i32,
    #[serde(default, deserialize_with = "or_default")]
    pub is_collapsed: bool,
}

#[derive(Debug, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub project_id: String,
    pub created_at: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub assigner_id: Option<String>,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub order: i32,
    #[serde(default, deserialize_with = "or_default")]
    pub priority: u8,
    #[serde(default, deserialize_with = "or_default")]
    pub comment_count: u32,
    #[serde(default, deserialize_with = "or_default")]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub creator_id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub url: String,
}

/// Present only when the task has a due date; `date` is what makes it one.
#[derive(Debug, Deserialize)]
pub struct Due {
    pub date: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_recurring: bool,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Both parts are required: an amount without a unit is not a duration.
#[derive(Debug, Deserialize)]
pub struct Duration {
    pub amount: u32,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletedTask {
    pub id: String,
    pub task_id: String,
    pub content: String,
    pub project_id: String,
    pub user_id: String,
    pub completed_at: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}
