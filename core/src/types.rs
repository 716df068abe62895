//! Domain values returned to callers.
//!
//! # Design
//! Each type is the camelCase counterpart of a `wire` shape and is produced
//! only through its `From<wire::*>` conversion. The conversions are plain
//! field moves: no field is computed, dropped, or defaulted beyond what the
//! wire shape already allows.
//!
//! Nullable wire fields (`parent_id`, `section_id`, ...) stay `Option` and
//! serialize as `null`. `due` and `duration` on `Task` are different: when the
//! API omits them they are absent from the serialized value, never `null`.

use serde::{Deserialize, Serialize};

use crate::wire;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub can_assign_tasks: bool,
    pub child_order: i32,
    pub color: String,
    pub creator_uid: String,
    pub created_at: String,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub is_favorite: bool,
    pub is_frozen: bool,
    pub name: String,
    pub updated_at: Option<String>,
    pub view_style: String,
    pub default_order: i32,
    pub description: String,
    pub public_key: String,
    pub role: Option<String>,
    pub parent_id: Option<String>,
    pub inbox_project: bool,
    pub is_collapsed: bool,
    pub is_shared: bool,
}

impl From<wire::Project> for Project {
    fn from(p: wire::Project) -> Self {
        Self {
            id: p.id,
            can_assign_tasks: p.can_assign_tasks,
            child_order: p.child_order,
            color: p.color,
            creator_uid: p.creator_uid,
            created_at: p.created_at,
            is_archived: p.is_archived,
            is_deleted: p.is_deleted,
            is_favorite: p.is_favorite,
            is_frozen: p.is_frozen,
            name: p.name,
            updated_at: p.updated_at,
            view_style: p.view_style,
            default_order: p.default_order,
            description: p.description,
            public_key: p.public_key,
            role: p.role,
            parent_id: p.parent_id,
            inbox_project: p.inbox_project,
            is_collapsed: p.is_collapsed,
            is_shared: p.is_shared,
        }
    }
}

/// A person with access to a shared project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<wire::Collaborator> for Collaborator {
    fn from(c: wire::Collaborator) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPermissions {
    pub project_collaborator_actions: Vec<CollaboratorActions>,
    pub workspace_collaborator_actions: Vec<CollaboratorActions>,
}

/// Actions granted to one collaborator role, e.g. `CREATOR` or `READ_ONLY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorActions {
    pub name: String,
    pub actions: Vec<String>,
}

impl From<wire::CollaboratorActions> for CollaboratorActions {
    fn from(c: wire::CollaboratorActions) -> Self {
        Self {
            name: c.name,
            actions: c.actions.into_iter().map(|action| action.name).collect(),
        }
    }
}

impl From<wire::ProjectPermissions> for ProjectPermissions {
    fn from(p: wire::ProjectPermissions) -> Self {
        Self {
            project_collaborator_actions: p
                .project_collaborator_actions
                .into_iter()
                .map(Into::into)
                .collect(),
            workspace_collaborator_actions: p
                .workspace_collaborator_actions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub project_id: String,
    pub section_order: i32,
    pub is_collapsed: bool,
    pub added_at: String,
    pub updated_at: Option<String>,
    pub archived_at: Option<String>,
    pub is_archived: bool,
    pub is_deleted: bool,
}

impl From<wire::Section> for Section {
    fn from(s: wire::Section) -> Self {
        Self {
            id: s.id,
            name: s.name,
            user_id: s.user_id,
            project_id: s.project_id,
            section_order: s.section_order,
            is_collapsed: s.is_collapsed,
            added_at: s.added_at,
            updated_at: s.updated_at,
            archived_at: s.archived_at,
            is_archived: s.is_archived,
            is_deleted: s.is_deleted,
        }
    }
}

/// Section as listed by `Sections::get_sections`, which carries fewer fields
/// than a single fetched `Section`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub order: i32,
    pub is_collapsed: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<wire::SectionSummary> for SectionSummary {
    fn from(s: wire::SectionSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            project_id: s.project_id,
            order: s.order,
            is_collapsed: s.is_collapsed,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    pub description: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub parent_id: Option<String>,
    pub order: i32,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    pub labels: Vec<String>,
    pub assignee_id: Option<String>,
    pub assigner_id: Option<String>,
    pub comment_count: u32,
    pub is_completed: bool,
    pub created_at: String,
    pub creator_id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Due {
    pub date: String,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub amount: u32,
    pub unit: String,
}

impl From<wire::Due> for Due {
    fn from(d: wire::Due) -> Self {
        Self {
            date: d.date,
            is_recurring: d.is_recurring,
            datetime: d.datetime,
            string: d.string,
            timezone: d.timezone,
        }
    }
}

impl From<wire::Duration> for Duration {
    fn from(d: wire::Duration) -> Self {
        Self {
            amount: d.amount,
            unit: d.unit,
        }
    }
}

impl From<wire::Task> for Task {
    fn from(t: wire::Task) -> Self {
        Self {
            id: t.id,
            content: t.content,
            description: t.description,
            project_id: t.project_id,
            section_id: t.section_id,
            parent_id: t.parent_id,
            order: t.order,
            priority: t.priority,
            due: t.due.map(Into::into),
            labels: t.labels.unwrap_or_default(),
            assignee_id: t.assignee_id,
            assigner_id: t.assigner_id,
            comment_count: t.comment_count,
            is_completed: t.is_completed,
            created_at: t.created_at,
            creator_id: t.creator_id,
            url: t.url,
            duration: t.duration.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTask {
    pub id: String,
    pub task_id: String,
    pub content: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub completed_at: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<wire::CompletedTask> for CompletedTask {
    fn from(c: wire::CompletedTask) -> Self {
        Self {
            id: c.id,
            task_id: c.task_id,
            content: c.content,
            project_id: c.project_id,
            section_id: c.section_id,
            completed_at: c.completed_at,
            user_id: c.user_id,
            note: c.note,
        }
    }
}
