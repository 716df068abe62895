//! In-memory records served by the mock API, in the vendor's wire shape.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MOCK_USER_ID: &str = "user-mock";

#[derive(Clone, Debug, Serialize, Deserialize)]
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
    pub updated_at: String,
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub project_id: String,
    pub section_order: i32,
    pub is_collapsed: bool,
    pub added_at: String,
    pub updated_at: String,
    pub archived_at: Option<String>,
    pub is_archived: bool,
    pub is_deleted: bool,
}

/// The shape the section list endpoint uses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectionListing {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub order: i32,
    pub is_collapsed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Section> for SectionListing {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            name: section.name.clone(),
            project_id: section.project_id.clone(),
            order: section.section_order,
            is_collapsed: section.is_collapsed,
            created_at: section.added_at.clone(),
            updated_at: section.updated_at.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub description: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub parent_id: Option<String>,
    pub order: i32,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    pub labels: Vec<String>,
    pub assignee_id: Option<String>,
    pub assigner_id: Option<String>,
    pub comment_count: u32,
    pub is_completed: bool,
    pub created_at: String,
    pub creator_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Due {
    pub date: String,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Duration {
    pub amount: u32,
    pub unit: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: String,
    pub task_id: String,
    pub content: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub completed_at: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub projects: HashMap<String, Project>,
    pub sections: HashMap<String, Section>,
    pub tasks: HashMap<String, Task>,
    pub completed: Vec<CompletedTask>,
}

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn now() -> String {
    Utc::now().to_rfc3339()
}

impl Store {
    /// A store holding the user's Inbox and one archived project.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let mut inbox = Project::new("Inbox".to_string());
        inbox.inbox_project = true;
        inbox.child_order = 0;
        let mut someday = Project::new("Someday".to_string());
        someday.is_archived = true;
        store.projects.insert(inbox.id.clone(), inbox);
        store.projects.insert(someday.id.clone(), someday);
        store
    }

    pub fn inbox_id(&self) -> Option<String> {
        self.projects
            .values()
            .find(|project| project.inbox_project)
            .map(|project| project.id.clone())
    }

    pub fn next_task_order(&self, project_id: &str) -> i32 {
        let count = self
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .count();
        i32::try_from(count).unwrap_or(i32::MAX).saturating_add(1)
    }

    pub fn next_section_order(&self, project_id: &str) -> i32 {
        let count = self
            .sections
            .values()
            .filter(|section| section.project_id == project_id)
            .count();
        i32::try_from(count).unwrap_or(i32::MAX).saturating_add(1)
    }

    pub fn collaborators(&self) -> Vec<Collaborator> {
        vec![Collaborator {
            id: MOCK_USER_ID.to_string(),
            name: "Mock User".to_string(),
            email: "mock@example.com".to_string(),
        }]
    }
}

impl Project {
    pub fn new(name: String) -> Self {
        let id = new_id();
        let timestamp = now();
        Self {
            public_key: format!("pk-{id}"),
            id,
            can_assign_tasks: false,
            child_order: 1,
            color: "charcoal".to_string(),
            creator_uid: MOCK_USER_ID.to_string(),
            created_at: timestamp.clone(),
            is_archived: false,
            is_deleted: false,
            is_favorite: false,
            is_frozen: false,
            name,
            updated_at: timestamp,
            view_style: "list".to_string(),
            default_order: 0,
            description: String::new(),
            role: Some("CREATOR".to_string()),
            parent_id: None,
            inbox_project: false,
            is_collapsed: false,
            is_shared: false,
        }
    }
}

impl Task {
    pub fn new(content: String, project_id: String, order: i32) -> Self {
        let id = new_id();
        Self {
            url: format!("https://app.todoist.com/app/task/{id}"),
            id,
            content,
            description: String::new(),
            project_id,
            section_id: None,
            parent_id: None,
            order,
            priority: 1,
            due: None,
            labels: Vec::new(),
            assignee_id: None,
            assigner_id: None,
            comment_count: 0,
            is_completed: false,
            created_at: now(),
            creator_id: MOCK_USER_ID.to_string(),
            duration: None,
        }
    }
}
