use serde_json::Value;

use crate::client::{decode, ApiClient};
use crate::error::{Result, TodoistError};
use crate::http::{path_segment, Query, Transport};
use crate::requests::{
    CreateTaskRequest, GetCompletedTasksRequest, GetTasksByFilterRequest, GetTasksRequest,
    MoveTaskRequest, QuickAddTaskRequest, UpdateTaskRequest,
};
use crate::types::{CompletedTask, Task};
use crate::wire;

/// Task operations, obtained from `Todoist::tasks`.
#[derive(Debug)]
pub struct Tasks<'a, T> {
    api: &'a ApiClient<T>,
}

impl<'a, T> Tasks<'a, T> {
    pub(crate) fn new(api: &'a ApiClient<T>) -> Self {
        Self { api }
    }
}

impl<T: Transport> Tasks<'_, T> {
    /// List tasks matching the given filters.
    ///
    /// This endpoint answers with a bare array, and its entries are returned
    /// exactly as received.
    pub fn get_tasks(&self, request: &GetTasksRequest) -> Result<Vec<Value>> {
        let ids = request.ids.as_ref().filter(|ids| !ids.is_empty());
        if is_blank(&request.project_id)
            && is_blank(&request.section_id)
            && is_blank(&request.parent_id)
            && ids.is_none()
        {
            return Err(TodoistError::Validation(
                "At least one of projectId, sectionId, partentId or ids is required".to_string(),
            ));
        }

        let mut query = Query::new();
        query
            .push_opt("projectId", request.project_id.as_deref())
            .push_opt("sectionId", request.section_id.as_deref())
            .push_opt("parentId", request.parent_id.as_deref())
            .push_opt("label", request.label.as_deref())
            .push_opt("ids", ids.map(|ids| ids.join(",")))
            .push_opt("limit", request.limit);
        let payload = self.api.get("tasks", &query)?;
        decode(payload)
    }

    pub fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        if request.content.is_empty() {
            return Err(TodoistError::missing("content", "createTask"));
        }
        let payload = self.api.post("tasks", request)?;
        Ok(decode::<wire::Task>(payload)?.into())
    }

    pub fn get_task_by_id(&self, task_id: &str) -> Result<Task> {
        require_task_id(task_id, "getTaskById")?;
        let payload = self.api.get(&task_path(task_id, ""), &Query::new())?;
        Ok(decode::<wire::Task>(payload)?.into())
    }

    /// List completed tasks, ordered by completion date or by due date
    /// depending on `sort_by`.
    pub fn get_completed_tasks(&self, request: &GetCompletedTasksRequest) -> Result<Vec<CompletedTask>> {
        let mut query = Query::new();
        query
            .push_opt("project_id", request.project_id.as_deref())
            .push_opt("section_id", request.section_id.as_deref())
            .push_opt("limit", request.limit)
            .push_opt("cursor", request.cursor.as_deref())
            .push_opt("since", request.since.as_deref())
            .push_opt("until", request.until.as_deref());
        let payload = self.api.get(request.sort_by.path(), &query)?;
        let page: wire::Items<wire::CompletedTask> = decode(payload)?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    pub fn get_tasks_by_filter(&self, request: &GetTasksByFilterRequest) -> Result<Vec<Task>> {
        if request.filter.is_empty() {
            return Err(TodoistError::missing("filter", "getTasksByFilter"));
        }
        let mut query = Query::new();
        query
            .push("filter", &request.filter)
            .push_opt("lang", request.lang.as_deref())
            .push_opt("limit", request.limit);
        let payload = self.api.get("tasks/filter", &query)?;
        let page: wire::Results<wire::Task> = decode(payload)?;
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    /// Add a task from free text parsed by the API, e.g. "Buy milk tomorrow".
    pub fn quick_add_task(&self, request: &QuickAddTaskRequest) -> Result<Task> {
        if request.text.is_empty() {
            return Err(TodoistError::missing("text", "quickAddTask"));
        }
        let payload = self.api.post("tasks/quick", request)?;
        Ok(decode::<wire::Task>(payload)?.into())
    }

    pub fn reopen_task(&self, task_id: &str) -> Result<Task> {
        require_task_id(task_id, "reopenTask")?;
        let payload = self.api.post_empty(&task_path(task_id, "/reopen"))?;
        Ok(decode::<wire::Task>(payload)?.into())
    }

    pub fn close_task(&self, task_id: &str) -> Result<()> {
        require_task_id(task_id, "closeTask")?;
        self.api.post_empty(&task_path(task_id, "/close"))?;
        Ok(())
    }

    pub fn move_task(&self, request: &MoveTaskRequest) -> Result<()> {
        require_task_id(&request.task_id, "moveTask")?;
        self.api.post(&task_path(&request.task_id, "/move"), request)?;
        Ok(())
    }

    pub fn update_task(&self, request: &UpdateTaskRequest) -> Result<Task> {
        require_task_id(&request.task_id, "updateTask")?;
        let payload = self.api.post(&task_path(&request.task_id, ""), request)?;
        Ok(decode::<wire::Task>(payload)?.into())
    }

    pub fn delete_task(&self, task_id: &str) -> Result<()> {
        require_task_id(task_id, "deleteTask")?;
        self.api.delete(&task_path(task_id, ""))?;
        Ok(())
    }
}

fn require_task_id(task_id: &str, operation: &str) -> Result<()> {
    if task_id.is_empty() {
        return Err(TodoistError::missing("taskId", operation));
    }
    Ok(())
}

fn task_path(task_id: &str, suffix: &str) -> String {
    format!("tasks/{}{suffix}", path_segment(task_id))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
