use crate::client::{decode, ApiClient};
use crate::error::{Result, TodoistError};
use crate::http::{path_segment, Query, Transport};
use crate::requests::{
    CreateProjectRequest, GetArchivedProjectsRequest, GetCollaboratorsRequest, GetProjectsRequest,
    UpdateProjectRequest,
};
use crate::types::{Collaborator, Project, ProjectPermissions};
use crate::wire;

/// Project operations, obtained from `Todoist::projects`.
#[derive(Debug)]
pub struct Projects<'a, T> {
    api: &'a ApiClient<T>,
}

impl<'a, T> Projects<'a, T> {
    pub(crate) fn new(api: &'a ApiClient<T>) -> Self {
        Self { api }
    }
}

impl<T: Transport> Projects<'_, T> {
    pub fn get_project_by_id(&self, project_id: &str) -> Result<Project> {
        if project_id.is_empty() {
            return Err(TodoistError::missing("projectId", "getProjectById"));
        }
        let payload = self
            .api
            .get(&format!("projects/{}", path_segment(project_id)), &Query::new())?;
        Ok(decode::<wire::Project>(payload)?.into())
    }

    pub fn get_projects(&self, request: &GetProjectsRequest) -> Result<Vec<Project>> {
        let mut query = Query::new();
        query.push_opt("limit", request.limit);
        let payload = self.api.get("projects", &query)?;
        Ok(projects_from(decode(payload)?))
    }

    pub fn get_archived_projects(&self, request: &GetArchivedProjectsRequest) -> Result<Vec<Project>> {
        let mut query = Query::new();
        query.push_opt("limit", request.limit);
        let payload = self.api.get("projects/archived", &query)?;
        Ok(projects_from(decode(payload)?))
    }

    pub fn get_project_collaborators(&self, request: &GetCollaboratorsRequest) -> Result<Vec<Collaborator>> {
        if request.project_id.is_empty() {
            return Err(TodoistError::missing("projectId", "getProjectColaborators"));
        }
        let mut query = Query::new();
        query
            .push_opt("limit", request.limit)
            .push_opt("public_key", request.public_key.as_deref());
        let path = format!("projects/{}/collaborators", path_segment(&request.project_id));
        let payload = self.api.get(&path, &query)?;
        let page: wire::Results<wire::Collaborator> = decode(payload)?;
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    pub fn get_project_permissions(&self) -> Result<ProjectPermissions> {
        let payload = self.api.get("projects/permissions", &Query::new())?;
        Ok(decode::<wire::ProjectPermissions>(payload)?.into())
    }

    /// Create a project. The API itself rejects a missing name.
    pub fn create_project(&self, request: &CreateProjectRequest) -> Result<Project> {
        let payload = self.api.post("projects", request)?;
        Ok(decode::<wire::Project>(payload)?.into())
    }

    pub fn update_project(&self, request: &UpdateProjectRequest) -> Result<Project> {
        if request.project_id.is_empty() {
            return Err(TodoistError::missing("projectId", "updateProject"));
        }
        let payload = self
            .api
            .post(&format!("projects/{}", path_segment(&request.project_id)), request)?;
        Ok(decode::<wire::Project>(payload)?.into())
    }
}

fn projects_from(page: wire::Results<wire::Project>) -> Vec<Project> {
    page.results.into_iter().map(Into::into).collect()
}
