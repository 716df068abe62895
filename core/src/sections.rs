use crate::client::{decode, ApiClient};
use crate::error::{Result, TodoistError};
use crate::http::{path_segment, Query, Transport};
use crate::requests::{CreateSectionRequest, GetSectionsRequest, UpdateSectionRequest};
use crate::types::{Section, SectionSummary};
use crate::wire;

/// Section operations, obtained from `Todoist::sections`.
#[derive(Debug)]
pub struct Sections<'a, T> {
    api: &'a ApiClient<T>,
}

impl<'a, T> Sections<'a, T> {
    pub(crate) fn new(api: &'a ApiClient<T>) -> Self {
        Self { api }
    }
}

impl<T: Transport> Sections<'_, T> {
    /// List sections, optionally restricted to one project. Listed sections
    /// use the narrower `SectionSummary` shape.
    pub fn get_sections(&self, request: &GetSectionsRequest) -> Result<Vec<SectionSummary>> {
        let mut query = Query::new();
        query
            .push_opt("projectId", request.project_id.as_deref())
            .push_opt("limit", request.limit);
        let payload = self.api.get("sections", &query)?;
        let page: wire::Results<wire::SectionSummary> = decode(payload)?;
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    pub fn create_section(&self, request: &CreateSectionRequest) -> Result<Section> {
        if request.name.is_empty() {
            return Err(TodoistError::missing("name", "createSection"));
        }
        if request.project_id.is_empty() {
            return Err(TodoistError::missing("projectId", "createSection"));
        }
        let payload = self.api.post("sections", request)?;
        Ok(decode::<wire::Section>(payload)?.into())
    }

    pub fn get_section_by_id(&self, section_id: &str) -> Result<Section> {
        if section_id.is_empty() {
            return Err(TodoistError::missing("sectionId", "getSectionById"));
        }
        let payload = self
            .api
            .get(&format!("sections/{}", path_segment(section_id)), &Query::new())?;
        Ok(decode::<wire::Section>(payload)?.into())
    }

    pub fn update_section(&self, request: &UpdateSectionRequest) -> Result<Section> {
        if request.section_id.is_empty() {
            return Err(TodoistError::missing("sectionId", "updateSection"));
        }
        if request.name.is_empty() {
            return Err(TodoistError::missing("name", "updateSection"));
        }
        let payload = self
            .api
            .post(&format!("sections/{}", path_segment(&request.section_id)), request)?;
        Ok(decode::<wire::Section>(payload)?.into())
    }

    pub fn delete_section(&self, section_id: &str) -> Result<()> {
        if section_id.is_empty() {
            return Err(TodoistError::missing("sectionId", "deleteSection"));
        }
        self.api.delete(&format!("sections/{}", path_segment(section_id)))?;
        Ok(())
    }
}
