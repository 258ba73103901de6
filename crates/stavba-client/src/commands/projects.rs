use serde::Serialize;
use serde_json::{Map, Value};
use stavba_store::{DashboardStats, NewProject, Photo, Project, Report};

use crate::error::Result;
use crate::state::{lock, AppState, SharedState};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub completion: i32,
    pub description: Option<String>,
    pub active: bool,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            active: p.is_active(),
            id: p.id,
            name: p.name,
            kind: p.kind,
            address: p.address,
            completion: p.completion,
            description: p.description,
        }
    }
}

pub fn list_projects(state: &SharedState) -> Result<Vec<ProjectDto>> {
    let guard = lock(state)?;
    Ok(guard
        .store
        .projects()?
        .into_iter()
        .map(ProjectDto::from)
        .collect())
}

pub fn create_project(state: &SharedState, input: NewProject) -> Result<ProjectDto> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    Ok(store.add_project(session, input)?.into())
}

pub fn update_completion(
    state: &SharedState,
    project_id: i64,
    completion: i32,
) -> Result<ProjectDto> {
    let mut guard = lock(state)?;
    let AppState { store, session, .. } = &mut *guard;
    Ok(store
        .set_project_completion(session, project_id, completion)?
        .into())
}

pub fn add_photo(state: &SharedState, attributes: Map<String, Value>) -> Result<Photo> {
    let mut guard = lock(state)?;
    Ok(guard.store.add_photo(attributes)?)
}

pub fn add_report(state: &SharedState, attributes: Map<String, Value>) -> Result<Report> {
    let mut guard = lock(state)?;
    Ok(guard.store.add_report(attributes)?)
}

pub fn dashboard(state: &SharedState) -> Result<DashboardStats> {
    let guard = lock(state)?;
    Ok(guard.store.dashboard_stats()?)
}
