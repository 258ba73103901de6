//! CRUD operations for [`Project`] records.

use stavba_shared::constants::KEY_PROJECTS;
use stavba_shared::types::next_time_id;

use crate::error::{Result, StoreError};
use crate::models::{NewProject, Project};
use crate::session::Session;
use crate::store::DomainStore;

impl DomainStore {
    pub fn projects(&self) -> Result<Vec<Project>> {
        self.load_list(KEY_PROJECTS)
    }

    pub fn get_project(&self, id: i64) -> Result<Project> {
        self.projects()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// Only the project type is mandatory; completion defaults to 0.
    pub fn add_project(&mut self, session: &Session, input: NewProject) -> Result<Project> {
        let kind = input.kind.trim();
        if kind.is_empty() {
            return Err(StoreError::MissingField("type"));
        }

        let mut projects = self.projects()?;
        let project = Project {
            id: next_time_id(self.clock().now(), projects.iter().map(|p| p.id).max()),
            name: input.name.trim().to_string(),
            kind: kind.to_string(),
            address: input.address.trim().to_string(),
            completion: input.completion.unwrap_or(0),
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };
        projects.push(project.clone());

        let (_, audit) = self.audit_write(
            "Nový projekt",
            &format!("{} ({})", project.name, project.kind),
            session.actor_name(),
        )?;
        self.commit(vec![Self::write(KEY_PROJECTS, &projects)?, audit])?;

        tracing::info!(project_id = project.id, "project created");
        Ok(project)
    }

    /// Set the completion percentage as given; out-of-range values are kept.
    pub fn set_project_completion(
        &mut self,
        session: &Session,
        id: i64,
        completion: i32,
    ) -> Result<Project> {
        let mut projects = self.projects()?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        project.completion = completion;
        let updated = project.clone();

        let (_, audit) = self.audit_write(
            "Aktualizace projektu",
            &format!("{}: {} %", updated.name, completion),
            session.actor_name(),
        )?;
        self.commit(vec![Self::write(KEY_PROJECTS, &projects)?, audit])?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::seeded_store;

    #[test]
    fn add_project_requires_type() {
        let (mut store, _) = seeded_store();
        let input = NewProject {
            name: "Škola".into(),
            kind: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            store.add_project(&Session::anonymous(), input),
            Err(StoreError::MissingField("type"))
        ));
        assert_eq!(store.projects().unwrap().len(), 2);
    }

    #[test]
    fn add_project_assigns_fresh_id() {
        let (mut store, _) = seeded_store();
        let project = store
            .add_project(
                &Session::anonymous(),
                NewProject {
                    name: "Nemocnice Olomouc".into(),
                    kind: "healthcare".into(),
                    address: "I. P. Pavlova 6".into(),
                    completion: None,
                    description: Some("  ".into()),
                },
            )
            .unwrap();

        assert!(project.id > 2);
        assert_eq!(project.completion, 0);
        assert_eq!(project.description, None);
        assert_eq!(store.get_project(project.id).unwrap(), project);
    }

    #[test]
    fn completion_is_not_clamped() {
        let (mut store, _) = seeded_store();
        let p = store
            .set_project_completion(&Session::anonymous(), 1, 150)
            .unwrap();
        assert_eq!(p.completion, 150);
        assert_eq!(store.get_project(1).unwrap().completion, 150);

        assert!(matches!(
            store.set_project_completion(&Session::anonymous(), 99, 10),
            Err(StoreError::NotFound)
        ));
    }
}
