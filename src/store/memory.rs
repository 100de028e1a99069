//! @ai:module:intent In-memory project store
//! @ai:module:layer infrastructure
//! @ai:module:public_api InMemoryStore
//! @ai:module:stateless false

use crate::error::Result;
use crate::project::{Project, ProjectId};
use crate::store::ProjectStore;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// @ai:intent Keeps projects in a map; used by tests and embedding callers
#[derive(Default)]
pub struct InMemoryStore {
    projects: RwLock<BTreeMap<ProjectId, Project>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Seed a store with existing projects
    /// @ai:effects pure
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let projects = projects
            .into_iter()
            .map(|mut p| {
                p.upgrade_legacy_payments();
                (p.id, p)
            })
            .collect();

        Self {
            projects: RwLock::new(projects),
        }
    }
}

// Writers only ever insert or remove whole records, so a poisoned map is still usable.
impl ProjectStore for InMemoryStore {
    fn list(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().unwrap_or_else(|e| e.into_inner());
        Ok(projects.values().cloned().collect())
    }

    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        let projects = self.projects.read().unwrap_or_else(|e| e.into_inner());
        Ok(projects.get(&id).cloned())
    }

    fn put(&self, project: &Project) -> Result<()> {
        let mut stored = project.clone();
        stored.upgrade_legacy_payments();

        let mut projects = self.projects.write().unwrap_or_else(|e| e.into_inner());
        projects.insert(stored.id, stored);
        Ok(())
    }

    fn delete(&self, id: ProjectId) -> Result<bool> {
        let mut projects = self.projects.write().unwrap_or_else(|e| e.into_inner());
        Ok(projects.remove(&id).is_some())
    }
}
