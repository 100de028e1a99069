//! @ai:module:intent Persistence seam for whole-project records
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProjectStore, JsonFileStore, InMemoryStore

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::project::{Project, ProjectId};

/// @ai:intent Trait for storing and retrieving projects
/// @ai:invariant put replaces the whole record; there are no partial updates
pub trait ProjectStore: Send + Sync {
    /// @ai:intent Load every project, sorted by id
    fn list(&self) -> Result<Vec<Project>>;

    /// @ai:intent Load one project by id
    fn get(&self, id: ProjectId) -> Result<Option<Project>>;

    /// @ai:intent Insert or replace a project
    fn put(&self, project: &Project) -> Result<()>;

    /// @ai:intent Remove a project, returning whether it existed
    fn delete(&self, id: ProjectId) -> Result<bool>;
}
