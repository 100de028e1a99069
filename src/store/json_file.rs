//! @ai:module:intent JSON-file-per-project store
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonFileStore
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::project::{next_id, Project, ProjectId};
use crate::store::ProjectStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// @ai:intent Stores each project as `<data_dir>/<id>.json`
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// @ai:intent Create a store rooted at a directory
    /// @ai:effects pure
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn project_path(&self, id: ProjectId) -> PathBuf {
        self.data_dir.join(format!("{}.json", id))
    }

    fn file_id(path: &Path) -> Option<ProjectId> {
        path.file_stem()?.to_str()?.parse().ok()
    }

    /// @ai:intent Parse a project file and upgrade legacy payments
    /// @ai:pre path points to a JSON project file
    /// @ai:effects fs:read
    fn read_project(path: &Path) -> Result<Project> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut project: Project = serde_json::from_str(&content)?;
        let converted = project.upgrade_legacy_payments();

        if converted > 0 {
            tracing::info!(
                "Converted {} legacy payments to paid invoices for project {}",
                converted,
                project.id
            );
        }
        Ok(project)
    }

    /// @ai:intent Find all JSON files directly under the data directory
    /// @ai:effects fs:read
    fn find_project_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.data_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// @ai:intent Import an array of projects exported from the browser tracker
    /// @ai:post projects without an id receive a fresh one
    /// @ai:effects fs:read, fs:write
    pub fn import(&self, path: &Path) -> Result<Vec<Project>> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut projects: Vec<Project> = serde_json::from_str(&content)?;
        let mut taken: Vec<ProjectId> = self.list()?.iter().map(|p| p.id).collect();

        for project in &mut projects {
            if project.id == 0 || taken.contains(&project.id) {
                project.id = next_id(taken.iter().copied());
            }
            taken.push(project.id);
            project.upgrade_legacy_payments();
            self.put(project)?;
        }

        tracing::info!("Imported {} projects from {}", projects.len(), path.display());
        Ok(projects)
    }
}

impl ProjectStore for JsonFileStore {
    /// @ai:intent Load every readable project file
    /// @ai:edge_cases invalid files and files not named `<id>.json` are skipped with a warning
    /// @ai:effects fs:read
    fn list(&self) -> Result<Vec<Project>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let files = self.find_project_files();
        let mut projects = Vec::with_capacity(files.len());

        for path in files {
            match Self::read_project(&path) {
                Ok(project) if Self::file_id(&path) == Some(project.id) => projects.push(project),
                Ok(project) => {
                    tracing::warn!(
                        "Skipping {}: file name does not match project id {}",
                        path.display(),
                        project.id
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping invalid project file {}: {}", path.display(), e);
                }
            }
        }

        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    /// @ai:intent Load a single project
    /// @ai:effects fs:read
    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        let path = self.project_path(id);

        if !path.exists() {
            return Ok(None);
        }
        Self::read_project(&path).map(Some)
    }

    /// @ai:intent Atomically write a project file
    /// @ai:post readers see either the old or the new record, never a partial one
    /// @ai:effects fs:write
    fn put(&self, project: &Project) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let path = self.project_path(project.id);
        let json = serde_json::to_string_pretty(project)?;

        let mut file = NamedTempFile::new_in(&self.data_dir)?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?;
        file.persist(&path)?;

        tracing::info!("Saved project {} to {}", project.id, path.display());
        Ok(())
    }

    /// @ai:intent Delete a project file
    /// @ai:effects fs:write
    fn delete(&self, id: ProjectId) -> Result<bool> {
        let path = self.project_path(id);

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)?;
        tracing::info!("Deleted project {}", id);
        Ok(true)
    }
}
