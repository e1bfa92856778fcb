//! The on-disk record of one generation run.
//!
//! A project is a directory under the output root holding one slot per
//! artifact type:
//! - `content.json` - the content document
//! - `design.json` - the design spec
//! - `index.html` - the generated page
//!
//! A new run into an existing directory starts by clearing all slots, so a
//! record never mixes outputs of different runs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::content::ContentDocument;
use super::design::DesignSpec;
use super::pipeline::StageOutput;
use crate::util::project_slug;

pub const CONTENT_FILE: &str = "content.json";
pub const DESIGN_FILE: &str = "design.json";
pub const INDEX_FILE: &str = "index.html";

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("failed to create project directory {0}: {1}")]
    Create(PathBuf, std::io::Error),

    #[error("failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("failed to remove {0}: {1}")]
    Remove(PathBuf, std::io::Error),

    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("failed to serialize {0}: {1}")]
    Serialize(PathBuf, serde_json::Error),

    #[error("failed to parse {0}: {1}")]
    Corrupt(PathBuf, serde_json::Error),
}

/// A project directory and its artifact slots.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    dir: PathBuf,
}

impl ProjectRecord {
    /// Create (or reuse) the project directory for a run.
    ///
    /// Uses `name` if given, otherwise a slug of the description.
    /// An existing directory with the same name is reused with its slots
    /// cleared; other files in it are left alone.
    pub fn create(
        output_root: &Path,
        name: Option<&str>,
        description: &str,
    ) -> Result<Self, ProjectError> {
        let dir_name = match name {
            Some(name) => name.to_string(),
            None => project_slug(description),
        };
        let dir = output_root.join(dir_name);

        std::fs::create_dir_all(&dir).map_err(|e| ProjectError::Create(dir.clone(), e))?;

        let project = Self { dir };
        project.reset()?;
        tracing::debug!(dir = %project.dir.display(), "project directory ready");

        Ok(project)
    }

    /// Remove every slot a previous run may have written.
    pub fn reset(&self) -> Result<(), ProjectError> {
        for path in [self.content_path(), self.design_path(), self.index_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed stale slot"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ProjectError::Remove(path, e)),
            }
        }
        Ok(())
    }

    /// Open an existing project directory without touching it.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn content_path(&self) -> PathBuf {
        self.dir.join(CONTENT_FILE)
    }

    pub fn design_path(&self) -> PathBuf {
        self.dir.join(DESIGN_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    /// Write a stage's output into its slot, returning the file written.
    pub fn persist(&self, output: &StageOutput) -> Result<PathBuf, ProjectError> {
        let path = match output {
            StageOutput::Content(content) => {
                let path = self.content_path();
                write_json(&path, content)?;
                path
            }
            StageOutput::Design(design) => {
                let path = self.design_path();
                write_json(&path, design)?;
                path
            }
            StageOutput::Artifact(html) => {
                let path = self.index_path();
                std::fs::write(&path, html).map_err(|e| ProjectError::Write(path.clone(), e))?;
                path
            }
        };

        tracing::debug!(path = %path.display(), "persisted stage output");
        Ok(path)
    }

    /// Read the content slot, if it has been written.
    pub fn read_content(&self) -> Result<Option<ContentDocument>, ProjectError> {
        read_json(&self.content_path())
    }

    /// Read the design slot, if it has been written.
    pub fn read_design(&self) -> Result<Option<DesignSpec>, ProjectError> {
        read_json(&self.design_path())
    }

    /// Read the generated page, if it has been written.
    pub fn read_artifact(&self) -> Result<Option<String>, ProjectError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ProjectError::Read(path, e))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ProjectError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ProjectError::Serialize(path.to_path_buf(), e))?;
    std::fs::write(path, text).map_err(|e| ProjectError::Write(path.to_path_buf(), e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProjectError> {
    if !path.exists() {
        return Ok(None);
    }
    let text =
        std::fs::read_to_string(path).map_err(|e| ProjectError::Read(path.to_path_buf(), e))?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ProjectError::Corrupt(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{CONTENT_JSON, DESIGN_JSON, INDEX_HTML};

    #[test]
    fn test_create_from_description() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), None, "A bakery in Paris!").unwrap();

        assert_eq!(project.dir(), root.path().join("a_bakery_in_paris"));
        assert!(project.dir().is_dir());
        assert_eq!(project.index_path(), project.dir().join("index.html"));
    }

    #[test]
    fn test_create_with_explicit_name() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), Some("bakery"), "ignored").unwrap();

        assert_eq!(project.dir(), root.path().join("bakery"));
    }

    #[test]
    fn test_create_reuses_directory_and_clears_slots() {
        let root = tempfile::tempdir().unwrap();
        let first = ProjectRecord::create(root.path(), None, "Same site").unwrap();
        first
            .persist(&StageOutput::Content(
                ContentDocument::from_completion(CONTENT_JSON).unwrap(),
            ))
            .unwrap();
        first
            .persist(&StageOutput::Artifact("<p>old</p>".to_string()))
            .unwrap();
        std::fs::write(first.dir().join("notes.txt"), "keep me").unwrap();

        let second = ProjectRecord::create(root.path(), None, "Same site").unwrap();

        assert_eq!(first.dir(), second.dir());
        assert!(second.read_content().unwrap().is_none());
        assert!(second.read_artifact().unwrap().is_none());
        assert!(second.dir().join("notes.txt").exists());
    }

    #[test]
    fn test_reset_empty_project() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), Some("site"), "").unwrap();

        assert!(project.reset().is_ok());
        assert!(project.dir().is_dir());
    }

    #[test]
    fn test_persist_and_read_slots() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), Some("site"), "").unwrap();
        assert!(project.read_content().unwrap().is_none());
        assert!(project.read_design().unwrap().is_none());
        assert!(project.read_artifact().unwrap().is_none());

        let content = ContentDocument::from_completion(CONTENT_JSON).unwrap();
        let design = DesignSpec::from_completion(DESIGN_JSON).unwrap();

        let path = project.persist(&StageOutput::Content(content.clone())).unwrap();
        assert_eq!(path, project.content_path());
        project.persist(&StageOutput::Design(design.clone())).unwrap();
        project
            .persist(&StageOutput::Artifact(INDEX_HTML.to_string()))
            .unwrap();

        assert_eq!(project.read_content().unwrap(), Some(content));
        assert_eq!(project.read_design().unwrap(), Some(design));
        assert_eq!(project.read_artifact().unwrap().as_deref(), Some(INDEX_HTML));
    }

    #[test]
    fn test_artifact_slot_is_overwritten() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), Some("site"), "").unwrap();

        project
            .persist(&StageOutput::Artifact("<p>draft</p>".to_string()))
            .unwrap();
        project
            .persist(&StageOutput::Artifact("<p>final</p>".to_string()))
            .unwrap();

        assert_eq!(project.read_artifact().unwrap().as_deref(), Some("<p>final</p>"));
    }

    #[test]
    fn test_corrupt_slot() {
        let root = tempfile::tempdir().unwrap();
        let project = ProjectRecord::create(root.path(), Some("site"), "").unwrap();
        std::fs::write(project.content_path(), "not json").unwrap();

        assert!(matches!(
            project.read_content(),
            Err(ProjectError::Corrupt(_, _))
        ));
    }
}
