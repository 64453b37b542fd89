//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory that marks a FixIt project root
const PROJECT_DIR: &str = ".fixit";

/// Represents a FixIt project on disk
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .fixit/)
    root: PathBuf,
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("No FixIt project found (searched from {} upward). Run `fixit init` first.", searched_from.display())]
    NotFound { searched_from: PathBuf },

    #[error("A FixIt project already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(String),
}

impl Project {
    /// Find the project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::Io(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open a project rooted at an explicit path, without walking up
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        if root.join(PROJECT_DIR).is_dir() {
            Ok(Self {
                root: root.to_path_buf(),
            })
        } else {
            Err(ProjectError::NotFound {
                searched_from: root.to_path_buf(),
            })
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let fixit_dir = root.join(PROJECT_DIR);
        if fixit_dir.exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&fixit_dir).map_err(|e| ProjectError::Io(e.to_string()))?;
        std::fs::write(fixit_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fixit_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    fn default_config() -> &'static str {
        r#"# FixIt project configuration
# duplicates: skip | update | error
duplicates: skip
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_then_discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        Project::init(tmp.path()).unwrap();

        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let project = Project::discover_from(&nested).unwrap();
        assert!(project.fixit_dir().is_dir());
    }

    #[test]
    fn init_twice_fails() {
        let tmp = TempDir::new().unwrap();
        Project::init(tmp.path()).unwrap();
        assert!(matches!(
            Project::init(tmp.path()),
            Err(ProjectError::AlreadyExists(_))
        ));
    }

    #[test]
    fn discover_outside_a_project_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            Project::discover_from(tmp.path()),
            Err(ProjectError::NotFound { .. })
        ));
    }
}
