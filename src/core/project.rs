//! Project discovery and structure
//!
//! A project is any directory containing `.crsc/`. It holds the project-level
//! config and a `reports/` directory for saved reports.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_DIR: &str = ".crsc";
const REPORTS_DIR: &str = "reports";

/// Represents a crsc project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .crsc/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

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

    /// Create a new project at the given path
    pub fn init(path: &Path, force: bool) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let dir = root.join(PROJECT_DIR);
        if dir.exists() && !force {
            return Err(ProjectError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::create_dir_all(root.join(REPORTS_DIR))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# crsc project configuration
# Command-line flags override these values.

# Product envelope defaults
# min_height_cm: 40
# max_height_cm: 150
# min_weight_kg: 3
# max_weight_kg: 36

# Install method written into the test matrix
# install_method: "ISOFIX 3 pts + Top-tether"

# Regulations selected when --reg is not given (identifier or number)
# regulations:
#   - UN R129

# Custom reference catalog (see `crsc catalog export`)
# catalog: catalog.yaml

# Default output format (auto, md, json, yaml, tsv, csv)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .crsc configuration directory
    pub fn crsc_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.crsc_dir().join("config.yaml")
    }

    /// Directory where saved reports are written
    pub fn reports_dir(&self) -> PathBuf {
        self.root.join(REPORTS_DIR)
    }

    /// Resolve a path from the project config relative to the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("not a crsc project (searched from {searched_from:?})")]
    #[diagnostic(code(crsc::project::not_found), help("Run 'crsc init' to create one"))]
    NotFound { searched_from: PathBuf },

    #[error("crsc project already exists at {0:?}")]
    #[diagnostic(code(crsc::project::exists), help("Use --force to rewrite the config"))]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(crsc::project::io))]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();

        assert!(project.crsc_dir().is_dir());
        assert!(project.config_path().exists());
        assert!(project.reports_dir().is_dir());
    }

    #[test]
    fn test_default_config_parses() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();
        let config = crate::core::Config::read_file(&project.config_path()).unwrap();
        assert_eq!(config, crate::core::Config::default());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path(), false).unwrap();

        let err = Project::init(tmp.path(), false).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
        assert!(Project::init(tmp.path(), true).is_ok());
    }

    #[test]
    fn test_project_discover_from_nested_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path(), false).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_crsc_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();
        assert_eq!(project.resolve(Path::new("cat.yaml")), project.root().join("cat.yaml"));
    }
}
