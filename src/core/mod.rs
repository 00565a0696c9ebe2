//! Core module - reference catalog, configuration and project discovery

pub mod catalog;
pub mod config;
pub mod project;

pub use catalog::{CatalogError, ReferenceCatalog};
pub use config::Config;
pub use project::{Project, ProjectError};
