//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::Project;

pub const DEFAULT_MIN_HEIGHT_CM: f64 = 40.0;
pub const DEFAULT_MAX_HEIGHT_CM: f64 = 150.0;
pub const DEFAULT_MIN_WEIGHT_KG: f64 = 3.0;
pub const DEFAULT_MAX_WEIGHT_KG: f64 = 36.0;
pub const DEFAULT_INSTALL_METHOD: &str = "ISOFIX 3 pts + Top-tether";
pub const DEFAULT_REGULATIONS: &[&str] = &["UN R129"];

/// crsc configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Envelope defaults used when a bound is not given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight_kg: Option<f64>,

    /// Install method written into the test matrix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_method: Option<String>,

    /// Regulation selectors used when `--reg` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulations: Option<Vec<String>>,

    /// Custom catalog file replacing the builtin one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessor fallbacks)

        // 2. Global user config (~/.config/crsc/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.crsc/config.yaml)
        if let Ok(project) = Project::discover() {
            if let Some(mut project_config) = Self::read_file(&project.config_path()) {
                project_config.anchor_paths(project.root());
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "crsc")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Parse a config file; unreadable or malformed files are skipped
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        // `crsc init` writes a file that is nothing but commented-out keys
        if contents.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Some(Config::default());
        }
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.min_height_cm.is_some() {
            self.min_height_cm = other.min_height_cm;
        }
        if other.max_height_cm.is_some() {
            self.max_height_cm = other.max_height_cm;
        }
        if other.min_weight_kg.is_some() {
            self.min_weight_kg = other.min_weight_kg;
        }
        if other.max_weight_kg.is_some() {
            self.max_weight_kg = other.max_weight_kg;
        }
        if other.install_method.is_some() {
            self.install_method = other.install_method;
        }
        if other.regulations.is_some() {
            self.regulations = other.regulations;
        }
        if other.catalog.is_some() {
            self.catalog = other.catalog;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolve relative paths against `root`. Only the project layer is
    /// anchored; global and environment values are used as given.
    pub fn anchor_paths(&mut self, root: &Path) {
        if let Some(catalog) = &self.catalog {
            if catalog.is_relative() {
                self.catalog = Some(root.join(catalog));
            }
        }
    }

    /// Apply CRSC_* environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(method) = lookup("CRSC_INSTALL_METHOD") {
            self.install_method = Some(method);
        }
        if let Some(regs) = lookup("CRSC_REGULATIONS") {
            let list: Vec<String> = regs
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            self.regulations = Some(list);
        }
        if let Some(catalog) = lookup("CRSC_CATALOG") {
            self.catalog = Some(PathBuf::from(catalog));
        }
        if let Some(format) = lookup("CRSC_FORMAT") {
            self.default_format = Some(format);
        }
    }

    pub fn min_height_cm(&self) -> f64 {
        self.min_height_cm.unwrap_or(DEFAULT_MIN_HEIGHT_CM)
    }

    pub fn max_height_cm(&self) -> f64 {
        self.max_height_cm.unwrap_or(DEFAULT_MAX_HEIGHT_CM)
    }

    pub fn min_weight_kg(&self) -> f64 {
        self.min_weight_kg.unwrap_or(DEFAULT_MIN_WEIGHT_KG)
    }

    pub fn max_weight_kg(&self) -> f64 {
        self.max_weight_kg.unwrap_or(DEFAULT_MAX_WEIGHT_KG)
    }

    pub fn install_method(&self) -> String {
        self.install_method
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTALL_METHOD.to_string())
    }

    pub fn regulations(&self) -> Vec<String> {
        self.regulations
            .clone()
            .unwrap_or_else(|| DEFAULT_REGULATIONS.iter().map(|s| s.to_string()).collect())
    }

    /// Look up a key by name for `crsc config show <key>`
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "min_height_cm" => self.min_height_cm.map(|v| v.to_string()),
            "max_height_cm" => self.max_height_cm.map(|v| v.to_string()),
            "min_weight_kg" => self.min_weight_kg.map(|v| v.to_string()),
            "max_weight_kg" => self.max_weight_kg.map(|v| v.to_string()),
            "install_method" => self.install_method.clone(),
            "regulations" => self.regulations.as_ref().map(|r| r.join(", ")),
            "catalog" => self.catalog.as_ref().map(|p| p.display().to_string()),
            "default_format" => self.default_format.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.min_height_cm(), 40.0);
        assert_eq!(config.max_height_cm(), 150.0);
        assert_eq!(config.min_weight_kg(), 3.0);
        assert_eq!(config.max_weight_kg(), 36.0);
        assert_eq!(config.install_method(), "ISOFIX 3 pts + Top-tether");
        assert_eq!(config.regulations(), vec!["UN R129".to_string()]);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base: Config = serde_yml::from_str("min_height_cm: 60\ninstall_method: belt\n").unwrap();
        let overlay: Config = serde_yml::from_str("install_method: ISOFIX\nregulations: [FMVSS 213]\n").unwrap();
        base.merge(overlay);

        assert_eq!(base.min_height_cm(), 60.0);
        assert_eq!(base.install_method(), "ISOFIX");
        assert_eq!(base.regulations(), vec!["FMVSS 213".to_string()]);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CRSC_REGULATIONS", "UN R129, fmvss213a,,"),
            ("CRSC_INSTALL_METHOD", "Vehicle seat belt + Top-tether"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(
            config.regulations(),
            vec!["UN R129".to_string(), "fmvss213a".to_string()]
        );
        assert_eq!(config.install_method(), "Vehicle seat belt + Top-tether");
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_read_file_skips_malformed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let good = tmp.path().join("good.yaml");
        let bad = tmp.path().join("bad.yaml");
        std::fs::write(&good, "max_weight_kg: 18.2\n").unwrap();
        std::fs::write(&bad, "max_weight_kg: [oops\n").unwrap();

        assert_eq!(Config::read_file(&good).unwrap().max_weight_kg(), 18.2);
        assert!(Config::read_file(&bad).is_none());
        assert!(Config::read_file(&tmp.path().join("missing.yaml")).is_none());
    }

    #[test]
    fn test_anchor_paths_only_touches_relative_catalog() {
        let root = Path::new("/work/seat");
        let mut relative: Config = serde_yml::from_str("catalog: data/catalog.yaml\n").unwrap();
        relative.anchor_paths(root);
        assert_eq!(relative.catalog.unwrap(), root.join("data/catalog.yaml"));

        let mut absolute: Config = serde_yml::from_str("catalog: /opt/catalog.yaml\n").unwrap();
        absolute.anchor_paths(root);
        assert_eq!(absolute.catalog.unwrap(), PathBuf::from("/opt/catalog.yaml"));
    }

    #[test]
    fn test_env_catalog_stays_relative() {
        let mut config: Config = serde_yml::from_str("catalog: data/catalog.yaml\n").unwrap();
        config.anchor_paths(Path::new("/work/seat"));
        config.apply_env(|k| (k == "CRSC_CATALOG").then(|| "mine.yaml".to_string()));
        assert_eq!(config.catalog.unwrap(), PathBuf::from("mine.yaml"));
    }

    #[test]
    fn test_get_by_key() {
        let config: Config = serde_yml::from_str("regulations: [UN R129, FMVSS 213]\n").unwrap();
        assert_eq!(config.get("regulations").unwrap(), "UN R129, FMVSS 213");
        assert!(config.get("install_method").is_none());
        assert!(config.get("nonsense").is_none());
    }
}
