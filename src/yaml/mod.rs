//! YAML loading with source-annotated errors

pub mod diagnostics;

use serde::de::DeserializeOwned;
use std::path::Path;

pub use diagnostics::{YamlError, YamlSyntaxError};

/// Parse a YAML string, attributing errors to `filename`
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename).into())
}

/// Read and parse a YAML file
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_yaml(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_valid_yaml() {
        let map: BTreeMap<String, f64> = parse_yaml("a: 1.5\nb: 2\n", "inline.yaml").unwrap();
        assert_eq!(map["a"], 1.5);
        assert_eq!(map["b"], 2.0);
    }

    #[test]
    fn test_parse_invalid_yaml_reports_syntax_error() {
        let err = parse_yaml::<BTreeMap<String, f64>>("a: [1, 2\n", "bad.yaml").unwrap_err();
        assert!(matches!(err, YamlError::Syntax(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_yaml_file::<BTreeMap<String, f64>>(Path::new("/definitely/not/here.yaml"))
            .unwrap_err();
        assert!(matches!(err, YamlError::Io { .. }));
    }
}
