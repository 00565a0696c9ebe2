//! Diagnostics for catalog and config YAML files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(crsc::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, pointing at its reported location
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let width = source[offset..].chars().next().map_or(0, char::len_utf8);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset + width),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("could not read {path}: {source}")]
    #[diagnostic(code(crsc::yaml::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Byte offset of a 1-based line/column pair. Columns count characters, not
/// bytes; the result is clamped to the source and always on a char boundary.
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            return match text.char_indices().nth(column.saturating_sub(1)) {
                Some((byte, _)) => offset + byte,
                None => offset + text.len(),
            };
        }
        offset += text.len();
    }
    source.char_indices().last().map_or(0, |(i, _)| i)
}

/// Suggest a fix for the common mistakes made when hand-editing catalogs
fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("unknown variant") {
        if msg.contains("eu_q_series") {
            return Some("series must be one of: eu_q_series, us_crabi, us_hiii, us_q3s_side_impact".to_string());
        }
        if msg.contains("rearward") {
            return Some("install_direction must be rearward or forward".to_string());
        }
        if msg.contains("active") {
            return Some("status must be one of: active, future, draft, obsolete".to_string());
        }
        return Some("Check the spelling of enumerated values; they are lowercase".to_string());
    }

    if msg.contains("missing field") {
        return Some("Every dummy needs id, code, series, height_cm, mass_kg, age_range, install_direction, hip_width_mm, shoulder_width_mm and clause".to_string());
    }

    if msg.contains("input is not enough") || msg.contains("premature end") || msg.contains("trailing input") {
        return Some("Dates are written as YYYY-MM-DD, e.g. 2018-12-29".to_string());
    }

    if msg.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs".to_string());
    }

    if msg.contains("duplicate") {
        return Some("Each key can only appear once in a mapping".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
        assert_eq!(line_col_to_offset(source, 9, 1), source.len() - 1);
    }

    #[test]
    fn test_offset_counts_characters_not_bytes() {
        let source = "regulations:\n- id: \"≤≤≤≤≤≤≤≤\" , x\n";
        let offset = line_col_to_offset(source, 2, 18);
        assert_eq!(&source[offset..offset + 1], ",");

        let tail = "clause: §7.1.2 ≥";
        assert_eq!(line_col_to_offset(tail, 5, 1), tail.len() - '≥'.len_utf8());
    }

    #[test]
    fn test_span_lands_on_error_column_after_multibyte_text() {
        let source = "limit: \"≤390\"\nunit: [g\n";
        let err = serde_yml::from_str::<serde_yml::Value>(source).unwrap_err();
        let diag = YamlSyntaxError::from_serde_error(&err, source, "catalog.yaml");
        let start = diag.span.offset();
        assert!(source.is_char_boundary(start));
        assert!(start <= source.len());
    }

    #[test]
    fn test_help_for_enum_values() {
        let help = generate_help("series: unknown variant `eu`, expected one of `eu_q_series`, `us_crabi`").unwrap();
        assert!(help.contains("us_q3s_side_impact"));

        let help = generate_help("unknown variant `ACTIVE`, expected one of `active`, `future`").unwrap();
        assert!(help.contains("obsolete"));
    }

    #[test]
    fn test_no_help_for_unrelated_errors() {
        assert!(generate_help("some random error").is_none());
    }
}
