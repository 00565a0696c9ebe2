//! Shared helper functions for CLI commands
//!
//! Input resolution lives here: flags are merged with [`Config`], checked,
//! and handed to the engine as typed values.

use miette::Result;
use std::borrow::Cow;
use std::path::PathBuf;

use crate::cli::args::{EnvelopeArgs, SelectionArgs};
use crate::cli::GlobalOpts;
use crate::core::{Config, ReferenceCatalog};
use crate::engineering::Envelope;
use crate::entities::RegulationRecord;

/// Inputs for one engine run, after flags and config are merged
#[derive(Debug)]
pub struct RunInputs {
    pub catalog: Cow<'static, ReferenceCatalog>,
    pub envelope: Envelope,
    pub regulations: Vec<RegulationRecord>,
    pub install_method: String,
}

/// Resolve catalog, envelope and regulation selection for `report` and `matrix`
pub fn resolve_inputs(
    global: &GlobalOpts,
    config: &Config,
    envelope: &EnvelopeArgs,
    selection: &SelectionArgs,
) -> Result<RunInputs> {
    let catalog = load_catalog(global, config)?;
    let envelope = build_envelope(envelope, config)?;

    let selectors = if selection.regulations.is_empty() {
        config.regulations()
    } else {
        selection.regulations.clone()
    };
    let regulations = resolve_regulations(&catalog, &selectors)?;

    let install_method = selection
        .install_method
        .clone()
        .unwrap_or_else(|| config.install_method());

    Ok(RunInputs {
        catalog,
        envelope,
        regulations,
        install_method,
    })
}

/// The catalog named by `--catalog` or config, else the builtin one
pub fn load_catalog(global: &GlobalOpts, config: &Config) -> Result<Cow<'static, ReferenceCatalog>> {
    match catalog_path(global, config) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading custom catalog");
            let catalog = ReferenceCatalog::load(&path)?;
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(ReferenceCatalog::builtin())),
    }
}

fn catalog_path(global: &GlobalOpts, config: &Config) -> Option<PathBuf> {
    global.catalog.clone().or_else(|| config.catalog.clone())
}

/// Merge envelope flags with config defaults and check them
pub fn build_envelope(args: &EnvelopeArgs, config: &Config) -> Result<Envelope> {
    let envelope = Envelope::new(
        args.min_height.unwrap_or_else(|| config.min_height_cm()),
        args.max_height.unwrap_or_else(|| config.max_height_cm()),
        args.min_weight.unwrap_or_else(|| config.min_weight_kg()),
        args.max_weight.unwrap_or_else(|| config.max_weight_kg()),
    )?;
    Ok(envelope)
}

/// Resolve selectors to catalog records, keeping selection order.
///
/// A record selected twice is kept once. Unknown selectors are an error that
/// lists what the catalog offers.
pub fn resolve_regulations(
    catalog: &ReferenceCatalog,
    selectors: &[String],
) -> Result<Vec<RegulationRecord>> {
    let mut resolved: Vec<RegulationRecord> = Vec::new();

    for selector in selectors {
        let Some(record) = catalog.resolve_regulation(selector) else {
            return Err(miette::miette!(
                code = "crsc::regulation::unknown",
                help = format!("Known regulations: {}", known_selectors(catalog)),
                "unknown regulation '{}'",
                selector
            ));
        };

        if resolved.iter().any(|r| r.id == record.id) {
            tracing::debug!(selector = %selector, id = %record.id, "regulation selected twice");
            continue;
        }
        resolved.push(record.clone());
    }

    Ok(resolved)
}

fn known_selectors(catalog: &ReferenceCatalog) -> String {
    let mut numbers: Vec<&str> = Vec::new();
    for reg in catalog.regulations() {
        if !numbers.contains(&reg.number.as_str()) {
            numbers.push(&reg.number);
        }
    }
    numbers.join(", ")
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_resolve_regulations_keeps_order() {
        let catalog = ReferenceCatalog::builtin();
        let regs =
            resolve_regulations(catalog, &selectors(&["fmvss213b", "UN R129", "REF_FMVSS_213A"]))
                .unwrap();
        let numbers: Vec<&str> = regs.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["FMVSS 213b", "UN R129", "FMVSS 213a"]);
    }

    #[test]
    fn test_resolve_regulations_dedupes() {
        let catalog = ReferenceCatalog::builtin();
        let regs = resolve_regulations(catalog, &selectors(&["UN R129", "unr129"])).unwrap();
        assert_eq!(regs.len(), 1);
    }

    #[test]
    fn test_resolve_regulations_unknown() {
        let catalog = ReferenceCatalog::builtin();
        let err = resolve_regulations(catalog, &selectors(&["ECE R44"])).unwrap_err();
        assert!(err.to_string().contains("ECE R44"));
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("UN R129"));
        assert!(help.contains("FMVSS 213b"));
    }

    #[test]
    fn test_build_envelope_uses_config_defaults() {
        let config: Config = serde_yml::from_str("max_height_cm: 105\n").unwrap();
        let args = EnvelopeArgs {
            min_weight: Some(9.0),
            ..Default::default()
        };
        let envelope = build_envelope(&args, &config).unwrap();
        assert_eq!(envelope.height_cm.min, 40.0);
        assert_eq!(envelope.height_cm.max, 105.0);
        assert_eq!(envelope.mass_kg.min, 9.0);
        assert_eq!(envelope.mass_kg.max, 36.0);
    }

    #[test]
    fn test_build_envelope_rejects_inverted() {
        let args = EnvelopeArgs {
            min_height: Some(120.0),
            max_height: Some(100.0),
            ..Default::default()
        };
        assert!(build_envelope(&args, &Config::default()).is_err());
    }
}
