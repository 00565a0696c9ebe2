//! Report assembly - the engineering output aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::catalog::ReferenceCatalog;
use crate::engineering::anthropometry::{derive_anthropometry, AnthropometryParams};
use crate::engineering::envelope::Envelope;
use crate::engineering::mapping::{map_standards, StandardMapping};
use crate::engineering::matcher::match_dummies;
use crate::engineering::matrix::{build_test_matrix, TestConfiguration};
use crate::engineering::steps::age_range_label;
use crate::engineering::thresholds::{threshold_sections, SafetyThresholdSection};
use crate::entities::band::Band;
use crate::entities::regulation::RegulationRecord;

pub const PRODUCT_TYPE: &str = "Child restraint system";

pub const DATA_SOURCE: &str =
    "UNECE WP.29 + NHTSA Federal Register + GPS-028 Anthropometry 11-28-2018";

/// Provenance of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Effective-date annotated labels, selection order
    pub regulations: Vec<String>,
    pub data_source: String,
}

/// Product summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub product_type: String,
    pub height_cm: Band,
    pub weight_kg: Band,
    /// "0-12 years"
    pub age_range: String,
    /// Matched dummy codes in catalog order
    pub dummy_codes: Vec<String>,
    pub install_method: String,
}

/// Advisory notes attached to a selected regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationAdvisory {
    pub regulation: String,
    pub compliance_date: chrono::NaiveDate,
    pub future: bool,
    pub notes: Vec<String>,
}

/// Complete engineering compliance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringOutput {
    pub metadata: OutputMetadata,
    pub basic_info: BasicInfo,
    pub standard_mappings: Vec<StandardMapping>,
    pub advisories: Vec<RegulationAdvisory>,
    pub anthropometry: AnthropometryParams,
    pub safety_thresholds: Vec<SafetyThresholdSection>,
    pub test_matrix: Vec<TestConfiguration>,
}

/// Generate a report stamped with the current time
pub fn generate(
    catalog: &ReferenceCatalog,
    envelope: &Envelope,
    selected: &[RegulationRecord],
    install_method: &str,
) -> EngineeringOutput {
    generate_at(catalog, envelope, selected, install_method, Utc::now())
}

/// Generate a report with an explicit timestamp. Identical inputs give
/// identical outputs.
pub fn generate_at(
    catalog: &ReferenceCatalog,
    envelope: &Envelope,
    selected: &[RegulationRecord],
    install_method: &str,
    generated_at: DateTime<Utc>,
) -> EngineeringOutput {
    let matched = match_dummies(catalog, envelope);

    let output = EngineeringOutput {
        metadata: OutputMetadata {
            generated_at,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            regulations: selected.iter().map(|r| r.annotated_label()).collect(),
            data_source: DATA_SOURCE.to_string(),
        },
        basic_info: BasicInfo {
            product_type: PRODUCT_TYPE.to_string(),
            height_cm: envelope.height_cm,
            weight_kg: envelope.mass_kg,
            age_range: age_range_label(envelope.min_height(), envelope.max_height()),
            dummy_codes: matched.iter().map(|d| d.code.clone()).collect(),
            install_method: install_method.to_string(),
        },
        standard_mappings: map_standards(selected, &matched),
        advisories: advisories(selected),
        anthropometry: derive_anthropometry(&matched),
        safety_thresholds: threshold_sections(selected),
        test_matrix: build_test_matrix(envelope, selected, install_method),
    };

    tracing::debug!(
        regulations = selected.len(),
        dummies = output.basic_info.dummy_codes.len(),
        configurations = output.test_matrix.len(),
        "generated engineering output"
    );
    output
}

fn advisories(selected: &[RegulationRecord]) -> Vec<RegulationAdvisory> {
    selected
        .iter()
        .filter(|r| !r.advisories.is_empty())
        .map(|r| RegulationAdvisory {
            regulation: r.label(),
            compliance_date: r.compliance_date,
            future: r.is_future(),
            notes: r.advisories.clone(),
        })
        .collect()
}
