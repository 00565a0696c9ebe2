//! Reference catalog - dummy profiles and regulation records
//!
//! The builtin catalog is built once per process and never mutated. Custom
//! catalogs can be loaded from YAML; they go through the same invariant checks
//! as the builtin one so a hand-edited file cannot produce a report that the
//! builtin data would reject.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::entities::band::Band;
use crate::entities::dummy::{DummyProfile, DummySeries, InstallDirection};
use crate::entities::regulation::{
    RegulationRecord, RegulationStatus, FMVSS_213, FMVSS_213A, FMVSS_213B, UN_R129,
};
use crate::yaml::{self, YamlError};

/// Tolerance used when comparing shared band endpoints
const EDGE_EPSILON: f64 = 1e-9;

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("duplicate {kind} identifier '{id}'")]
    #[diagnostic(code(crsc::catalog::duplicate_id), help("Identifiers are lookup keys and must be unique"))]
    DuplicateId { kind: &'static str, id: String },

    #[error("dummy '{id}' has an invalid {axis} band ({band})")]
    #[diagnostic(code(crsc::catalog::band), help("Bands need finite bounds with min <= max"))]
    InvalidBand {
        id: String,
        axis: &'static str,
        band: Band,
    },

    #[error("regulation '{number}' has more than one active record: {first}, {second}")]
    #[diagnostic(code(crsc::catalog::multiple_active), help("Mark superseded versions as obsolete"))]
    MultipleActive {
        number: String,
        first: String,
        second: String,
    },

    #[error("future regulation '{id}' must become mandatory after it takes effect ({effective} -> {compliance})")]
    #[diagnostic(code(crsc::catalog::future_dates))]
    FutureDates {
        id: String,
        effective: NaiveDate,
        compliance: NaiveDate,
    },

    #[error("{series} height bands are not contiguous: '{previous}' ends at {previous_max} cm but '{next}' starts at {next_min} cm")]
    #[diagnostic(code(crsc::catalog::series_gap), help("Neighbouring dummies in a series share their boundary height"))]
    SeriesDiscontinuity {
        series: DummySeries,
        previous: String,
        previous_max: f64,
        next: String,
        next_min: f64,
    },
}

/// Immutable set of dummy profiles and regulation records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    #[serde(default)]
    dummies: Vec<DummyProfile>,

    #[serde(default)]
    regulations: Vec<RegulationRecord>,
}

impl ReferenceCatalog {
    /// Build and validate a catalog from parts
    pub fn new(
        dummies: Vec<DummyProfile>,
        regulations: Vec<RegulationRecord>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            dummies,
            regulations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the tool
    pub fn builtin() -> &'static ReferenceCatalog {
        static BUILTIN: OnceLock<ReferenceCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Self {
            dummies: builtin_dummies(),
            regulations: builtin_regulations(),
        })
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog: ReferenceCatalog = yaml::parse_yaml_file(path)?;
        catalog.validate()?;
        tracing::debug!(
            path = %path.display(),
            dummies = catalog.dummies.len(),
            regulations = catalog.regulations.len(),
            "loaded custom catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml_str(content: &str, filename: &str) -> Result<Self, CatalogError> {
        let catalog: ReferenceCatalog = yaml::parse_yaml(content, filename)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Dummies in declaration order
    pub fn dummies(&self) -> &[DummyProfile] {
        &self.dummies
    }

    /// Regulation records in declaration order
    pub fn regulations(&self) -> &[RegulationRecord] {
        &self.regulations
    }

    pub fn dummy(&self, id: &str) -> Option<&DummyProfile> {
        self.dummies.iter().find(|d| d.id == id)
    }

    pub fn regulation(&self, id: &str) -> Option<&RegulationRecord> {
        self.regulations.iter().find(|r| r.id == id)
    }

    /// Resolve a user selector (identifier or regulation number).
    ///
    /// When several versions share a number the active record wins, then a
    /// future one, then whichever was declared first.
    pub fn resolve_regulation(&self, selector: &str) -> Option<&RegulationRecord> {
        let candidates: Vec<&RegulationRecord> = self
            .regulations
            .iter()
            .filter(|r| r.matches_selector(selector))
            .collect();

        candidates
            .iter()
            .find(|r| r.status == RegulationStatus::Active)
            .or_else(|| candidates.iter().find(|r| r.status == RegulationStatus::Future))
            .or_else(|| candidates.first())
            .copied()
    }

    /// Check the catalog invariants
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for dummy in &self.dummies {
            if !seen.insert(dummy.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "dummy",
                    id: dummy.id.clone(),
                });
            }
            for (axis, band) in [("height", dummy.height_cm), ("mass", dummy.mass_kg)] {
                if !band.is_well_formed() {
                    return Err(CatalogError::InvalidBand {
                        id: dummy.id.clone(),
                        axis,
                        band,
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        let mut active: BTreeMap<&str, &str> = BTreeMap::new();
        for reg in &self.regulations {
            if !seen.insert(reg.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "regulation",
                    id: reg.id.clone(),
                });
            }
            if reg.status == RegulationStatus::Active {
                if let Some(first) = active.insert(reg.number.as_str(), reg.id.as_str()) {
                    return Err(CatalogError::MultipleActive {
                        number: reg.number.clone(),
                        first: first.to_string(),
                        second: reg.id.clone(),
                    });
                }
            }
            if reg.status == RegulationStatus::Future && reg.compliance_date <= reg.effective_date {
                return Err(CatalogError::FutureDates {
                    id: reg.id.clone(),
                    effective: reg.effective_date,
                    compliance: reg.compliance_date,
                });
            }
        }

        self.check_series_continuity()?;
        self.warn_unknown_references();
        Ok(())
    }

    fn check_series_continuity(&self) -> Result<(), CatalogError> {
        for series in DummySeries::all() {
            let mut members: Vec<&DummyProfile> =
                self.dummies.iter().filter(|d| d.series == *series).collect();
            members.sort_by(|a, b| a.height_cm.min.total_cmp(&b.height_cm.min));

            for pair in members.windows(2) {
                let (previous, next) = (pair[0], pair[1]);
                if (next.height_cm.min - previous.height_cm.max).abs() > EDGE_EPSILON {
                    return Err(CatalogError::SeriesDiscontinuity {
                        series: *series,
                        previous: previous.id.clone(),
                        previous_max: previous.height_cm.max,
                        next: next.id.clone(),
                        next_min: next.height_cm.min,
                    });
                }
            }
        }
        Ok(())
    }

    fn warn_unknown_references(&self) {
        let known: HashSet<&str> = self.regulations.iter().map(|r| r.number.as_str()).collect();
        for dummy in &self.dummies {
            for number in &dummy.applicable_regulations {
                if !known.contains(number.as_str()) {
                    tracing::warn!(
                        dummy = %dummy.id,
                        regulation = %number,
                        "dummy references a regulation that is not in the catalog"
                    );
                }
            }
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("builtin catalog dates are valid")
}

#[allow(clippy::too_many_arguments)]
fn dummy(
    id: &str,
    code: &str,
    series: DummySeries,
    height_cm: (f64, f64),
    mass_kg: (f64, f64),
    age_range: &str,
    install_direction: InstallDirection,
    hip_width_mm: f64,
    shoulder_width_mm: f64,
    applicable_regulations: &[&str],
    clause: &str,
) -> DummyProfile {
    DummyProfile {
        id: id.to_string(),
        code: code.to_string(),
        series,
        height_cm: Band::new(height_cm.0, height_cm.1),
        mass_kg: Band::new(mass_kg.0, mass_kg.1),
        age_range: age_range.to_string(),
        install_direction,
        hip_width_mm,
        shoulder_width_mm,
        applicable_regulations: applicable_regulations.iter().map(|s| s.to_string()).collect(),
        clause: clause.to_string(),
    }
}

fn builtin_dummies() -> Vec<DummyProfile> {
    use DummySeries::*;
    use InstallDirection::*;

    const R129_4_1: &str = "UN R129 Annex 19 §4.1";
    const R129_4_2: &str = "UN R129 Annex 19 §4.2";
    const FMVSS213_S7: &str = "FMVSS 213 S7.1.2";

    vec![
        // EU Q-series, rearward up to 105 cm
        dummy("DUMMY_Q0", "Q0", EuQSeries, (40.0, 50.0), (3.47, 5.53), "0-6 months", Rearward, 180.0, 145.0, &[UN_R129], R129_4_1),
        dummy("DUMMY_Q0_PLUS", "Q0+", EuQSeries, (50.0, 60.0), (5.53, 8.15), "6-12 months", Rearward, 210.0, 165.0, &[UN_R129], R129_4_1),
        dummy("DUMMY_Q1", "Q1", EuQSeries, (60.0, 75.0), (8.15, 10.5), "1-2 years", Rearward, 245.0, 195.0, &[UN_R129], R129_4_1),
        dummy("DUMMY_Q1_5", "Q1.5", EuQSeries, (75.0, 87.0), (10.5, 14.0), "2-3 years", Rearward, 275.0, 225.0, &[UN_R129], R129_4_1),
        dummy("DUMMY_Q3", "Q3", EuQSeries, (87.0, 105.0), (14.0, 18.0), "3-4 years", Rearward, 310.0, 260.0, &[UN_R129], R129_4_1),
        // Q3s covers 105-125 cm forward facing
        dummy("DUMMY_Q3S", "Q3s", EuQSeries, (105.0, 125.0), (18.0, 24.0), "4-6 years", Forward, 345.0, 295.0, &[UN_R129], R129_4_2),
        dummy("DUMMY_Q6", "Q6", EuQSeries, (125.0, 145.0), (24.0, 35.58), "6-10 years", Forward, 380.0, 335.0, &[UN_R129], R129_4_2),
        dummy("DUMMY_Q10", "Q10", EuQSeries, (145.0, 150.0), (35.58, 35.58), "10-12 years", Forward, 410.0, 370.0, &[UN_R129], R129_4_2),
        // US ATDs
        dummy("DUMMY_NEWBORN", "Newborn", UsCrabi, (40.0, 65.0), (3.0, 5.0), "0-6 months", Rearward, 175.0, 140.0, &[FMVSS_213, FMVSS_213A], FMVSS213_S7),
        dummy("DUMMY_CRABI_12MO", "CRABI_12MO", UsCrabi, (65.0, 75.0), (5.0, 10.0), "12 months", Rearward, 205.0, 160.0, &[FMVSS_213, FMVSS_213A], FMVSS213_S7),
        dummy("DUMMY_Q3S_SIDE", "Q3s", UsQ3sSideImpact, (87.0, 110.0), (13.6, 18.2), "3 years", Forward, 285.0, 250.0, &[FMVSS_213A], "FMVSS 213a S5.1.2"),
        dummy("DUMMY_HIII_3YO", "HIII_3YO", UsHiii, (85.0, 110.0), (10.0, 18.2), "3 years", Forward, 285.0, 250.0, &[FMVSS_213, FMVSS_213B], FMVSS213_S7),
        dummy("DUMMY_HIII_6YO", "HIII_6YO", UsHiii, (110.0, 125.0), (18.2, 22.7), "6 years", Forward, 320.0, 290.0, &[FMVSS_213, FMVSS_213B], FMVSS213_S7),
        dummy("DUMMY_HIII_10YO", "HIII_10YO", UsHiii, (125.0, 150.0), (22.7, 36.0), "10 years", Forward, 360.0, 330.0, &[FMVSS_213, FMVSS_213B], FMVSS213_S7),
    ]
}

fn builtin_regulations() -> Vec<RegulationRecord> {
    vec![
        RegulationRecord {
            id: "REF_UN_R129_REV4".to_string(),
            number: UN_R129.to_string(),
            version: "Rev.4".to_string(),
            effective_date: date(2018, 12, 29),
            compliance_date: date(2023, 3, 15),
            status: RegulationStatus::Active,
            scope: "40-150cm stature range, Q0-Q10 dummy series".to_string(),
            url: "https://unece.org/sites/default/files/2023-03/R129r4e.pdf".to_string(),
            advisories: Vec::new(),
        },
        RegulationRecord {
            id: "REF_FMVSS_213_CURRENT".to_string(),
            number: FMVSS_213.to_string(),
            version: "Current Standard".to_string(),
            effective_date: date(2002, 9, 1),
            compliance_date: date(2002, 9, 1),
            status: RegulationStatus::Active,
            scope: "Child restraint systems - frontal impact".to_string(),
            url: "https://www.ecfr.gov/current/title-49/chapter-V/subchapter-B/part-571/subpart-B/section-571.213".to_string(),
            advisories: Vec::new(),
        },
        RegulationRecord {
            id: "REF_FMVSS_213A".to_string(),
            number: FMVSS_213A.to_string(),
            version: "Final Rule".to_string(),
            effective_date: date(2022, 8, 1),
            compliance_date: date(2025, 6, 30),
            status: RegulationStatus::Future,
            scope: "Child restraint systems - side impact protection (≤40 lb / ≤1100mm)".to_string(),
            url: "https://www.ecfr.gov/current/title-49/chapter-V/subchapter-B/part-571/subpart-B/section-571.213a".to_string(),
            advisories: vec![
                "Side impact requirements apply to seats rated for children up to 18.2 kg (40 lb) or 1100 mm (43.3 in)".to_string(),
                "Side impact testing must use the Q3s dummy".to_string(),
            ],
        },
        RegulationRecord {
            id: "REF_FMVSS_213B".to_string(),
            number: FMVSS_213B.to_string(),
            version: "Final Rule".to_string(),
            effective_date: date(2024, 12, 5),
            compliance_date: date(2026, 12, 5),
            status: RegulationStatus::Future,
            scope: "Enhanced frontal impact requirements, weight rating changes".to_string(),
            url: "https://www.ecfr.gov/current/title-49/chapter-V/subchapter-B/part-571/subpart-B/section-571.213b".to_string(),
            advisories: vec![
                "Forward-facing minimum child weight: 12 kg (26.5 lb)".to_string(),
                "Booster seat minimum child weight: 18 kg (40 lb)".to_string(),
            ],
        },
    ]
}
