//! Standard mapping - matched dummies projected per regulation

use serde::{Deserialize, Serialize};

use crate::entities::band::Band;
use crate::entities::dummy::{DummyProfile, InstallDirection};
use crate::entities::regulation::RegulationRecord;

/// One row of a regulation's dummy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyMapping {
    pub dummy_code: String,
    pub height_cm: Band,
    pub age_range: String,
    pub install_direction: InstallDirection,
    pub clause: String,
}

impl From<&DummyProfile> for DummyMapping {
    fn from(dummy: &DummyProfile) -> Self {
        Self {
            dummy_code: dummy.code.clone(),
            height_cm: dummy.height_cm,
            age_range: dummy.age_range.clone(),
            install_direction: dummy.install_direction,
            clause: dummy.clause.clone(),
        }
    }
}

/// Dummy table for a single selected regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMapping {
    /// "UN R129 Rev.4"
    pub regulation: String,
    pub regulation_number: String,
    pub dummies: Vec<DummyMapping>,
}

/// Build the mapping section for one regulation.
///
/// Only dummies that list this regulation's number are kept; the version
/// label plays no part in the filter.
pub fn map_standard(regulation: &RegulationRecord, matched: &[&DummyProfile]) -> StandardMapping {
    StandardMapping {
        regulation: regulation.label(),
        regulation_number: regulation.number.clone(),
        dummies: matched
            .iter()
            .filter(|d| d.applies_to(&regulation.number))
            .map(|d| DummyMapping::from(*d))
            .collect(),
    }
}

/// One section per selected regulation, in selection order. Each section is
/// filtered independently from the matched set.
pub fn map_standards(selected: &[RegulationRecord], matched: &[&DummyProfile]) -> Vec<StandardMapping> {
    selected
        .iter()
        .map(|reg| map_standard(reg, matched))
        .collect()
}
