//! Anthropometric test device (crash-test dummy) profiles
//!
//! A profile records the stature and mass band a dummy represents, how it is
//! installed, the body widths used for seat geometry, and which regulations
//! call for it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::entities::band::Band;

/// Dummy family
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DummySeries {
    /// European Q-series (Q0 through Q10)
    EuQSeries,
    /// US CRABI infant dummies
    UsCrabi,
    /// US Hybrid III child dummies
    UsHiii,
    /// US Q3s used for side-impact testing
    UsQ3sSideImpact,
}

impl DummySeries {
    pub fn all() -> &'static [DummySeries] {
        &[
            DummySeries::EuQSeries,
            DummySeries::UsCrabi,
            DummySeries::UsHiii,
            DummySeries::UsQ3sSideImpact,
        ]
    }
}

impl std::fmt::Display for DummySeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DummySeries::EuQSeries => write!(f, "EU Q-series"),
            DummySeries::UsCrabi => write!(f, "US CRABI"),
            DummySeries::UsHiii => write!(f, "US Hybrid III"),
            DummySeries::UsQ3sSideImpact => write!(f, "US Q3s side impact"),
        }
    }
}

/// Direction the restraint is installed in the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallDirection {
    Rearward,
    Forward,
}

impl InstallDirection {
    /// Long form used in test configurations ("Rearward facing")
    pub fn facing_label(&self) -> &'static str {
        match self {
            InstallDirection::Rearward => "Rearward facing",
            InstallDirection::Forward => "Forward facing",
        }
    }
}

impl std::fmt::Display for InstallDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallDirection::Rearward => write!(f, "Rearward"),
            InstallDirection::Forward => write!(f, "Forward"),
        }
    }
}

/// A single catalog dummy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyProfile {
    /// Stable catalog key (DUMMY_...)
    pub id: String,

    /// Display code used in reports ("Q3s", "HIII_6YO")
    pub code: String,

    pub series: DummySeries,

    /// Stature band in centimeters
    pub height_cm: Band,

    /// Mass band in kilograms
    pub mass_kg: Band,

    /// Descriptive age label ("4-6 years")
    pub age_range: String,

    pub install_direction: InstallDirection,

    /// Hip breadth in millimeters
    pub hip_width_mm: f64,

    /// Shoulder breadth in millimeters
    pub shoulder_width_mm: f64,

    /// Regulation numbers (not versions) that call for this dummy
    #[serde(default)]
    pub applicable_regulations: Vec<String>,

    /// Governing clause citation
    pub clause: String,
}

impl DummyProfile {
    /// True when this dummy is listed for the given regulation number
    pub fn applies_to(&self, regulation_number: &str) -> bool {
        self.applicable_regulations
            .iter()
            .any(|r| r == regulation_number)
    }

    /// True when both the stature and mass bands overlap the given bands
    pub fn overlaps(&self, height_cm: &Band, mass_kg: &Band) -> bool {
        self.height_cm.overlaps(height_cm) && self.mass_kg.overlaps(mass_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q3s() -> DummyProfile {
        DummyProfile {
            id: "DUMMY_Q3S".to_string(),
            code: "Q3s".to_string(),
            series: DummySeries::EuQSeries,
            height_cm: Band::new(105.0, 125.0),
            mass_kg: Band::new(18.0, 24.0),
            age_range: "4-6 years".to_string(),
            install_direction: InstallDirection::Forward,
            hip_width_mm: 345.0,
            shoulder_width_mm: 295.0,
            applicable_regulations: vec!["UN R129".to_string()],
            clause: "UN R129 Annex 19 §4.2".to_string(),
        }
    }

    #[test]
    fn test_applies_to_matches_number_exactly() {
        let dummy = q3s();
        assert!(dummy.applies_to("UN R129"));
        assert!(!dummy.applies_to("UN R129 Rev.4"));
        assert!(!dummy.applies_to("un r129"));
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let dummy = q3s();
        assert!(dummy.overlaps(&Band::new(110.0, 120.0), &Band::new(19.0, 20.0)));
        // Height matches, mass does not
        assert!(!dummy.overlaps(&Band::new(110.0, 120.0), &Band::new(3.0, 10.0)));
        // Mass matches, height does not
        assert!(!dummy.overlaps(&Band::new(40.0, 60.0), &Band::new(19.0, 20.0)));
    }

    #[test]
    fn test_install_direction_serialization() {
        let yaml = serde_yml::to_string(&q3s()).unwrap();
        assert!(yaml.contains("install_direction: forward"));
        assert!(yaml.contains("series: eu_q_series"));

        let parsed: DummyProfile = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, q3s());
    }

    #[test]
    fn test_facing_label() {
        assert_eq!(InstallDirection::Rearward.facing_label(), "Rearward facing");
        assert_eq!(InstallDirection::Forward.to_string(), "Forward");
    }
}
