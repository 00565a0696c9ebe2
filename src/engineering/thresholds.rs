//! Threshold catalog - regulatory limits keyed by regulation number

use serde::{Deserialize, Serialize};

use crate::entities::regulation::{RegulationRecord, FMVSS_213, FMVSS_213A, FMVSS_213B, UN_R129};
use crate::entities::threshold::SafetyThreshold;

/// Threshold table for one selected regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyThresholdSection {
    /// "FMVSS 213 Current Standard"
    pub regulation: String,
    pub regulation_number: String,
    pub thresholds: Vec<SafetyThreshold>,
}

/// Fixed threshold list for a regulation number. Unknown numbers give an
/// empty list so unseeded regulations pass through harmlessly.
pub fn thresholds_for(regulation_number: &str) -> Vec<SafetyThreshold> {
    match regulation_number {
        UN_R129 => vec![
            SafetyThreshold::new("Head injury criterion", "HIC15/HIC36", "Q0-Q1.5 / Q3-Q10", 390.0, "-", "UN R129 §7.1.2"),
            SafetyThreshold::new("Resultant chest acceleration", "ChestAcc3ms", "Q0-Q1.5 / Q3-Q10", 60.0, "g", "UN R129 §7.1.3"),
            SafetyThreshold::new("Head excursion", "HeadExcursion", "Q0-Q10", 550.0, "mm", "UN R129 §7.1.5"),
        ],
        FMVSS_213 => vec![
            SafetyThreshold::new("Head Injury Criterion", "HIC", "All ATDs", 1000.0, "-", "FMVSS 213 S5.1.2"),
            SafetyThreshold::new("Chest Acceleration", "ChestAcc3ms", "All ATDs", 60.0, "g", "FMVSS 213 S5.1.2"),
            SafetyThreshold::new("Head Excursion", "HeadExcursion", "Forward Facing", 813.0, "mm", "FMVSS 213 S5.1.3"),
        ],
        FMVSS_213A => vec![
            SafetyThreshold::new("Head Injury Criterion", "HIC570", "Q3s", 570.0, "-", "FMVSS 213a S5.1.2"),
            SafetyThreshold::new("Chest Deflection", "ChestDeflection", "Q3s", 23.0, "mm", "FMVSS 213a S5.1.2"),
        ],
        FMVSS_213B => vec![
            SafetyThreshold::new("Head Injury Criterion", "HIC", "All ATDs", 1000.0, "-", "FMVSS 213b S5.1.2"),
            SafetyThreshold::new("Minimum Weight", "Weight", "Forward Facing", 12.0, "kg", "FMVSS 213b S5.3.1"),
            SafetyThreshold::new("Minimum Weight", "Weight", "Booster Seats", 18.0, "kg", "FMVSS 213b S5.3.1"),
        ],
        other => {
            tracing::debug!(regulation = other, "no thresholds seeded");
            Vec::new()
        }
    }
}

/// One section per selected regulation, each with its own freshly built list
pub fn threshold_sections(selected: &[RegulationRecord]) -> Vec<SafetyThresholdSection> {
    selected
        .iter()
        .map(|reg| SafetyThresholdSection {
            regulation: reg.label(),
            regulation_number: reg.number.clone(),
            thresholds: thresholds_for(&reg.number),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ReferenceCatalog;
    use crate::entities::threshold::LimitKind;

    #[test]
    fn test_seeded_families() {
        assert_eq!(thresholds_for(UN_R129).len(), 3);
        assert_eq!(thresholds_for(FMVSS_213).len(), 3);
        assert_eq!(thresholds_for(FMVSS_213A).len(), 2);
        assert_eq!(thresholds_for(FMVSS_213B).len(), 3);

        let r129 = thresholds_for(UN_R129);
        assert_eq!(r129[0].parameter, "HIC15/HIC36");
        assert_eq!(r129[0].limit, 390.0);
        assert_eq!(r129[2].unit, "mm");
    }

    #[test]
    fn test_unknown_regulation_is_empty() {
        assert!(thresholds_for("ECE R44").is_empty());
        assert!(thresholds_for("").is_empty());
        // Lookup is by number, not label
        assert!(thresholds_for("UN R129 Rev.4").is_empty());
    }

    #[test]
    fn test_weight_floors_are_minimums() {
        let floors: Vec<_> = thresholds_for(FMVSS_213B)
            .into_iter()
            .filter(|t| t.kind() == LimitKind::Minimum)
            .collect();
        assert_eq!(floors.len(), 2);
        assert_eq!(floors[0].limit, 12.0);
        assert_eq!(floors[1].limit, 18.0);
    }

    #[test]
    fn test_sections_never_share_values() {
        let catalog = ReferenceCatalog::builtin();
        let selected: Vec<RegulationRecord> = catalog.regulations().to_vec();
        let sections = threshold_sections(&selected);
        assert_eq!(sections.len(), 4);

        for (i, a) in sections.iter().enumerate() {
            for b in sections.iter().skip(i + 1) {
                for t in &a.thresholds {
                    assert!(
                        !b.thresholds.contains(t),
                        "{} and {} share {:?}",
                        a.regulation,
                        b.regulation,
                        t
                    );
                }
            }
        }
    }

    #[test]
    fn test_clauses_cite_own_regulation() {
        for section in threshold_sections(ReferenceCatalog::builtin().regulations()) {
            for t in &section.thresholds {
                assert!(t.clause.starts_with(&section.regulation_number));
            }
        }
    }
}
