//! Regulatory safety thresholds (injury criteria, excursions, weight floors)

use serde::{Deserialize, Serialize};

/// Parameter codes that express a floor rather than a ceiling
const MINIMUM_PARAMETERS: &[&str] = &["Weight"];

/// Whether a threshold caps or floors the measured value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    Maximum,
    Minimum,
}

impl LimitKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            LimitKind::Maximum => "≤",
            LimitKind::Minimum => "≥",
        }
    }
}

/// A single numeric limit from a regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyThreshold {
    /// Human readable test item ("Head Injury Criterion")
    pub test_item: String,

    /// Parameter code ("HIC15/HIC36", "ChestAcc3ms", "Weight")
    pub parameter: String,

    /// Dummies the limit applies to
    pub applicable_dummy: String,

    pub limit: f64,

    pub unit: String,

    /// Clause citation
    pub clause: String,
}

impl SafetyThreshold {
    pub fn new(
        test_item: impl Into<String>,
        parameter: impl Into<String>,
        applicable_dummy: impl Into<String>,
        limit: f64,
        unit: impl Into<String>,
        clause: impl Into<String>,
    ) -> Self {
        Self {
            test_item: test_item.into(),
            parameter: parameter.into(),
            applicable_dummy: applicable_dummy.into(),
            limit,
            unit: unit.into(),
            clause: clause.into(),
        }
    }

    /// Direction of the limit, implied by the parameter code
    pub fn kind(&self) -> LimitKind {
        if MINIMUM_PARAMETERS.contains(&self.parameter.as_str()) {
            LimitKind::Minimum
        } else {
            LimitKind::Maximum
        }
    }

    /// "≤390" or "≥12"
    pub fn limit_display(&self) -> String {
        format!("{}{}", self.kind().symbol(), self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_kind_from_parameter() {
        let hic = SafetyThreshold::new("Head Injury Criterion", "HIC", "All ATDs", 1000.0, "-", "FMVSS 213 S5.1.2");
        assert_eq!(hic.kind(), LimitKind::Maximum);
        assert_eq!(hic.limit_display(), "≤1000");

        let floor = SafetyThreshold::new("Minimum Weight", "Weight", "Booster Seats", 18.0, "kg", "FMVSS 213b S5.3.1");
        assert_eq!(floor.kind(), LimitKind::Minimum);
        assert_eq!(floor.limit_display(), "≥18");
    }
}
