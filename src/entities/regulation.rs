//! Regulation records (UN R129, FMVSS 213 family)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// UN Regulation No. 129 (i-Size)
pub const UN_R129: &str = "UN R129";
/// FMVSS 213 frontal impact
pub const FMVSS_213: &str = "FMVSS 213";
/// FMVSS 213a side impact
pub const FMVSS_213A: &str = "FMVSS 213a";
/// FMVSS 213b enhanced frontal requirements
pub const FMVSS_213B: &str = "FMVSS 213b";

/// Date format used in report labels ("29 December 2018")
pub const LABEL_DATE_FORMAT: &str = "%d %B %Y";

/// Lifecycle status of a regulation version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegulationStatus {
    /// In force today
    Active,
    /// Published, mandatory from the compliance date
    Future,
    /// Proposed rule
    Draft,
    /// Superseded
    Obsolete,
}

impl std::fmt::Display for RegulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegulationStatus::Active => write!(f, "active"),
            RegulationStatus::Future => write!(f, "future"),
            RegulationStatus::Draft => write!(f, "draft"),
            RegulationStatus::Obsolete => write!(f, "obsolete"),
        }
    }
}

/// One version of a regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationRecord {
    /// Stable catalog key (REF_...)
    pub id: String,

    /// Regulation number, e.g. "FMVSS 213a"
    pub number: String,

    /// Version label, e.g. "Rev.4" or "Final Rule"
    pub version: String,

    pub effective_date: NaiveDate,

    /// Date adoption becomes mandatory
    pub compliance_date: NaiveDate,

    pub status: RegulationStatus,

    pub scope: String,

    pub url: String,

    /// Engineering advisories carried into the report
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

impl RegulationRecord {
    /// "UN R129 Rev.4"
    pub fn label(&self) -> String {
        format!("{} {}", self.number, self.version)
    }

    /// "UN R129 Rev.4 (Effective: 29 December 2018)"
    pub fn annotated_label(&self) -> String {
        format!(
            "{} (Effective: {})",
            self.label(),
            self.effective_date.format(LABEL_DATE_FORMAT)
        )
    }

    pub fn is_future(&self) -> bool {
        self.status == RegulationStatus::Future
    }

    /// Whether adoption is mandatory on the given date
    pub fn is_mandatory_on(&self, date: NaiveDate) -> bool {
        match self.status {
            RegulationStatus::Active => true,
            RegulationStatus::Future => date >= self.compliance_date,
            RegulationStatus::Draft | RegulationStatus::Obsolete => false,
        }
    }

    /// True when `selector` names this record, either by identifier or by
    /// regulation number. Case and whitespace are ignored so `fmvss213a`
    /// selects "FMVSS 213a".
    pub fn matches_selector(&self, selector: &str) -> bool {
        let wanted = normalize_selector(selector);
        !wanted.is_empty()
            && (normalize_selector(&self.id) == wanted || normalize_selector(&self.number) == wanted)
    }
}

fn normalize_selector(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r129() -> RegulationRecord {
        RegulationRecord {
            id: "REF_UN_R129_REV4".to_string(),
            number: UN_R129.to_string(),
            version: "Rev.4".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2018, 12, 29).unwrap(),
            compliance_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
            status: RegulationStatus::Active,
            scope: "40-150cm stature range".to_string(),
            url: "https://unece.org".to_string(),
            advisories: Vec::new(),
        }
    }

    #[test]
    fn test_labels() {
        let reg = r129();
        assert_eq!(reg.label(), "UN R129 Rev.4");
        assert_eq!(
            reg.annotated_label(),
            "UN R129 Rev.4 (Effective: 29 December 2018)"
        );
    }

    #[test]
    fn test_selector_matching() {
        let reg = r129();
        assert!(reg.matches_selector("UN R129"));
        assert!(reg.matches_selector("unr129"));
        assert!(reg.matches_selector("ref_un_r129_rev4"));
        assert!(!reg.matches_selector("r129"));
        assert!(!reg.matches_selector(""));
    }

    #[test]
    fn test_mandatory_dates() {
        let mut reg = r129();
        let before = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(reg.is_mandatory_on(before));

        reg.status = RegulationStatus::Future;
        assert!(!reg.is_mandatory_on(before));
        assert!(reg.is_mandatory_on(reg.compliance_date));
    }

    #[test]
    fn test_status_serialization() {
        let yaml = serde_yml::to_string(&r129()).unwrap();
        assert!(yaml.contains("status: active"));
        assert!(yaml.contains("effective_date:"));
        assert!(!yaml.contains("advisories"));

        let parsed: RegulationRecord = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.effective_date, NaiveDate::from_ymd_opt(2018, 12, 29).unwrap());
        assert_eq!(parsed, r129());
    }
}
