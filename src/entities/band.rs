//! Closed numeric bands used for stature and mass ranges

use serde::{Deserialize, Serialize};

/// A `[min, max]` range, closed on both ends
///
/// Catalog bands share endpoints with their neighbours (Q3 ends at 105 cm where
/// Q3s begins), so overlap checks are inclusive on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when the two bands share at least one point
    pub fn overlaps(&self, other: &Band) -> bool {
        self.max >= other.min && self.min <= other.max
    }

    /// True when `value` lies inside the band (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both bounds finite and ordered
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Format as `min-max<unit>`, e.g. `40-150cm`
    pub fn display_with_unit(&self, unit: &str) -> String {
        format!("{}-{}{}", self.min, self.max, unit)
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_inclusive_at_shared_endpoint() {
        let q3 = Band::new(87.0, 105.0);
        let q3s = Band::new(105.0, 125.0);
        assert!(q3.overlaps(&q3s));
        assert!(q3s.overlaps(&q3));
    }

    #[test]
    fn test_disjoint_bands_do_not_overlap() {
        let a = Band::new(40.0, 50.0);
        let b = Band::new(50.5, 60.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_point_band_overlaps_containing_range() {
        let q10_mass = Band::new(35.58, 35.58);
        assert!(q10_mass.overlaps(&Band::new(3.0, 36.0)));
        assert!(!q10_mass.overlaps(&Band::new(3.0, 35.0)));
    }

    #[test]
    fn test_well_formed() {
        assert!(Band::new(1.0, 1.0).is_well_formed());
        assert!(!Band::new(2.0, 1.0).is_well_formed());
        assert!(!Band::new(f64::NAN, 1.0).is_well_formed());
    }

    #[test]
    fn test_display() {
        assert_eq!(Band::new(40.0, 150.0).to_string(), "40-150");
        assert_eq!(Band::new(3.47, 5.53).display_with_unit("kg"), "3.47-5.53kg");
    }
}
