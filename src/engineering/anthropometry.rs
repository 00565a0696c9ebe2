//! Seat geometry derived from the matched dummies' body widths

use serde::{Deserialize, Serialize};

use crate::entities::dummy::DummyProfile;

pub const ANTHROPOMETRY_SOURCE: &str = "GPS-028 Anthropometry 11-28-2018";

/// Hip breadth range used when no dummy matched (mm)
pub const FALLBACK_HIP_MM: (f64, f64) = (180.0, 410.0);
/// Shoulder breadth range used when no dummy matched (mm)
pub const FALLBACK_SHOULDER_MM: (f64, f64) = (145.0, 370.0);

const SEAT_WIDTH_MIN_FACTOR: f64 = 1.1;
const SEAT_WIDTH_IDEAL_FACTOR: f64 = 1.15;
const SEAT_WIDTH_MAX_FACTOR: f64 = 1.25;
const BELT_HEIGHT_MIN_FACTOR: f64 = 0.6;
const BELT_HEIGHT_MAX_FACTOR: f64 = 0.7;

/// Derived design parameters, all in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropometryParams {
    pub seat_width_min_mm: f64,
    pub seat_width_ideal_mm: f64,
    pub seat_width_max_mm: f64,
    pub shoulder_belt_height_min_mm: f64,
    pub shoulder_belt_height_max_mm: f64,
    pub data_source: String,
}

/// Derive seat width and belt height bands from the dummies' extremes
pub fn derive_anthropometry(matched: &[&DummyProfile]) -> AnthropometryParams {
    let (min_hip, max_hip) =
        extremes(matched.iter().map(|d| d.hip_width_mm)).unwrap_or(FALLBACK_HIP_MM);
    let (min_shoulder, max_shoulder) =
        extremes(matched.iter().map(|d| d.shoulder_width_mm)).unwrap_or(FALLBACK_SHOULDER_MM);

    AnthropometryParams {
        seat_width_min_mm: min_hip * SEAT_WIDTH_MIN_FACTOR,
        seat_width_ideal_mm: (min_hip + max_hip) / 2.0 * SEAT_WIDTH_IDEAL_FACTOR,
        seat_width_max_mm: max_hip * SEAT_WIDTH_MAX_FACTOR,
        shoulder_belt_height_min_mm: min_shoulder * BELT_HEIGHT_MIN_FACTOR,
        shoulder_belt_height_max_mm: max_shoulder * BELT_HEIGHT_MAX_FACTOR,
        data_source: ANTHROPOMETRY_SOURCE.to_string(),
    }
}

fn extremes(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ReferenceCatalog;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fallback_when_nothing_matched() {
        let params = derive_anthropometry(&[]);
        assert!(close(params.seat_width_min_mm, 198.0));
        assert!(close(params.seat_width_ideal_mm, 339.25));
        assert!(close(params.seat_width_max_mm, 512.5));
        assert!(close(params.shoulder_belt_height_min_mm, 87.0));
        assert!(close(params.shoulder_belt_height_max_mm, 259.0));
        assert_eq!(params.data_source, ANTHROPOMETRY_SOURCE);
    }

    #[test]
    fn test_single_dummy() {
        let catalog = ReferenceCatalog::builtin();
        let q3s = catalog.dummy("DUMMY_Q3S").unwrap();
        let params = derive_anthropometry(&[q3s]);

        // hip 345, shoulder 295
        assert!(close(params.seat_width_min_mm, 379.5));
        assert!(close(params.seat_width_ideal_mm, 396.75));
        assert!(close(params.seat_width_max_mm, 431.25));
        assert!(close(params.shoulder_belt_height_min_mm, 177.0));
        assert!(close(params.shoulder_belt_height_max_mm, 206.5));
    }

    #[test]
    fn test_whole_catalog_uses_extremes() {
        let catalog = ReferenceCatalog::builtin();
        let all: Vec<&DummyProfile> = catalog.dummies().iter().collect();
        let params = derive_anthropometry(&all);

        // Newborn hip 175 / shoulder 140, Q10 hip 410 / shoulder 370
        assert!(close(params.seat_width_min_mm, 175.0 * 1.1));
        assert!(close(params.seat_width_max_mm, 410.0 * 1.25));
        assert!(close(params.shoulder_belt_height_min_mm, 140.0 * 0.6));
        assert!(close(params.shoulder_belt_height_max_mm, 370.0 * 0.7));
    }
}
