//! Product envelope - the stature and mass range a restraint is designed for

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::band::Band;

#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum EnvelopeError {
    #[error("minimum {axis} ({min}) is greater than maximum {axis} ({max})")]
    #[diagnostic(code(crsc::envelope::inverted), help("Swap the values or check the units (cm / kg)"))]
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{axis} bounds must be finite numbers")]
    #[diagnostic(code(crsc::envelope::not_finite))]
    NotFinite { axis: &'static str },

    #[error("{axis} bounds cannot be negative ({value})")]
    #[diagnostic(code(crsc::envelope::negative))]
    Negative { axis: &'static str, value: f64 },
}

/// Height band in cm and mass band in kg
///
/// Engine functions assume `min <= max` on both axes. [`Envelope::new`] is the
/// checked constructor for caller input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub height_cm: Band,
    pub mass_kg: Band,
}

impl Envelope {
    pub fn new(
        min_height_cm: f64,
        max_height_cm: f64,
        min_weight_kg: f64,
        max_weight_kg: f64,
    ) -> Result<Self, EnvelopeError> {
        let height_cm = check_band("height", min_height_cm, max_height_cm)?;
        let mass_kg = check_band("weight", min_weight_kg, max_weight_kg)?;
        Ok(Self { height_cm, mass_kg })
    }

    pub fn min_height(&self) -> f64 {
        self.height_cm.min
    }

    pub fn max_height(&self) -> f64 {
        self.height_cm.max
    }
}

fn check_band(axis: &'static str, min: f64, max: f64) -> Result<Band, EnvelopeError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(EnvelopeError::NotFinite { axis });
    }
    if min < 0.0 {
        return Err(EnvelopeError::Negative { axis, value: min });
    }
    if min > max {
        return Err(EnvelopeError::Inverted { axis, min, max });
    }
    Ok(Band::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_envelope() {
        let env = Envelope::new(40.0, 150.0, 3.0, 36.0).unwrap();
        assert_eq!(env.min_height(), 40.0);
        assert_eq!(env.max_height(), 150.0);
        assert_eq!(env.mass_kg, Band::new(3.0, 36.0));
    }

    #[test]
    fn test_degenerate_band_is_allowed() {
        assert!(Envelope::new(105.0, 105.0, 18.0, 18.0).is_ok());
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        assert_eq!(
            Envelope::new(150.0, 40.0, 3.0, 36.0).unwrap_err(),
            EnvelopeError::Inverted {
                axis: "height",
                min: 150.0,
                max: 40.0
            }
        );
        assert!(matches!(
            Envelope::new(40.0, 150.0, 36.0, 3.0).unwrap_err(),
            EnvelopeError::Inverted { axis: "weight", .. }
        ));
    }

    #[test]
    fn test_non_finite_and_negative() {
        assert!(matches!(
            Envelope::new(f64::NAN, 150.0, 3.0, 36.0).unwrap_err(),
            EnvelopeError::NotFinite { axis: "height" }
        ));
        assert!(matches!(
            Envelope::new(40.0, 150.0, -1.0, 36.0).unwrap_err(),
            EnvelopeError::Negative { axis: "weight", .. }
        ));
    }
}
