//! Ordered boundary tables for the height-driven step functions
//!
//! Each table is evaluated low to high and the first row whose boundary
//! accepts the input wins. Keeping the rows as data makes the boundary values
//! directly testable.

use serde::{Deserialize, Serialize};

/// How a row boundary compares against the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `value <= boundary`
    Inclusive,
    /// `value < boundary`
    Exclusive,
}

#[derive(Debug, Clone, Copy)]
pub struct StepTable<T: 'static> {
    edge: Edge,
    rows: &'static [(f64, T)],
    otherwise: T,
}

impl<T: Copy + 'static> StepTable<T> {
    pub const fn new(edge: Edge, rows: &'static [(f64, T)], otherwise: T) -> Self {
        Self {
            edge,
            rows,
            otherwise,
        }
    }

    pub fn lookup(&self, value: f64) -> T {
        self.rows
            .iter()
            .find(|(boundary, _)| match self.edge {
                Edge::Inclusive => value <= *boundary,
                Edge::Exclusive => value < *boundary,
            })
            .map(|(_, result)| *result)
            .unwrap_or(self.otherwise)
    }

    pub fn rows(&self) -> &'static [(f64, T)] {
        self.rows
    }

    pub fn otherwise(&self) -> T {
        self.otherwise
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }
}

/// EU Q-series dummy by stature (cm)
pub const EU_DUMMY_BY_HEIGHT: StepTable<&str> = StepTable::new(
    Edge::Inclusive,
    &[
        (50.0, "Q0"),
        (60.0, "Q0+"),
        (75.0, "Q1"),
        (87.0, "Q1.5"),
        (105.0, "Q3"),
        (125.0, "Q3s"),
        (145.0, "Q6"),
    ],
    "Q10",
);

/// US ATD by stature (cm)
pub const US_DUMMY_BY_HEIGHT: StepTable<&str> = StepTable::new(
    Edge::Inclusive,
    &[
        (65.0, "Newborn"),
        (75.0, "CRABI_12MO"),
        (110.0, "HIII_3YO"),
        (125.0, "HIII_6YO"),
    ],
    "HIII_10YO",
);

/// Minimum child mass (kg) expected at a given stature (cm)
pub const MIN_MASS_BY_HEIGHT: StepTable<f64> = StepTable::new(
    Edge::Exclusive,
    &[(60.0, 3.0), (75.0, 5.0), (110.0, 10.0), (125.0, 18.2)],
    22.7,
);

/// Youngest age (years) for the lower stature bound
pub const MIN_AGE_BY_HEIGHT: StepTable<u8> = StepTable::new(
    Edge::Exclusive,
    &[
        (60.0, 0),
        (75.0, 1),
        (87.0, 2),
        (105.0, 3),
        (125.0, 4),
        (145.0, 6),
    ],
    10,
);

/// Oldest age (years) for the upper stature bound
pub const MAX_AGE_BY_HEIGHT: StepTable<u8> = StepTable::new(
    Edge::Inclusive,
    &[
        (60.0, 1),
        (75.0, 2),
        (87.0, 3),
        (105.0, 4),
        (125.0, 6),
        (145.0, 10),
    ],
    12,
);

/// Dummy programme used by a test matrix branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DummyRegion {
    Eu,
    Us,
}

impl DummyRegion {
    pub fn table(&self) -> &'static StepTable<&'static str> {
        match self {
            DummyRegion::Eu => &EU_DUMMY_BY_HEIGHT,
            DummyRegion::Us => &US_DUMMY_BY_HEIGHT,
        }
    }

    /// Dummy code for a stature in cm
    pub fn dummy_code(&self, height_cm: f64) -> &'static str {
        self.table().lookup(height_cm)
    }
}

/// "0-12 years"
pub fn age_range_label(min_height_cm: f64, max_height_cm: f64) -> String {
    format!(
        "{}-{} years",
        MIN_AGE_BY_HEIGHT.lookup(min_height_cm),
        MAX_AGE_BY_HEIGHT.lookup(max_height_cm)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eu_dummy_boundaries() {
        let cases = [
            (40.0, "Q0"),
            (50.0, "Q0"),
            (50.1, "Q0+"),
            (60.0, "Q0+"),
            (60.5, "Q1"),
            (75.0, "Q1"),
            (76.0, "Q1.5"),
            (87.0, "Q1.5"),
            (87.1, "Q3"),
            (105.0, "Q3"),
            (105.1, "Q3s"),
            (125.0, "Q3s"),
            (125.1, "Q6"),
            (145.0, "Q6"),
            (145.1, "Q10"),
            (150.0, "Q10"),
        ];
        for (height, expected) in cases {
            assert_eq!(DummyRegion::Eu.dummy_code(height), expected, "height {height}");
        }
    }

    #[test]
    fn test_us_dummy_boundaries() {
        let cases = [
            (40.0, "Newborn"),
            (65.0, "Newborn"),
            (65.5, "CRABI_12MO"),
            (75.0, "CRABI_12MO"),
            (75.5, "HIII_3YO"),
            (110.0, "HIII_3YO"),
            (110.5, "HIII_6YO"),
            (125.0, "HIII_6YO"),
            (125.5, "HIII_10YO"),
        ];
        for (height, expected) in cases {
            assert_eq!(DummyRegion::Us.dummy_code(height), expected, "height {height}");
        }
    }

    #[test]
    fn test_min_mass_uses_exclusive_edges() {
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(59.9), 3.0);
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(60.0), 5.0);
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(75.0), 10.0);
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(109.9), 10.0);
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(110.0), 18.2);
        assert_eq!(MIN_MASS_BY_HEIGHT.lookup(125.0), 22.7);
    }

    #[test]
    fn test_age_range_label() {
        assert_eq!(age_range_label(40.0, 150.0), "0-12 years");
        assert_eq!(age_range_label(105.0, 125.0), "4-6 years");
        assert_eq!(age_range_label(104.9, 105.0), "3-4 years");
        assert_eq!(age_range_label(145.0, 145.0), "10-10 years");
    }

    #[test]
    fn test_rows_are_ascending() {
        for table in [&EU_DUMMY_BY_HEIGHT, &US_DUMMY_BY_HEIGHT] {
            assert!(table.rows().windows(2).all(|w| w[0].0 < w[1].0));
        }
        assert!(MIN_MASS_BY_HEIGHT.rows().windows(2).all(|w| w[0].0 < w[1].0));
    }
}
