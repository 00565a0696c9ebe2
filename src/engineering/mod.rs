//! Regulatory mapping and test-matrix engine
//!
//! Every function here is pure: given a catalog, an envelope and a regulation
//! selection it produces values and touches nothing shared.
//!
//! - [`match_dummies`] - dummies overlapping the envelope
//! - [`map_standards`] - per-regulation dummy tables
//! - [`thresholds_for`] - regulatory limits by regulation number
//! - [`build_test_matrix`] - crash-test configurations
//! - [`derive_anthropometry`] - seat width and belt height bands
//! - [`generate`] - all of the above composed into an [`EngineeringOutput`]

pub mod anthropometry;
pub mod envelope;
pub mod mapping;
pub mod matcher;
pub mod matrix;
pub mod output;
pub mod steps;
pub mod thresholds;

pub use anthropometry::{derive_anthropometry, AnthropometryParams};
pub use envelope::{Envelope, EnvelopeError};
pub use mapping::{map_standard, map_standards, DummyMapping, StandardMapping};
pub use matcher::match_dummies;
pub use matrix::{build_test_matrix, PulseType, TestConfiguration};
pub use output::{generate, generate_at, EngineeringOutput};
pub use steps::{age_range_label, DummyRegion};
pub use thresholds::{threshold_sections, thresholds_for, SafetyThresholdSection};
