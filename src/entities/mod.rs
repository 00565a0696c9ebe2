//! Reference data types
//!
//! - [`DummyProfile`] - an anthropomorphic test device and the size class it represents
//! - [`RegulationRecord`] - a regulation version with its effective dates
//! - [`SafetyThreshold`] - a single regulatory injury or performance limit
//! - [`Band`] - a closed numeric interval used for heights and masses

pub mod band;
pub mod dummy;
pub mod regulation;
pub mod threshold;

pub use band::Band;
pub use dummy::{DummyProfile, DummySeries, InstallDirection};
pub use regulation::{RegulationRecord, RegulationStatus};
pub use threshold::{LimitKind, SafetyThreshold};
