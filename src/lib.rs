//! crsc: child restraint system compliance toolkit
//!
//! Maps a product's stature and mass envelope onto crash-test dummies,
//! regulatory limits and test configurations for UN R129 and FMVSS 213,
//! and renders the result as an engineering report.

pub mod cli;
pub mod core;
pub mod engineering;
pub mod entities;
pub mod yaml;
