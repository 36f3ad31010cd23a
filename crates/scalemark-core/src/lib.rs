//! scalemark-core — score scaling for standardized tests.
//!
//! Converts raw section scores into scaled scores through audited
//! calibration tables, aggregates them into a composite with a rounded
//! percentage, and classifies the composite into a proficiency band.
//! Calibration data is validated up front with every defect reported at
//! once; after that gate, scoring an attempt can never fail.

pub mod aggregate;
pub mod band;
pub mod convert;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod table;
pub mod validate;
