//! scalemark-forms — calibration form files, auditing, and diffing.
//!
//! A form bundles the per-section calibration tables and the band scale for
//! one test edition. This crate parses form TOML, gates engine construction
//! behind a whole-form audit, keeps a registry of loaded forms, and diffs
//! form revisions for recalibration review. A complete reference form is
//! embedded so the engine works without any external files.

pub mod audit;
pub mod diff;
pub mod file;
pub mod reference;
pub mod registry;

pub use audit::{audit_form, build_engine, FormAudit, FormInvalid};
pub use diff::{diff_forms, FormDiff};
pub use file::{load_form_directory, parse_form, parse_form_str, FormSection, TestForm};
pub use reference::{reference_form, REFERENCE_FORM_ID};
pub use registry::FormRegistry;
