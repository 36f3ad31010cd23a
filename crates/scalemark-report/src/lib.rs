//! scalemark-report — rendered output for scores and audits.
//!
//! Turns scored attempts into self-contained HTML pages and calibration
//! audits into markdown or JSON for CI pipelines.

pub mod audit;
pub mod html;

pub use audit::{generate_audit_json, generate_audit_markdown, write_audit_json};
pub use html::{generate_html, write_html_report};
