//! Whole-form auditing and the engine gate.
//!
//! A form must come through [`build_engine`] before anything scores against
//! it. The gate accumulates every defect across every table, the band scale,
//! and the form structure itself, so a calibration editor sees the full
//! picture in one pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scalemark_core::band::BandScale;
use scalemark_core::convert::ScoreConverter;
use scalemark_core::engine::ScoringEngine;
use scalemark_core::table::CalibrationTable;
use scalemark_core::validate::{audit_bands, audit_table, BandAudit, TableAudit};

use crate::file::TestForm;

/// A form-level defect, beyond any single table or band.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormIssue {
    /// The form defines no sections at all.
    #[error("form has no sections")]
    NoSections,

    /// Two sections share the same id.
    #[error("section '{id}' appears more than once")]
    DuplicateSection { id: String },

    /// Engine assembly failed for a reason the data audits did not cover.
    #[error("engine assembly failed: {detail}")]
    Assembly { detail: String },
}

/// Audit of one section's table within a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAudit {
    pub section: String,
    pub audit: TableAudit,
}

/// The full validation picture for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormAudit {
    pub form_id: String,
    pub form: Vec<FormIssue>,
    pub sections: Vec<SectionAudit>,
    pub bands: BandAudit,
}

impl FormAudit {
    pub fn is_valid(&self) -> bool {
        self.form.is_empty()
            && self.bands.is_valid()
            && self.sections.iter().all(|s| s.audit.is_valid())
    }

    pub fn issue_count(&self) -> usize {
        self.form.len()
            + self.bands.issues.len()
            + self.sections.iter().map(|s| s.audit.issues.len()).sum::<usize>()
    }

    /// One human-readable line per issue, prefixed with its location.
    pub fn issue_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for issue in &self.form {
            lines.push(format!("[form] {issue}"));
        }
        for section in &self.sections {
            for issue in &section.audit.issues {
                lines.push(format!("[{}] {}", section.section, issue));
            }
        }
        for issue in &self.bands.issues {
            lines.push(format!("[bands] {issue}"));
        }
        lines
    }
}

/// Audits a form without building anything.
pub fn audit_form(form: &TestForm) -> FormAudit {
    let mut form_issues = Vec::new();
    if form.sections.is_empty() {
        form_issues.push(FormIssue::NoSections);
    }
    for (index, section) in form.sections.iter().enumerate() {
        if form.sections[..index]
            .iter()
            .any(|other| other.id == section.id)
        {
            form_issues.push(FormIssue::DuplicateSection {
                id: section.id.clone(),
            });
        }
    }

    FormAudit {
        form_id: form.id.clone(),
        form: form_issues,
        sections: form
            .sections
            .iter()
            .map(|section| SectionAudit {
                section: section.id.clone(),
                audit: audit_table(section.spec, &section.entries),
            })
            .collect(),
        bands: audit_bands(&form.bands, form.max_composite()),
    }
}

/// Fatal: a form failed its audit; carries the complete audit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form '{}' rejected: {} issue(s)", .audit.form_id, .audit.issue_count())]
pub struct FormInvalid {
    pub audit: FormAudit,
}

/// The startup gate: turns a clean form into a ready scoring engine.
///
/// Every table, the band scale, and the form structure are checked in the
/// same pass; an invalid form comes back with the complete audit rather
/// than the first defect.
pub fn build_engine(form: &TestForm) -> Result<ScoringEngine, FormInvalid> {
    let mut audit = FormAudit {
        form_id: form.id.clone(),
        form: Vec::new(),
        sections: Vec::new(),
        bands: BandAudit::default(),
    };
    let mut converters = Vec::new();

    if form.sections.is_empty() {
        audit.form.push(FormIssue::NoSections);
    }
    for (index, section) in form.sections.iter().enumerate() {
        if form.sections[..index]
            .iter()
            .any(|other| other.id == section.id)
        {
            audit.form.push(FormIssue::DuplicateSection {
                id: section.id.clone(),
            });
        }
        let table_audit = match CalibrationTable::new(section.spec, &section.entries) {
            Ok(table) => {
                converters.push(ScoreConverter::new(section.id.clone(), table));
                TableAudit::default()
            }
            Err(err) => TableAudit { issues: err.issues },
        };
        audit.sections.push(SectionAudit {
            section: section.id.clone(),
            audit: table_audit,
        });
    }

    let scale = match BandScale::new(form.bands.clone(), form.max_composite()) {
        Ok(scale) => Some(scale),
        Err(err) => {
            audit.bands = BandAudit { issues: err.issues };
            None
        }
    };

    match scale {
        Some(scale) if audit.is_valid() => match ScoringEngine::new(converters, scale) {
            Ok(engine) => Ok(engine),
            Err(err) => {
                audit.form.push(FormIssue::Assembly {
                    detail: err.to_string(),
                });
                Err(FormInvalid { audit })
            }
        },
        _ => Err(FormInvalid { audit }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::parse_form_str;
    use scalemark_core::model::Attempt;
    use std::path::PathBuf;

    const CLEAN_FORM: &str = r#"
[form]
id = "mini"
name = "Mini"

[[sections]]
id = "listening"
max_raw = 2
max_scaled = 20
entries = [[0, 0], [1, 10], [2, 20]]

[[sections]]
id = "reading"
max_raw = 2
max_scaled = 20
entries = [[0, 0], [1, 10], [2, 20]]

[[bands]]
threshold = 30
label = "High"

[[bands]]
threshold = 0
label = "Low"
"#;

    const BROKEN_FORM: &str = r#"
[form]
id = "broken"
name = "Broken"

[[sections]]
id = "listening"
max_raw = 2
max_scaled = 20
entries = [[0, 10], [2, 5]]

[[sections]]
id = "listening"
max_raw = 2
max_scaled = 20
entries = [[0, 0], [1, 10], [2, 20]]

[[bands]]
threshold = 990
label = "Impossible"

[[bands]]
threshold = 30
label = "Low"
"#;

    fn form(toml: &str) -> TestForm {
        parse_form_str(toml, &PathBuf::from("test.toml")).unwrap()
    }

    #[test]
    fn clean_form_builds_an_engine() {
        let engine = build_engine(&form(CLEAN_FORM)).unwrap();
        let score = engine.score(&Attempt::new(&[("listening", 2), ("reading", 1)], 4));
        assert_eq!(score.composite.total, 30);
        assert_eq!(score.band.label, "High");
    }

    #[test]
    fn clean_form_audits_clean() {
        let audit = audit_form(&form(CLEAN_FORM));
        assert!(audit.is_valid());
        assert_eq!(audit.issue_count(), 0);
        assert_eq!(audit.sections.len(), 2);
    }

    #[test]
    fn broken_form_reports_everything_at_once() {
        let audit = audit_form(&form(BROKEN_FORM));
        assert!(!audit.is_valid());

        // duplicate section id, missing entry, decreasing step,
        // threshold above the composite range, floor not zero
        assert!(audit
            .form
            .contains(&FormIssue::DuplicateSection {
                id: "listening".to_string()
            }));
        let lines = audit.issue_lines();
        assert!(lines.iter().any(|l| l.contains("no scaled value")));
        assert!(lines.iter().any(|l| l.contains("decreases")));
        assert!(lines.iter().any(|l| l.contains("outside [0, 40]")));
        assert!(lines.iter().any(|l| l.contains("no band")));
        assert_eq!(audit.issue_count(), lines.len());
    }

    #[test]
    fn gate_refuses_broken_forms_with_the_full_audit() {
        let err = build_engine(&form(BROKEN_FORM)).unwrap_err();
        assert!(err.audit.issue_count() >= 5);
        assert!(err.to_string().contains("form 'broken' rejected"));
    }

    #[test]
    fn empty_form_is_reported_as_such() {
        let toml = r#"
[form]
id = "empty"
name = "Empty"
"#;
        let err = build_engine(&form(toml)).unwrap_err();
        assert!(err.audit.form.contains(&FormIssue::NoSections));
        // no bands either
        assert!(!err.audit.bands.is_valid());
    }

    #[test]
    fn audit_serializes_for_ci_consumers() {
        let audit = audit_form(&form(BROKEN_FORM));
        let json = serde_json::to_string(&audit).unwrap();
        assert!(json.contains("\"kind\":\"duplicate_section\""));

        let back: FormAudit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, audit);
    }
}
