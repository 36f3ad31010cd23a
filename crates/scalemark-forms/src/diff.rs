//! Calibration diffing between two form revisions.
//!
//! Equating drives recalibration review: when a new conversion table lands,
//! the interesting output is exactly which raw scores now map differently
//! and which band cutoffs moved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::file::{FormSection, TestForm};

/// One raw score whose scaled value differs between revisions.
///
/// `None` on either side means the raw score has no entry in that revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryChange {
    pub raw: i32,
    pub baseline: Option<i32>,
    pub updated: Option<i32>,
}

/// Changes within one section present in both revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDiff {
    pub section: String,
    pub spec_changed: bool,
    pub entries: Vec<EntryChange>,
}

/// A band whose threshold differs, or which exists in only one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandChange {
    pub label: String,
    pub baseline: Option<i32>,
    pub updated: Option<i32>,
}

/// Everything that changed between two form revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDiff {
    pub baseline_id: String,
    pub baseline_version: String,
    pub updated_id: String,
    pub updated_version: String,
    pub sections_added: Vec<String>,
    pub sections_removed: Vec<String>,
    pub sections: Vec<SectionDiff>,
    pub bands: Vec<BandChange>,
}

impl FormDiff {
    /// True when no calibration data changed. A version bump alone does not
    /// count.
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    pub fn change_count(&self) -> usize {
        self.sections_added.len()
            + self.sections_removed.len()
            + self
                .sections
                .iter()
                .map(|s| s.entries.len() + usize::from(s.spec_changed))
                .sum::<usize>()
            + self.bands.len()
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "# Calibration diff: {} v{} vs {} v{}\n\n",
            self.baseline_id, self.baseline_version, self.updated_id, self.updated_version
        ));

        if self.is_empty() {
            out.push_str("No calibration changes.\n");
            return out;
        }
        out.push_str(&format!("{} change(s).\n", self.change_count()));

        for id in &self.sections_added {
            out.push_str(&format!("\n- section added: {id}\n"));
        }
        for id in &self.sections_removed {
            out.push_str(&format!("\n- section removed: {id}\n"));
        }

        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.section));
            if section.spec_changed {
                out.push_str("Table bounds changed.\n\n");
            }
            if !section.entries.is_empty() {
                out.push_str("| Raw | Baseline | Updated |\n");
                out.push_str("|----:|---------:|--------:|\n");
                for change in &section.entries {
                    out.push_str(&format!(
                        "| {} | {} | {} |\n",
                        change.raw,
                        optional(change.baseline),
                        optional(change.updated),
                    ));
                }
            }
        }

        if !self.bands.is_empty() {
            out.push_str("\n## Bands\n\n");
            for band in &self.bands {
                out.push_str(&format!(
                    "- {}: {} to {}\n",
                    band.label,
                    optional(band.baseline),
                    optional(band.updated),
                ));
            }
        }

        out
    }
}

fn optional(value: Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(none)".to_string(),
    }
}

/// Compares two forms entry by entry and band by band.
pub fn diff_forms(baseline: &TestForm, updated: &TestForm) -> FormDiff {
    let mut sections_added = Vec::new();
    let mut sections_removed = Vec::new();
    let mut sections = Vec::new();

    for section in &updated.sections {
        if find_section(baseline, &section.id).is_none() {
            sections_added.push(section.id.clone());
        }
    }
    for section in &baseline.sections {
        let Some(other) = find_section(updated, &section.id) else {
            sections_removed.push(section.id.clone());
            continue;
        };
        let diff = diff_section(section, other);
        if diff.spec_changed || !diff.entries.is_empty() {
            sections.push(diff);
        }
    }

    FormDiff {
        baseline_id: baseline.id.clone(),
        baseline_version: baseline.version.clone(),
        updated_id: updated.id.clone(),
        updated_version: updated.version.clone(),
        sections_added,
        sections_removed,
        sections,
        bands: diff_bands(baseline, updated),
    }
}

fn find_section<'a>(form: &'a TestForm, id: &str) -> Option<&'a FormSection> {
    form.sections.iter().find(|s| s.id == id)
}

fn diff_section(baseline: &FormSection, updated: &FormSection) -> SectionDiff {
    let mut merged: BTreeMap<i32, (Option<i32>, Option<i32>)> = BTreeMap::new();
    for &(raw, scaled) in &baseline.entries {
        merged.entry(raw).or_default().0.get_or_insert(scaled);
    }
    for &(raw, scaled) in &updated.entries {
        merged.entry(raw).or_default().1.get_or_insert(scaled);
    }

    SectionDiff {
        section: baseline.id.clone(),
        spec_changed: baseline.spec != updated.spec,
        entries: merged
            .into_iter()
            .filter(|(_, (before, after))| before != after)
            .map(|(raw, (baseline, updated))| EntryChange {
                raw,
                baseline,
                updated,
            })
            .collect(),
    }
}

fn diff_bands(baseline: &TestForm, updated: &TestForm) -> Vec<BandChange> {
    let mut merged: BTreeMap<&str, (Option<i32>, Option<i32>)> = BTreeMap::new();
    for band in &baseline.bands {
        merged.entry(&band.descriptor.label).or_default().0 = Some(band.threshold);
    }
    for band in &updated.bands {
        merged.entry(&band.descriptor.label).or_default().1 = Some(band.threshold);
    }

    merged
        .into_iter()
        .filter(|(_, (before, after))| before != after)
        .map(|(label, (baseline, updated))| BandChange {
            label: label.to_string(),
            baseline,
            updated,
        })
        .collect()
}
