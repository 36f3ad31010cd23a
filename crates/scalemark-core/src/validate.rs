//! Calibration audits.
//!
//! Audits never stop at the first problem: a bad data file surfaces every
//! defect in one pass so a calibration editor can fix them together. The
//! same functions gate table and band-scale construction and back the CLI
//! `validate` command.

use serde::{Deserialize, Serialize};

use crate::error::{BandIssue, TableIssue};
use crate::model::Band;
use crate::table::TableSpec;

/// Outcome of auditing one calibration table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableAudit {
    pub issues: Vec<TableIssue>,
}

impl TableAudit {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Outcome of auditing a band scale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandAudit {
    pub issues: Vec<BandIssue>,
}

impl BandAudit {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Audits `(raw, scaled)` entries against `spec`.
///
/// Checks, per raw value in `0..=max_raw`: presence of exactly one entry,
/// scaled bounds, and monotonicity against the previous present entry.
/// Entries outside the domain are reported rather than ignored.
pub fn audit_table(spec: TableSpec, entries: &[(i32, i32)]) -> TableAudit {
    let mut issues = Vec::new();

    if spec.max_raw < 0 {
        issues.push(TableIssue::InvalidSpec {
            detail: format!("max_raw is {}", spec.max_raw),
        });
    }
    if spec.min_scaled > spec.max_scaled {
        issues.push(TableIssue::InvalidSpec {
            detail: format!(
                "min_scaled {} exceeds max_scaled {}",
                spec.min_scaled, spec.max_scaled
            ),
        });
    }
    if !issues.is_empty() {
        // The per-raw checks are meaningless against unusable bounds.
        return TableAudit { issues };
    }

    let mut seen: Vec<Option<i32>> = vec![None; (spec.max_raw + 1) as usize];
    for &(raw, scaled) in entries {
        if raw < 0 || raw > spec.max_raw {
            issues.push(TableIssue::RawOutOfDomain { raw });
            continue;
        }
        match seen[raw as usize] {
            Some(_) => issues.push(TableIssue::DuplicateEntry { raw }),
            None => seen[raw as usize] = Some(scaled),
        }
    }

    let mut previous: Option<i32> = None;
    for raw in 0..=spec.max_raw {
        let Some(scaled) = seen[raw as usize] else {
            issues.push(TableIssue::MissingEntry { raw });
            continue;
        };
        if scaled < spec.min_scaled || scaled > spec.max_scaled {
            issues.push(TableIssue::ScaledOutOfBounds {
                raw,
                scaled,
                min: spec.min_scaled,
                max: spec.max_scaled,
            });
        }
        if let Some(previous) = previous {
            if scaled < previous {
                issues.push(TableIssue::DecreasingStep {
                    raw,
                    scaled,
                    previous,
                });
            }
        }
        previous = Some(scaled);
    }

    TableAudit { issues }
}

/// Audits a band scale against the composite range it must cover.
///
/// Thresholds must descend strictly, stay within `[0, max_composite]`, and
/// end at exactly 0 so every composite lands on a band.
pub fn audit_bands(bands: &[Band], max_composite: i32) -> BandAudit {
    let mut issues = Vec::new();

    if bands.is_empty() {
        issues.push(BandIssue::NoBands);
        return BandAudit { issues };
    }

    for (index, band) in bands.iter().enumerate() {
        if band.threshold < 0 || band.threshold > max_composite {
            issues.push(BandIssue::ThresholdOutOfRange {
                threshold: band.threshold,
                max: max_composite,
            });
        }
        if index > 0 {
            let previous = bands[index - 1].threshold;
            if band.threshold >= previous {
                issues.push(BandIssue::NotDescending {
                    index,
                    threshold: band.threshold,
                    previous,
                });
            }
        }
    }

    if let Some(last) = bands.last() {
        if last.threshold != 0 {
            issues.push(BandIssue::FloorNotZero {
                lowest: last.threshold,
            });
        }
    }

    BandAudit { issues }
}
