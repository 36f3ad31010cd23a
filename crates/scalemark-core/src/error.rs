//! Error taxonomy for the scoring engine.
//!
//! Only calibration-data defects are fatal, and only at construction time.
//! Out-of-domain raw scores and zero-attempted percentages are recovered
//! inline and surface as [`crate::model::Diagnostic`]s, never as errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single defect found while auditing a calibration table.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableIssue {
    /// A raw score inside the table domain has no scaled value.
    #[error("raw {raw}: no scaled value")]
    MissingEntry { raw: i32 },

    /// More than one entry exists for the same raw score.
    #[error("raw {raw}: duplicate entry")]
    DuplicateEntry { raw: i32 },

    /// An entry's raw score lies outside `[0, max_raw]`.
    #[error("raw {raw}: outside the table domain")]
    RawOutOfDomain { raw: i32 },

    /// An entry's scaled value lies outside `[min_scaled, max_scaled]`.
    #[error("raw {raw}: scaled {scaled} outside [{min}, {max}]")]
    ScaledOutOfBounds {
        raw: i32,
        scaled: i32,
        min: i32,
        max: i32,
    },

    /// The scaled value drops below the previous raw score's.
    #[error("raw {raw}: scaled {scaled} decreases from {previous}")]
    DecreasingStep {
        raw: i32,
        scaled: i32,
        previous: i32,
    },

    /// The table bounds themselves are unusable.
    #[error("invalid table spec: {detail}")]
    InvalidSpec { detail: String },
}

/// A single defect found while auditing a band scale.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandIssue {
    /// The scale has no bands at all.
    #[error("band scale has no bands")]
    NoBands,

    /// A threshold fails to descend strictly from its predecessor.
    #[error("band {index}: threshold {threshold} does not descend from {previous}")]
    NotDescending {
        index: usize,
        threshold: i32,
        previous: i32,
    },

    /// The lowest threshold is not 0, leaving low composites without a band.
    #[error("lowest band starts at {lowest}, composites below it have no band")]
    FloorNotZero { lowest: i32 },

    /// A threshold lies outside `[0, max_composite]`.
    #[error("threshold {threshold} outside [0, {max}]")]
    ThresholdOutOfRange { threshold: i32, max: i32 },
}

/// Fatal: a calibration table failed its audit.
///
/// Carries every issue found, not just the first. `Display` stays a one-line
/// summary with the count; enumeration belongs to the audit renderers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calibration table rejected: {} issue(s)", .issues.len())]
pub struct TableInvalid {
    pub issues: Vec<TableIssue>,
}

/// Fatal: a band scale failed its audit. Same shape as [`TableInvalid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("band scale rejected: {} issue(s)", .issues.len())]
pub struct BandScaleInvalid {
    pub issues: Vec<BandIssue>,
}

/// Errors raised while assembling a [`crate::engine::ScoringEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    /// One section's calibration table was rejected.
    #[error("section '{section}': {source}")]
    Table {
        section: String,
        #[source]
        source: TableInvalid,
    },

    /// The band scale was rejected.
    #[error(transparent)]
    Bands(#[from] BandScaleInvalid),

    /// The band scale covers a different composite range than the sections
    /// can produce.
    #[error("band scale covers [0, {actual}] but the sections sum to {expected}")]
    CompositeMismatch { expected: i32, actual: i32 },

    /// Two converters claim the same section name.
    #[error("section '{section}' appears more than once")]
    DuplicateSection { section: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_issue_displays_one_line_each() {
        let issue = TableIssue::MissingEntry { raw: 41 };
        assert_eq!(issue.to_string(), "raw 41: no scaled value");

        let issue = TableIssue::DecreasingStep {
            raw: 7,
            scaled: 30,
            previous: 35,
        };
        assert_eq!(issue.to_string(), "raw 7: scaled 30 decreases from 35");
    }

    #[test]
    fn table_invalid_summarizes_with_count() {
        let err = TableInvalid {
            issues: vec![
                TableIssue::MissingEntry { raw: 3 },
                TableIssue::DuplicateEntry { raw: 9 },
            ],
        };
        assert_eq!(err.to_string(), "calibration table rejected: 2 issue(s)");
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn issues_serialize_with_a_kind_tag() {
        let issue = TableIssue::ScaledOutOfBounds {
            raw: 2,
            scaled: 900,
            min: 5,
            max: 495,
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"kind\":\"scaled_out_of_bounds\""));

        let back: TableIssue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, issue);
    }
}
