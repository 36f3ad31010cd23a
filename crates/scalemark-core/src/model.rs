//! Core value types shared across the scoring pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One section's outcome after conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: String,
    /// Raw correct-answer count, after clamping into the table domain.
    pub raw: i32,
    pub scaled: i32,
}

/// Attempt-level totals derived from every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Sum of all scaled section scores.
    pub total: i32,
    /// Sum of the (clamped) raw correct counts.
    pub total_correct: u32,
    /// Questions attempted, as reported by the exam workflow.
    pub attempted: u32,
    /// Share of attempted questions answered correctly, rounded half-up.
    pub percent: u8,
}

/// A proficiency band: the threshold a composite must reach, plus how the
/// band presents to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: i32,
    #[serde(flatten)]
    pub descriptor: BandDescriptor,
}

/// The reader-facing half of a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDescriptor {
    pub label: String,
    /// One-sentence reading of what the band means for the test taker.
    #[serde(default)]
    pub narrative: String,
    /// Display hint for report rendering (a CSS color).
    #[serde(default = "default_band_color")]
    pub color: String,
}

fn default_band_color() -> String {
    "#64748b".to_string()
}

/// Raw input for one section of an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRaw {
    pub section: String,
    pub correct: i32,
}

/// One test taker's attempt as handed over by the exam workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attempt {
    pub sections: Vec<SectionRaw>,
    pub attempted: u32,
}

impl Attempt {
    /// Builds an attempt from `(section, correct)` pairs.
    pub fn new(sections: &[(&str, i32)], attempted: u32) -> Self {
        Self {
            sections: sections
                .iter()
                .map(|&(section, correct)| SectionRaw {
                    section: section.to_string(),
                    correct,
                })
                .collect(),
            attempted,
        }
    }
}

/// Non-fatal events observed while scoring an attempt.
///
/// Diagnostics ride along on the result and are also emitted as `tracing`
/// warn events; they never abort a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A raw score fell outside the table domain and was clamped.
    OutOfRange {
        section: String,
        raw: i32,
        clamped_to: i32,
    },
    /// The attempt carried no raw count for a section the engine scores.
    MissingSection { section: String },
    /// The attempt named a section the engine does not score.
    UnknownSection { section: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OutOfRange {
                section,
                raw,
                clamped_to,
            } => write!(f, "{section}: raw {raw} clamped to {clamped_to}"),
            Diagnostic::MissingSection { section } => {
                write!(f, "{section}: no raw count supplied, scored as 0")
            }
            Diagnostic::UnknownSection { section } => {
                write!(f, "{section}: not part of this form, ignored")
            }
        }
    }
}

/// The fully scored outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptScore {
    pub sections: Vec<SectionScore>,
    pub composite: CompositeScore,
    /// Highest composite the form can produce, for rendering scales.
    pub max_composite: i32,
    pub band: BandDescriptor,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl AttemptScore {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
