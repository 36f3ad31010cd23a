//! The scoring engine: validated configuration in, scored attempts out.

use tracing::warn;

use crate::aggregate::aggregate;
use crate::band::BandScale;
use crate::convert::ScoreConverter;
use crate::error::ScaleError;
use crate::model::{Attempt, AttemptScore, Diagnostic, SectionScore};

/// Scores attempts for one test form.
///
/// Construction is the only fallible step. Once an engine exists, every
/// attempt produces a complete [`AttemptScore`]: out-of-domain raw scores
/// and section mismatches degrade to diagnostics, never to failures.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    sections: Vec<ScoreConverter>,
    bands: BandScale,
}

impl ScoringEngine {
    /// Assembles an engine, cross-checking the parts against each other.
    ///
    /// The band scale must cover exactly the composite range the sections
    /// can produce, and section names must be unique.
    pub fn new(sections: Vec<ScoreConverter>, bands: BandScale) -> Result<Self, ScaleError> {
        for (index, converter) in sections.iter().enumerate() {
            if sections[..index]
                .iter()
                .any(|other| other.section() == converter.section())
            {
                return Err(ScaleError::DuplicateSection {
                    section: converter.section().to_string(),
                });
            }
        }

        let expected: i32 = sections.iter().map(|c| c.table().max_scaled()).sum();
        if expected != bands.max_composite() {
            return Err(ScaleError::CompositeMismatch {
                expected,
                actual: bands.max_composite(),
            });
        }

        Ok(Self { sections, bands })
    }

    pub fn sections(&self) -> impl Iterator<Item = &ScoreConverter> {
        self.sections.iter()
    }

    pub fn bands(&self) -> &BandScale {
        &self.bands
    }

    /// Highest composite this form can produce.
    pub fn max_composite(&self) -> i32 {
        self.bands.max_composite()
    }

    /// Scores one attempt.
    pub fn score(&self, attempt: &Attempt) -> AttemptScore {
        let mut diagnostics = Vec::new();
        let mut sections = Vec::with_capacity(self.sections.len());

        for converter in &self.sections {
            let raw = match attempt
                .sections
                .iter()
                .find(|input| input.section == converter.section())
            {
                Some(input) => input.correct,
                None => {
                    warn!(
                        "attempt has no raw count for section '{}', scoring it as 0",
                        converter.section()
                    );
                    diagnostics.push(Diagnostic::MissingSection {
                        section: converter.section().to_string(),
                    });
                    0
                }
            };

            let conversion = converter.convert(raw);
            if let Some(diagnostic) = conversion.clamp {
                diagnostics.push(diagnostic);
            }
            sections.push(SectionScore {
                section: converter.section().to_string(),
                raw: raw.clamp(0, converter.table().max_raw()),
                scaled: conversion.scaled,
            });
        }

        for input in &attempt.sections {
            if !self
                .sections
                .iter()
                .any(|converter| converter.section() == input.section)
            {
                warn!("attempt names unknown section '{}', ignoring it", input.section);
                diagnostics.push(Diagnostic::UnknownSection {
                    section: input.section.clone(),
                });
            }
        }

        let scaled: Vec<i32> = sections.iter().map(|s| s.scaled).collect();
        let total_correct: u32 = sections.iter().map(|s| s.raw as u32).sum();
        let composite = aggregate(&scaled, total_correct, attempt.attempted);
        let band = self.bands.classify(composite.total).clone();

        AttemptScore {
            sections,
            composite,
            max_composite: self.max_composite(),
            band,
            diagnostics,
        }
    }
}
