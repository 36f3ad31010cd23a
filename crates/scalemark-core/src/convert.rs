//! Per-section score conversion.

use tracing::warn;

use crate::model::Diagnostic;
use crate::table::CalibrationTable;

/// Converts one section's raw scores through its calibration table.
#[derive(Debug, Clone)]
pub struct ScoreConverter {
    section: String,
    table: CalibrationTable,
}

/// Outcome of a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub scaled: i32,
    /// Present when the raw input fell outside the table domain.
    pub clamp: Option<Diagnostic>,
}

impl ScoreConverter {
    pub fn new(section: impl Into<String>, table: CalibrationTable) -> Self {
        Self {
            section: section.into(),
            table,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Scales a raw score. Never fails: out-of-domain input clamps to the
    /// nearest table endpoint and reports itself through the diagnostic.
    pub fn convert(&self, raw: i32) -> Conversion {
        let max_raw = self.table.max_raw();
        let scaled = self.table.lookup(raw);

        if raw < 0 || raw > max_raw {
            let clamped_to = raw.clamp(0, max_raw);
            warn!(
                "raw score {} outside [0, {}] for section '{}', clamped to {}",
                raw, max_raw, self.section, clamped_to
            );
            return Conversion {
                scaled,
                clamp: Some(Diagnostic::OutOfRange {
                    section: self.section.clone(),
                    raw,
                    clamped_to,
                }),
            };
        }

        Conversion { scaled, clamp: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableSpec;

    fn converter() -> ScoreConverter {
        let entries: Vec<(i32, i32)> = (0..=10).map(|r| (r, 5 + r * 10)).collect();
        let table = CalibrationTable::new(
            TableSpec {
                max_raw: 10,
                min_scaled: 5,
                max_scaled: 105,
            },
            &entries,
        )
        .unwrap();
        ScoreConverter::new("listening", table)
    }

    #[test]
    fn in_domain_conversion_is_exact_and_silent() {
        let conversion = converter().convert(7);
        assert_eq!(conversion.scaled, 75);
        assert!(conversion.clamp.is_none());
    }

    #[test]
    fn endpoints_convert_to_the_first_and_last_entries() {
        let converter = converter();
        assert_eq!(converter.convert(0).scaled, 5);
        assert_eq!(converter.convert(10).scaled, 105);
    }

    #[test]
    fn negative_raw_clamps_to_zero_with_a_diagnostic() {
        let converter = converter();
        let conversion = converter.convert(-5);

        assert_eq!(conversion.scaled, converter.convert(0).scaled);
        assert_eq!(
            conversion.clamp,
            Some(Diagnostic::OutOfRange {
                section: "listening".to_string(),
                raw: -5,
                clamped_to: 0,
            })
        );
    }

    #[test]
    fn overshooting_raw_clamps_to_max_with_a_diagnostic() {
        let converter = converter();
        let conversion = converter.convert(150);

        assert_eq!(conversion.scaled, converter.convert(10).scaled);
        assert_eq!(
            conversion.clamp,
            Some(Diagnostic::OutOfRange {
                section: "listening".to_string(),
                raw: 150,
                clamped_to: 10,
            })
        );
    }
}
