//! Proficiency banding.

use crate::error::{BandIssue, BandScaleInvalid};
use crate::model::{Band, BandDescriptor};
use crate::validate::audit_bands;

/// An ordered, gap-free proficiency scale over `[0, max_composite]`.
///
/// The floor band (threshold 0) is held apart from the rest, so every
/// classification lands on a band structurally; there is no fallback arm
/// for a "missing" band because a missing band cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    /// Bands above the floor, descending by threshold.
    upper: Vec<Band>,
    floor: Band,
    max_composite: i32,
}

impl BandScale {
    /// Builds a scale from descending `(threshold, descriptor)` bands.
    ///
    /// Rejects the whole configuration with every issue found: thresholds
    /// must descend strictly, stay within `[0, max_composite]`, and end at
    /// exactly 0.
    pub fn new(bands: Vec<Band>, max_composite: i32) -> Result<Self, BandScaleInvalid> {
        let audit = audit_bands(&bands, max_composite);
        if !audit.is_valid() {
            return Err(BandScaleInvalid {
                issues: audit.issues,
            });
        }

        let mut upper = bands;
        let floor = match upper.pop() {
            Some(floor) => floor,
            None => {
                return Err(BandScaleInvalid {
                    issues: vec![BandIssue::NoBands],
                })
            }
        };

        Ok(Self {
            upper,
            floor,
            max_composite,
        })
    }

    /// The band for `composite`: the first band, scanning from the highest
    /// threshold down, whose threshold the composite reaches.
    ///
    /// Total over all of `i32`; negative input falls through to the floor.
    pub fn classify(&self, composite: i32) -> &BandDescriptor {
        for band in &self.upper {
            if composite >= band.threshold {
                return &band.descriptor;
            }
        }
        &self.floor.descriptor
    }

    pub fn max_composite(&self) -> i32 {
        self.max_composite
    }

    /// All bands in descending threshold order, floor last.
    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.upper.iter().chain(std::iter::once(&self.floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(threshold: i32, label: &str) -> Band {
        Band {
            threshold,
            descriptor: BandDescriptor {
                label: label.to_string(),
                narrative: String::new(),
                color: "#64748b".to_string(),
            },
        }
    }

    fn scale() -> BandScale {
        BandScale::new(
            vec![
                band(860, "Advanced"),
                band(730, "High Intermediate"),
                band(470, "Intermediate"),
                band(220, "Elementary"),
                band(0, "Beginner"),
            ],
            990,
        )
        .unwrap()
    }

    #[test]
    fn thresholds_are_inclusive() {
        let scale = scale();
        assert_eq!(scale.classify(860).label, "Advanced");
        assert_eq!(scale.classify(859).label, "High Intermediate");
        assert_eq!(scale.classify(730).label, "High Intermediate");
        assert_eq!(scale.classify(729).label, "Intermediate");
        assert_eq!(scale.classify(220).label, "Elementary");
        assert_eq!(scale.classify(219).label, "Beginner");
    }

    #[test]
    fn extremes_classify() {
        let scale = scale();
        assert_eq!(scale.classify(990).label, "Advanced");
        assert_eq!(scale.classify(0).label, "Beginner");
    }

    #[test]
    fn negative_composite_falls_to_the_floor() {
        assert_eq!(scale().classify(-10).label, "Beginner");
    }

    #[test]
    fn reference_attempt_lands_in_high_intermediate() {
        assert_eq!(scale().classify(780).label, "High Intermediate");
    }

    #[test]
    fn ascending_scale_is_rejected_with_all_issues() {
        let err = BandScale::new(vec![band(100, "Low"), band(500, "High")], 990).unwrap_err();
        // fails to descend and lacks a zero floor
        assert_eq!(err.issues.len(), 2, "issues: {:?}", err.issues);
    }

    #[test]
    fn missing_floor_is_rejected() {
        let err = BandScale::new(vec![band(860, "Advanced"), band(220, "Elementary")], 990)
            .unwrap_err();
        assert!(err
            .issues
            .contains(&BandIssue::FloorNotZero { lowest: 220 }));
    }

    #[test]
    fn single_floor_band_classifies_everything() {
        let scale = BandScale::new(vec![band(0, "Participant")], 100).unwrap();
        assert_eq!(scale.classify(0).label, "Participant");
        assert_eq!(scale.classify(100).label, "Participant");
    }

    #[test]
    fn bands_iterate_descending_with_floor_last() {
        let scale = scale();
        let labels: Vec<&str> = scale.bands().map(|b| b.descriptor.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Advanced",
                "High Intermediate",
                "Intermediate",
                "Elementary",
                "Beginner"
            ]
        );
    }
}
